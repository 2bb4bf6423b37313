//! Pickup request value object.

use serde::{Deserialize, Serialize};

use crate::core::DispatchError;
use crate::util::serde::{Direction, Floor, FloorBounds, RequestId};

/// A single pickup-to-destination service order.
///
/// Immutable once created: fields are private and the type is `Copy`, so a
/// queued request can never be altered by whoever enqueued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    id: RequestId,
    source_floor: Floor,
    destination_floor: Floor,
}

impl Request {
    /// Create a request without bounds checking.
    #[must_use]
    pub const fn new(id: RequestId, source_floor: Floor, destination_floor: Floor) -> Self {
        Self {
            id,
            source_floor,
            destination_floor,
        }
    }

    /// Create a request, rejecting equal floors or floors outside `bounds`.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidFloor` when validation fails.
    pub fn validated(
        id: RequestId,
        source_floor: Floor,
        destination_floor: Floor,
        bounds: FloorBounds,
    ) -> Result<Self, DispatchError> {
        validate_floors(source_floor, destination_floor, bounds)?;
        Ok(Self::new(id, source_floor, destination_floor))
    }

    /// Request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Floor where the passenger is waiting.
    #[must_use]
    pub const fn source_floor(&self) -> Floor {
        self.source_floor
    }

    /// Floor the passenger wants to reach.
    #[must_use]
    pub const fn destination_floor(&self) -> Floor {
        self.destination_floor
    }

    /// Direction of the passenger's trip.
    #[must_use]
    pub fn trip_direction(&self) -> Direction {
        Direction::between(self.source_floor, self.destination_floor).unwrap_or_default()
    }
}

/// Check that a trip is between two distinct floors inside `bounds`.
///
/// # Errors
///
/// Returns `DispatchError::InvalidFloor` when validation fails.
pub fn validate_floors(
    source_floor: Floor,
    destination_floor: Floor,
    bounds: FloorBounds,
) -> Result<(), DispatchError> {
    if source_floor == destination_floor
        || !bounds.contains(source_floor)
        || !bounds.contains(destination_floor)
    {
        return Err(DispatchError::InvalidFloor {
            source_floor,
            destination_floor,
        });
    }
    Ok(())
}
