//! API-facing request/response models.
//!
//! Serializable shapes for callers that drive the fleet over some transport
//! (a simulation loop, a console dashboard). No transport is provided here.

use serde::{Deserialize, Serialize};

use crate::core::{CarStatus, Controller, DispatchError, FleetStats};
use crate::util::clock::now_ms;
use crate::util::serde::{Floor, FloorBounds, RequestId};

/// Pickup submission payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupSubmission {
    /// Floor where the passenger waits.
    pub source_floor: Floor,
    /// Floor the passenger wants to reach.
    pub destination_floor: Floor,
}

/// Outcome of a pickup submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PickupReceipt {
    /// A car accepted the pickup.
    Accepted {
        /// Identifier for completion tracking.
        request_id: RequestId,
    },
    /// The pickup was refused.
    Rejected {
        /// Human-readable reason.
        reason: String,
        /// Whether retrying later may succeed.
        retryable: bool,
    },
}

/// Fleet-wide snapshot for dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Serviceable floors.
    pub floor_bounds: FloorBounds,
    /// One entry per car, ordered by id.
    pub cars: Vec<CarStatus>,
    /// Aggregate statistics.
    pub stats: FleetStats,
    /// Snapshot time (ms since epoch).
    pub taken_at_ms: u128,
}

/// Health response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Fleet accepting pickups.
    pub ok: bool,
}

/// Submit a pickup and describe the outcome. Only saturation is retryable.
pub fn submit_pickup(controller: &Controller, req: PickupSubmission) -> PickupReceipt {
    match controller.request_pickup(req.source_floor, req.destination_floor) {
        Ok(request_id) => PickupReceipt::Accepted { request_id },
        Err(e) => PickupReceipt::Rejected {
            retryable: matches!(e, DispatchError::FleetSaturated { .. }),
            reason: e.to_string(),
        },
    }
}

/// Build a fleet snapshot.
#[must_use]
pub fn fleet_snapshot(controller: &Controller) -> FleetSnapshot {
    FleetSnapshot {
        floor_bounds: controller.config().floor_bounds,
        cars: controller.fleet_status(),
        stats: controller.stats(),
        taken_at_ms: now_ms(),
    }
}

/// Return a health payload.
#[must_use]
pub fn health(controller: &Controller) -> Health {
    Health {
        ok: !controller.is_shut_down(),
    }
}
