//! Error types for dispatch operations.

use thiserror::Error;

use crate::util::serde::{CarId, Floor, RequestId};

/// Errors produced by cars and the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Pickup references a floor outside the building, or source equals destination.
    #[error("invalid floor: {source_floor} -> {destination_floor}")]
    InvalidFloor {
        /// Requested source floor.
        source_floor: Floor,
        /// Requested destination floor.
        destination_floor: Floor,
    },
    /// A single car's queue is full.
    #[error("car {car_id} at capacity ({capacity} pending)")]
    CapacityExceeded {
        /// Car that rejected the request.
        car_id: CarId,
        /// Configured queue capacity of that car.
        capacity: usize,
    },
    /// Every car in the fleet rejected the request.
    #[error("fleet saturated: all {cars} cars at capacity")]
    FleetSaturated {
        /// Number of cars that were tried.
        cars: usize,
    },
    /// No car with this id exists.
    #[error("unknown car: {0}")]
    UnknownCar(CarId),
    /// No completion is being tracked for this request.
    #[error("unknown request: {0}")]
    UnknownRequest(RequestId),
    /// A wait did not finish within its timeout.
    #[error("operation timed out")]
    Timeout,
    /// The controller or car has been shut down.
    #[error("fleet has been shut down")]
    Shutdown,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Internal failure (worker spawn, join error).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
