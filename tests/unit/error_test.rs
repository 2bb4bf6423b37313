//! Tests for error types

use elevator_dispatch::core::{AppResult, DispatchError};

#[test]
fn test_invalid_floor_error() {
    let err = DispatchError::InvalidFloor {
        source_floor: 0,
        destination_floor: 5,
    };
    assert_eq!(format!("{}", err), "invalid floor: 0 -> 5");
}

#[test]
fn test_capacity_exceeded_error() {
    let err = DispatchError::CapacityExceeded { car_id: 2, capacity: 5 };
    assert_eq!(format!("{}", err), "car 2 at capacity (5 pending)");
}

#[test]
fn test_fleet_saturated_error() {
    let err = DispatchError::FleetSaturated { cars: 3 };
    assert_eq!(format!("{}", err), "fleet saturated: all 3 cars at capacity");
}

#[test]
fn test_invalid_config_error() {
    let err = DispatchError::InvalidConfig("num_cars must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: num_cars must be greater than 0"
    );
}

#[test]
fn test_converts_into_anyhow() {
    let result: AppResult<()> = Err(DispatchError::Timeout.into());
    assert_eq!(result.unwrap_err().to_string(), "operation timed out");
}
