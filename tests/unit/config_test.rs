//! Tests for configuration validation

use elevator_dispatch::config::FleetConfig;
use elevator_dispatch::util::FloorBounds;
use std::time::Duration;

fn valid() -> FleetConfig {
    FleetConfig::new(3, 5, FloorBounds::new(1, 10))
}

#[test]
fn test_fleet_config_validation() {
    assert!(valid().validate().is_ok());
    assert_eq!(valid().total_capacity(), 15);
}

#[test]
fn test_fleet_config_invalid_num_cars() {
    let mut invalid = valid();
    invalid.num_cars = 0;
    assert!(invalid.validate().is_err());
}

#[test]
fn test_fleet_config_invalid_capacity() {
    let mut invalid = valid();
    invalid.capacity_per_car = 0;
    assert!(invalid.validate().is_err());
}

#[test]
fn test_fleet_config_invalid_bounds() {
    let invalid = FleetConfig::new(1, 1, FloorBounds::new(10, 10));
    assert!(invalid.validate().is_err());
}

#[test]
fn test_fleet_config_starting_floors_checked() {
    assert!(valid().with_starting_floors(vec![1, 5]).validate().is_err());
    assert!(valid().with_starting_floors(vec![1, 5, 11]).validate().is_err());
    assert!(valid().with_starting_floors(vec![1, 5, 10]).validate().is_ok());
}

#[test]
fn test_fleet_config_travel_time() {
    let cfg = valid().with_travel_time(Duration::from_millis(250));
    assert_eq!(cfg.travel_time_ms, 250);
    assert_eq!(cfg.travel_time(), Duration::from_millis(250));
}

#[test]
fn test_fleet_config_from_json() {
    let json = r#"{
        "num_cars": 2,
        "capacity_per_car": 4,
        "floor_bounds": { "min": -2, "max": 12 },
        "starting_floors": [0, 12]
    }"#;

    let config = FleetConfig::from_json_str(json).unwrap();
    assert_eq!(config.num_cars, 2);
    assert_eq!(config.floor_bounds, FloorBounds::new(-2, 12));
    assert_eq!(config.travel_time_ms, 1000);
    assert_eq!(config.starting_floor(0), 0);
    assert_eq!(config.starting_floor(1), 12);
}

#[test]
fn test_fleet_config_from_json_invalid() {
    let json = r#"{ "num_cars": 0, "capacity_per_car": 4, "floor_bounds": { "min": 1, "max": 5 } }"#;
    assert!(FleetConfig::from_json_str(json).is_err());
    assert!(FleetConfig::from_json_str("not json").is_err());
}
