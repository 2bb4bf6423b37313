//! Tests for API models

use elevator_dispatch::config::FleetConfig;
use elevator_dispatch::core::Controller;
use elevator_dispatch::runtime::{
    fleet_snapshot, health, submit_pickup, PickupReceipt, PickupSubmission,
};
use elevator_dispatch::util::FloorBounds;
use std::time::Duration;

fn controller() -> Controller {
    Controller::new(FleetConfig::new(2, 2, FloorBounds::new(1, 10)).with_travel_time(Duration::ZERO))
        .unwrap()
}

#[test]
fn test_submit_pickup_accepted() {
    let controller = controller();
    let receipt = submit_pickup(
        &controller,
        PickupSubmission {
            source_floor: 2,
            destination_floor: 7,
        },
    );
    let PickupReceipt::Accepted { request_id } = receipt else {
        panic!("expected acceptance, got {receipt:?}");
    };
    assert!(controller.await_completion(request_id, Duration::from_secs(5)).is_ok());
    controller.shutdown();
}

#[test]
fn test_submit_pickup_invalid_not_retryable() {
    let controller = controller();
    let receipt = submit_pickup(
        &controller,
        PickupSubmission {
            source_floor: 0,
            destination_floor: 7,
        },
    );
    assert!(matches!(receipt, PickupReceipt::Rejected { retryable: false, .. }));

    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["status"], "rejected");
    controller.shutdown();
}

#[test]
fn test_fleet_snapshot_and_health() {
    let controller = controller();
    let snapshot = fleet_snapshot(&controller);
    assert_eq!(snapshot.cars.len(), 2);
    assert_eq!(snapshot.stats.car_count, 2);
    assert_eq!(snapshot.stats.total_capacity, 4);
    assert_eq!(snapshot.floor_bounds, FloorBounds::new(1, 10));
    assert!(health(&controller).ok);

    controller.shutdown();
    assert!(!health(&controller).ok);
}
