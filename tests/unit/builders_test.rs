//! Tests for builder modules

use elevator_dispatch::builders::ControllerBuilder;
use elevator_dispatch::config::FleetConfig;
use elevator_dispatch::core::{CarEventKind, DispatchError, InMemoryEventSink};
use elevator_dispatch::util::FloorBounds;
use std::sync::Arc;
use std::time::Duration;

fn config() -> FleetConfig {
    FleetConfig::new(2, 3, FloorBounds::new(1, 10)).with_travel_time(Duration::ZERO)
}

#[test]
fn test_controller_builder_defaults() {
    let builder = ControllerBuilder::new(config());
    assert_eq!(builder.config().num_cars, 2);
    assert_eq!(builder.config().capacity_per_car, 3);
    assert!(!builder.has_event_sink());
}

#[test]
fn test_controller_builder_with_sink() {
    let sink = Arc::new(InMemoryEventSink::new(256));
    let controller = ControllerBuilder::new(config())
        .with_event_sink(sink.clone())
        .build()
        .unwrap();

    let id = controller.request_pickup(2, 6).unwrap();
    controller.await_completion(id, Duration::from_secs(5)).unwrap();

    let kinds: Vec<CarEventKind> = sink.events_for_car(0).into_iter().map(|e| e.kind).collect();
    assert_eq!(kinds.first(), Some(&CarEventKind::Accepted));
    assert_eq!(kinds.last(), Some(&CarEventKind::Completed { floor: 6 }));
    controller.shutdown();
}

#[test]
fn test_controller_builder_rejects_invalid() {
    let mut bad = config();
    bad.capacity_per_car = 0;
    let err = ControllerBuilder::new(bad).build().err().unwrap();
    assert!(matches!(err, DispatchError::InvalidConfig(_)));
}
