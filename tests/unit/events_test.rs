//! Tests for car event sinks

use elevator_dispatch::core::{build_car_event, CarEventKind, EventSink, InMemoryEventSink};
use elevator_dispatch::util::Direction;

#[test]
fn test_in_memory_event_sink() {
    let sink = InMemoryEventSink::new(10);
    assert!(sink.is_empty());

    sink.record(build_car_event(1, 7, CarEventKind::Accepted));
    assert_eq!(sink.len(), 1);

    let events = sink.events();
    assert_eq!(events[0].car_id, 1);
    assert_eq!(events[0].request_id, 7);
    assert_eq!(events[0].kind, CarEventKind::Accepted);
}

#[test]
fn test_event_sink_overflow() {
    let sink = InMemoryEventSink::new(2);

    sink.record(build_car_event(0, 1, CarEventKind::Accepted));
    sink.record(build_car_event(0, 2, CarEventKind::Accepted));
    sink.record(build_car_event(0, 3, CarEventKind::Accepted));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].request_id, 2); // First one popped
    assert_eq!(events[1].request_id, 3);
}

#[test]
fn test_events_for_car() {
    let sink = InMemoryEventSink::new(10);
    sink.record(build_car_event(0, 1, CarEventKind::Accepted));
    sink.record(build_car_event(1, 2, CarEventKind::Rejected));
    sink.record(build_car_event(0, 1, CarEventKind::Completed { floor: 4 }));

    let car0 = sink.events_for_car(0);
    assert_eq!(car0.len(), 2);
    assert!(car0.iter().all(|e| e.car_id == 0));
}

#[test]
fn test_build_car_event() {
    let kind = CarEventKind::Departed {
        from: 4,
        direction: Direction::Down,
    };
    let a = build_car_event(2, 9, kind);
    let b = build_car_event(2, 9, kind);

    assert_eq!(a.car_id, 2);
    assert_eq!(a.kind, kind);
    assert!(a.created_at_ms > 0);
    assert_ne!(a.event_id, b.event_id);
}

#[test]
fn test_event_serializes_with_kind_tag() {
    let event = build_car_event(0, 1, CarEventKind::FloorReached { floor: 3 });
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["kind"]["kind"], "floor_reached");
    assert_eq!(json["kind"]["floor"], 3);
}
