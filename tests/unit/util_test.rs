//! Tests for utility functions

use elevator_dispatch::util::{now_ms, Direction, FloorBounds};

#[test]
fn test_direction_step() {
    assert_eq!(Direction::Up.step(), 1);
    assert_eq!(Direction::Down.step(), -1);
    assert_eq!(Direction::default(), Direction::Up);
}

#[test]
fn test_direction_between() {
    assert_eq!(Direction::between(3, 8), Some(Direction::Up));
    assert_eq!(Direction::between(8, 3), Some(Direction::Down));
    assert_eq!(Direction::between(5, 5), None);
}

#[test]
fn test_direction_serde() {
    assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"down\"");
}

#[test]
fn test_floor_bounds() {
    let bounds = FloorBounds::default();
    assert_eq!(bounds, FloorBounds::new(1, 20));
    assert!(bounds.contains(1));
    assert!(!bounds.contains(0));
    assert_eq!(bounds.span(), 20);
}

#[test]
fn test_now_ms_advances() {
    let a = now_ms();
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(now_ms() > a);
}
