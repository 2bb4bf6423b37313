//! Car event sinks.
//!
//! Cars report what they do (accepting work, departing, reaching floors,
//! finishing a request) to an optional [`EventSink`]. The in-memory sink keeps
//! a bounded history for tests and dashboards.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::clock::now_ms;
use crate::util::serde::{CarId, Direction, Floor, RequestId};

/// What happened to a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CarEventKind {
    /// Request was appended to the car's queue.
    Accepted,
    /// Request was refused because the queue was full.
    Rejected,
    /// Car started servicing a request.
    Departed {
        /// Floor the car left from.
        from: Floor,
        /// Direction of travel for this request.
        direction: Direction,
    },
    /// Car published a new floor.
    FloorReached {
        /// Floor reached.
        floor: Floor,
    },
    /// Car reached the request's destination.
    Completed {
        /// Destination floor.
        floor: Floor,
    },
}

/// A single event emitted by a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarEvent {
    /// Event identifier.
    pub event_id: String,
    /// Car that emitted the event.
    pub car_id: CarId,
    /// Request the event relates to.
    pub request_id: RequestId,
    /// What happened.
    pub kind: CarEventKind,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Observer for car events. Called from caller threads (accept/reject) and
/// from car worker threads (travel), so implementations must be thread-safe.
pub trait EventSink: Send + Sync {
    /// Record an event.
    fn record(&self, event: CarEvent);
}

/// In-memory event sink with a bounded buffer; oldest events are evicted first.
pub struct InMemoryEventSink {
    events: Mutex<VecDeque<CarEvent>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a new in-memory sink holding at most `max_events` events.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events.min(1024))),
            max_events,
        }
    }

    /// Snapshot of stored events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<CarEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Snapshot of stored events emitted by one car, oldest first.
    #[must_use]
    pub fn events_for_car(&self, car_id: CarId) -> Vec<CarEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.car_id == car_id)
            .cloned()
            .collect()
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&self, event: CarEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }
}

/// Helper to build a car event stamped with a fresh id and the current time.
#[must_use]
pub fn build_car_event(car_id: CarId, request_id: RequestId, kind: CarEventKind) -> CarEvent {
    CarEvent {
        event_id: Uuid::new_v4().to_string(),
        car_id,
        request_id,
        kind,
        created_at_ms: now_ms(),
    }
}
