//! Fleet statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Statistics about fleet utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetStats {
    /// Number of cars in the fleet.
    pub car_count: usize,
    /// Sum of per-car queue capacities.
    pub total_capacity: usize,
    /// Requests currently waiting in car queues.
    pub queued_requests: usize,
    /// Cars currently servicing a request.
    pub moving_cars: usize,
    /// Requests accepted by some car.
    pub dispatched_requests: u64,
    /// Requests that reached their destination.
    pub completed_requests: u64,
    /// Pickups refused because every car was full.
    pub saturated_requests: u64,
    /// Enqueue attempts that a car refused and the controller retried elsewhere.
    pub capacity_retries: u64,
    /// Total floors travelled by all cars.
    pub floors_travelled: u64,
}

/// Internal counters for fleet statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct FleetCounters {
    pub dispatched_requests: AtomicU64,
    pub completed_requests: AtomicU64,
    pub saturated_requests: AtomicU64,
    pub capacity_retries: AtomicU64,
    pub floors_travelled: AtomicU64,
}

impl FleetCounters {
    /// Copy the counters into a stats snapshot; fleet-shape fields are left for the caller.
    pub fn snapshot(&self) -> FleetStats {
        FleetStats {
            dispatched_requests: self.dispatched_requests.load(Ordering::Relaxed),
            completed_requests: self.completed_requests.load(Ordering::Relaxed),
            saturated_requests: self.saturated_requests.load(Ordering::Relaxed),
            capacity_retries: self.capacity_retries.load(Ordering::Relaxed),
            floors_travelled: self.floors_travelled.load(Ordering::Relaxed),
            ..FleetStats::default()
        }
    }
}
