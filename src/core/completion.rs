//! Completion tracking for dispatched requests.
//!
//! The controller opens a slot for every request before handing it to a car;
//! the car's worker fills the slot when the destination floor is published.
//! Callers block on a per-slot `Condvar` (no polling) until the trip finishes.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::core::{DispatchError, Request};
use crate::util::serde::{CarId, Floor, RequestId};

/// Outcome of a serviced request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrip {
    /// The request that was serviced.
    pub request: Request,
    /// Car that serviced it.
    pub car_id: CarId,
    /// Floor the car stopped at (the destination).
    pub final_floor: Floor,
    /// Floors travelled while servicing this request.
    pub floors_travelled: u32,
    /// Completion timestamp in milliseconds since epoch.
    pub completed_at_ms: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Pending,
    Ready,
}

struct Slot {
    trip: Option<CompletedTrip>,
    state: SlotState,
}

type SlotHandle = Arc<(Mutex<Slot>, Condvar)>;

/// Completion slots keyed by request id.
///
/// - `RwLock` over the map (read on store/wait, write on create/remove)
/// - per-slot `Mutex` + `Condvar` so waiters only contend with their own request
/// - finished-but-unclaimed slots are kept up to `retention`, oldest evicted first
pub(crate) struct CompletionStorage {
    entries: RwLock<HashMap<RequestId, SlotHandle>>,
    finished: Mutex<VecDeque<RequestId>>,
    retention: usize,
}

impl CompletionStorage {
    pub fn new(retention: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            finished: Mutex::new(VecDeque::new()),
            retention,
        }
    }

    /// Open a pending slot for a request about to be enqueued.
    pub fn create_slot(&self, id: RequestId) {
        let slot = Slot {
            trip: None,
            state: SlotState::Pending,
        };
        self.entries
            .write()
            .insert(id, Arc::new((Mutex::new(slot), Condvar::new())));
    }

    /// Store a finished trip and wake its waiters. Trips without a slot are ignored.
    pub fn store(&self, trip: CompletedTrip) {
        let id = trip.request.id();
        let stored = {
            let entries = self.entries.read();
            entries.get(&id).is_some_and(|pair| {
                let (slot_mutex, condvar) = pair.as_ref();
                let mut slot = slot_mutex.lock();
                slot.trip = Some(trip);
                slot.state = SlotState::Ready;
                condvar.notify_all();
                true
            })
        };
        if stored {
            self.evict_beyond_retention(id);
        }
    }

    fn evict_beyond_retention(&self, id: RequestId) {
        let evicted: Vec<RequestId> = {
            let mut finished = self.finished.lock();
            finished.push_back(id);
            let overflow = finished.len().saturating_sub(self.retention);
            finished.drain(..overflow).collect()
        };
        if !evicted.is_empty() {
            let mut entries = self.entries.write();
            for old in evicted {
                entries.remove(&old);
            }
        }
    }

    /// Take a finished trip without blocking.
    pub fn try_take(&self, id: RequestId) -> Option<CompletedTrip> {
        let pair = self.entries.read().get(&id).cloned()?;
        let trip = {
            let mut slot = pair.0.lock();
            if slot.state != SlotState::Ready {
                return None;
            }
            slot.trip.take()
        };
        self.remove(id);
        trip
    }

    /// Block until the trip finishes or `timeout` elapses.
    ///
    /// The slot survives a timeout so the caller may wait again.
    pub fn wait_for(&self, id: RequestId, timeout: Duration) -> Result<CompletedTrip, DispatchError> {
        let pair = self
            .entries
            .read()
            .get(&id)
            .cloned()
            .ok_or(DispatchError::UnknownRequest(id))?;

        let (slot_mutex, condvar) = pair.as_ref();
        let trip = {
            let mut slot = slot_mutex.lock();
            if slot.state == SlotState::Pending {
                let wait = condvar.wait_while_for(&mut slot, |s| s.state == SlotState::Pending, timeout);
                if wait.timed_out() && slot.state == SlotState::Pending {
                    return Err(DispatchError::Timeout);
                }
            }
            slot.trip.take()
        };

        self.remove(id);
        trip.ok_or(DispatchError::UnknownRequest(id))
    }

    /// Drop a slot entirely (used when no car accepted the request).
    pub fn remove(&self, id: RequestId) {
        self.entries.write().remove(&id);
    }

    /// Number of slots currently held, pending or finished.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}
