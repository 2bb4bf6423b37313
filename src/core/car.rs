//! Elevator car: a bounded FIFO request queue serviced by a dedicated worker.
//!
//! A car is split into two halves:
//!
//! - [`Car`], the handle kept by the controller. It enqueues requests with a
//!   non-blocking `try_send` on a bounded channel and reads the published
//!   status.
//! - [`CarWorker`], which owns the receiving side and runs the service loop on
//!   its own OS thread. Only the worker mutates floor, direction and state.
//!
//! # Design Principles
//!
//! - **No polling**: an idle worker blocks on channel `recv`; waiters for idle
//!   use a `Condvar`
//! - **Unlocked travel**: the per-floor sleep happens with no lock held, so
//!   `enqueue` and status reads never wait on a moving car
//! - **Clean shutdown**: closing the handle drops the sender; the worker drains
//!   what is already queued and exits

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::completion::{CompletedTrip, CompletionStorage};
use crate::core::events::{build_car_event, CarEventKind, EventSink};
use crate::core::stats::FleetCounters;
use crate::core::{DispatchError, Request};
use crate::util::clock::now_ms;
use crate::util::serde::{CarId, Direction, Floor, RequestId};

/// Service state of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarState {
    /// Queue empty; worker blocked waiting for work.
    Idle,
    /// Travelling towards the active request's destination.
    Moving,
}

/// Read-only snapshot of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarStatus {
    /// Car identifier.
    pub car_id: CarId,
    /// Last published floor.
    pub current_floor: Floor,
    /// Direction of the current or most recent trip.
    pub direction: Direction,
    /// Idle or moving.
    pub state: CarState,
    /// Requests waiting behind the active one.
    pub queue_length: usize,
    /// Maximum number of waiting requests.
    pub capacity: usize,
    /// Request currently being serviced.
    pub active_request: Option<RequestId>,
}

/// State published by the worker.
struct Published {
    floor: Floor,
    direction: Direction,
    state: CarState,
    active: Option<RequestId>,
}

struct CarShared {
    published: Mutex<Published>,
    /// Signalled whenever a request finishes or the worker goes idle.
    settled: Condvar,
    /// Accepted requests not yet finished (queued plus in flight).
    outstanding: AtomicUsize,
}

/// Construction parameters for a single car.
#[derive(Clone)]
pub struct CarParams {
    /// Car identifier.
    pub id: CarId,
    /// Maximum number of waiting requests.
    pub capacity: usize,
    /// Floor the car is parked at when created.
    pub starting_floor: Floor,
    /// Simulated time to travel one floor.
    pub travel_time: Duration,
    /// Optional observer for car events.
    pub events: Option<Arc<dyn EventSink>>,
}

impl CarParams {
    /// Parameters with no travel delay and no event sink.
    #[must_use]
    pub fn new(id: CarId, capacity: usize, starting_floor: Floor) -> Self {
        Self {
            id,
            capacity,
            starting_floor,
            travel_time: Duration::ZERO,
            events: None,
        }
    }

    /// Set the simulated per-floor travel time.
    #[must_use]
    pub fn with_travel_time(mut self, travel_time: Duration) -> Self {
        self.travel_time = travel_time;
        self
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = Some(events);
        self
    }
}

/// Handle to a car: enqueue work and observe its published state.
pub struct Car {
    id: CarId,
    capacity: usize,
    /// Sender side of the request queue. `None` once closed.
    tx: Mutex<Option<Sender<Request>>>,
    /// Receiver clone used only for `len()`; never received from.
    pending: Receiver<Request>,
    shared: Arc<CarShared>,
    events: Option<Arc<dyn EventSink>>,
}

impl Car {
    /// Create a car handle and its (not yet running) worker.
    ///
    /// Run the worker with [`CarWorker::run`] on a thread of your choice or
    /// [`CarWorker::spawn`].
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidConfig` if `capacity` is zero.
    pub fn new(params: CarParams) -> Result<(Self, CarWorker), DispatchError> {
        Self::with_tracking(params, Arc::new(FleetCounters::default()), None)
    }

    pub(crate) fn with_tracking(
        params: CarParams,
        counters: Arc<FleetCounters>,
        completions: Option<Arc<CompletionStorage>>,
    ) -> Result<(Self, CarWorker), DispatchError> {
        if params.capacity == 0 {
            return Err(DispatchError::InvalidConfig(format!(
                "car {} capacity must be greater than 0",
                params.id
            )));
        }

        let (tx, rx) = bounded::<Request>(params.capacity);
        let shared = Arc::new(CarShared {
            published: Mutex::new(Published {
                floor: params.starting_floor,
                direction: Direction::Up,
                state: CarState::Idle,
                active: None,
            }),
            settled: Condvar::new(),
            outstanding: AtomicUsize::new(0),
        });

        let car = Self {
            id: params.id,
            capacity: params.capacity,
            tx: Mutex::new(Some(tx)),
            pending: rx.clone(),
            shared: Arc::clone(&shared),
            events: params.events.clone(),
        };
        let worker = CarWorker {
            id: params.id,
            rx,
            shared,
            travel_time: params.travel_time,
            events: params.events,
            counters,
            completions,
        };
        Ok((car, worker))
    }

    /// Car identifier.
    #[must_use]
    pub const fn id(&self) -> CarId {
        self.id
    }

    /// Maximum number of waiting requests.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a request to the tail of the queue.
    ///
    /// Never blocks on a full queue and never drops the request silently.
    ///
    /// # Errors
    ///
    /// - `DispatchError::CapacityExceeded` if `capacity` requests are already waiting
    /// - `DispatchError::Shutdown` if the car has been closed
    pub fn enqueue(&self, request: Request) -> Result<(), DispatchError> {
        let tx_guard = self.tx.lock();
        let Some(tx) = tx_guard.as_ref() else {
            return Err(DispatchError::Shutdown);
        };

        // Counted before the send so the worker can never finish it first.
        self.shared.outstanding.fetch_add(1, Ordering::AcqRel);
        // The worker takes `published` before departing, so holding it here
        // orders `Accepted` ahead of every travel event for this request.
        let published = self.shared.published.lock();
        match tx.try_send(request) {
            Ok(()) => {
                drop(tx_guard);
                self.emit(request.id(), CarEventKind::Accepted);
                drop(published);
                debug!(car_id = self.id, request_id = request.id(), "request accepted");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                drop(published);
                drop(tx_guard);
                self.shared.outstanding.fetch_sub(1, Ordering::AcqRel);
                debug!(car_id = self.id, request_id = request.id(), "car queue full");
                self.emit(request.id(), CarEventKind::Rejected);
                Err(DispatchError::CapacityExceeded {
                    car_id: self.id,
                    capacity: self.capacity,
                })
            }
            Err(TrySendError::Disconnected(_)) => {
                self.shared.outstanding.fetch_sub(1, Ordering::AcqRel);
                Err(DispatchError::Shutdown)
            }
        }
    }

    /// Last published floor. May lag the true position by one step during travel.
    #[must_use]
    pub fn current_floor(&self) -> Floor {
        self.shared.published.lock().floor
    }

    /// Direction of the current or most recent trip.
    #[must_use]
    pub fn current_direction(&self) -> Direction {
        self.shared.published.lock().direction
    }

    /// Idle or moving.
    #[must_use]
    pub fn state(&self) -> CarState {
        self.shared.published.lock().state
    }

    /// Requests waiting behind the active one.
    #[must_use]
    pub fn queue_length(&self) -> usize {
        self.pending.len()
    }

    /// Consistent snapshot of floor, direction, state and queue length.
    #[must_use]
    pub fn status(&self) -> CarStatus {
        let published = self.shared.published.lock();
        CarStatus {
            car_id: self.id,
            current_floor: published.floor,
            direction: published.direction,
            state: published.state,
            queue_length: self.pending.len(),
            capacity: self.capacity,
            active_request: published.active,
        }
    }

    /// Block until every accepted request has been serviced and the car is
    /// `Idle`, or `timeout` elapses.
    ///
    /// Returns `true` if the car settled within the timeout.
    #[must_use]
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let settled = |p: &Published| {
            self.shared.outstanding.load(Ordering::Acquire) == 0 && p.state == CarState::Idle
        };
        let mut published = self.shared.published.lock();
        while !settled(&*published) {
            if self
                .shared
                .settled
                .wait_until(&mut published, deadline)
                .timed_out()
            {
                return settled(&*published);
            }
        }
        true
    }

    /// Stop accepting requests. Already queued requests are still serviced,
    /// after which the worker exits.
    pub fn close(&self) {
        self.tx.lock().take();
    }

    /// Whether [`Car::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.lock().is_none()
    }

    fn emit(&self, request_id: RequestId, kind: CarEventKind) {
        if let Some(events) = &self.events {
            events.record(build_car_event(self.id, request_id, kind));
        }
    }
}

/// The service loop of one car. Owns the receiving end of the queue.
pub struct CarWorker {
    id: CarId,
    rx: Receiver<Request>,
    shared: Arc<CarShared>,
    travel_time: Duration,
    events: Option<Arc<dyn EventSink>>,
    counters: Arc<FleetCounters>,
    completions: Option<Arc<CompletionStorage>>,
}

impl CarWorker {
    /// Run the worker on a dedicated, named OS thread.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Internal` if the thread cannot be spawned.
    pub fn spawn(self, stack_size: Option<usize>) -> Result<JoinHandle<()>, DispatchError> {
        let mut builder = thread::Builder::new().name(format!("car-{}", self.id));
        if let Some(size) = stack_size {
            builder = builder.stack_size(size);
        }
        let id = self.id;
        builder
            .spawn(move || self.run())
            .map_err(|e| DispatchError::Internal(format!("failed to spawn car {id} worker: {e}")))
    }

    /// The worker loop. Services requests strictly in queue order and returns
    /// once the car is closed and its queue drained.
    pub fn run(self) {
        debug!(car_id = self.id, "car worker started");
        loop {
            let request = match self.rx.try_recv() {
                Ok(request) => request,
                Err(TryRecvError::Empty) => {
                    self.publish_idle();
                    // Suspension point: sleeps until an enqueue or close.
                    match self.rx.recv() {
                        Ok(request) => request,
                        Err(_) => break,
                    }
                }
                Err(TryRecvError::Disconnected) => break,
            };
            self.service(request);
        }
        self.publish_idle();
        debug!(car_id = self.id, "car worker exiting");
    }

    fn publish_idle(&self) {
        let mut published = self.shared.published.lock();
        published.state = CarState::Idle;
        published.active = None;
        self.shared.settled.notify_all();
    }

    fn service(&self, request: Request) {
        let destination = request.destination_floor();
        let (start, direction) = {
            let mut published = self.shared.published.lock();
            published.state = CarState::Moving;
            published.active = Some(request.id());
            if let Some(direction) = Direction::between(published.floor, destination) {
                published.direction = direction;
            }
            (published.floor, published.direction)
        };

        debug!(
            car_id = self.id,
            request_id = request.id(),
            from = start,
            to = destination,
            "car departing"
        );
        self.emit(request.id(), CarEventKind::Departed { from: start, direction });

        let mut floor = start;
        let mut travelled: u32 = 0;
        while floor != destination {
            if !self.travel_time.is_zero() {
                thread::sleep(self.travel_time);
            }
            floor += direction.step();
            self.shared.published.lock().floor = floor;
            travelled += 1;
            debug!(car_id = self.id, request_id = request.id(), floor, "floor reached");
            self.emit(request.id(), CarEventKind::FloorReached { floor });
        }

        self.counters.completed_requests.fetch_add(1, Ordering::Relaxed);
        self.counters
            .floors_travelled
            .fetch_add(u64::from(travelled), Ordering::Relaxed);
        if let Some(completions) = &self.completions {
            completions.store(CompletedTrip {
                request,
                car_id: self.id,
                final_floor: floor,
                floors_travelled: travelled,
                completed_at_ms: now_ms(),
            });
        }
        self.emit(request.id(), CarEventKind::Completed { floor });
        info!(
            car_id = self.id,
            request_id = request.id(),
            floor,
            floors_travelled = travelled,
            "request serviced"
        );

        // Idle must be visible before waiters observe outstanding == 0.
        let mut published = self.shared.published.lock();
        published.active = None;
        if self.rx.is_empty() {
            published.state = CarState::Idle;
        }
        self.shared.outstanding.fetch_sub(1, Ordering::AcqRel);
        self.shared.settled.notify_all();
    }

    fn emit(&self, request_id: RequestId, kind: CarEventKind) {
        if let Some(events) = &self.events {
            events.record(build_car_event(self.id, request_id, kind));
        }
    }
}
