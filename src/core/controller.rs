//! Fleet controller: validates pickups, picks a car, hands the request off.
//!
//! The controller owns every [`Car`] handle and the join handles of their
//! worker threads. Dispatch runs on the caller's thread and takes no global
//! lock: the car list is immutable after construction, and each car guards
//! its own queue and published state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::FleetConfig;
use crate::core::car::{Car, CarParams, CarState, CarStatus};
use crate::core::completion::{CompletedTrip, CompletionStorage};
use crate::core::dispatch::rank_by_distance;
use crate::core::events::EventSink;
use crate::core::request::validate_floors;
use crate::core::stats::{FleetCounters, FleetStats};
use crate::core::{DispatchError, Request};
use crate::util::serde::{CarId, Floor, RequestId};

/// How long `shutdown` waits for each worker before detaching it.
const WORKER_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Multi-car dispatch controller.
///
/// Construct once and share by reference or `Arc`; every method takes `&self`.
pub struct Controller {
    config: FleetConfig,
    cars: Vec<Car>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    completions: Arc<CompletionStorage>,
    counters: Arc<FleetCounters>,
    request_id_counter: AtomicU64,
    shutdown: AtomicBool,
}

impl Controller {
    /// Create a controller and start one worker thread per car.
    ///
    /// # Errors
    ///
    /// - `DispatchError::InvalidConfig` if the configuration is invalid
    /// - `DispatchError::Internal` if a worker thread cannot be spawned
    pub fn new(config: FleetConfig) -> Result<Self, DispatchError> {
        Self::start(config, None)
    }

    pub(crate) fn start(
        config: FleetConfig,
        events: Option<Arc<dyn EventSink>>,
    ) -> Result<Self, DispatchError> {
        config.validate().map_err(DispatchError::InvalidConfig)?;

        let counters = Arc::new(FleetCounters::default());
        let completions = Arc::new(CompletionStorage::new(config.completion_retention));
        let mut cars = Vec::with_capacity(config.num_cars);
        let mut workers = Vec::with_capacity(config.num_cars);

        for car_id in 0..config.num_cars {
            let mut params = CarParams::new(car_id, config.capacity_per_car, config.starting_floor(car_id))
                .with_travel_time(config.travel_time());
            if let Some(events) = &events {
                params = params.with_events(Arc::clone(events));
            }

            let (car, worker) =
                Car::with_tracking(params, Arc::clone(&counters), Some(Arc::clone(&completions)))?;
            match worker.spawn(config.worker_stack_size) {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Started workers exit once their queues close.
                    cars.iter().for_each(Car::close);
                    return Err(e);
                }
            }
            cars.push(car);
        }

        info!(
            num_cars = config.num_cars,
            capacity_per_car = config.capacity_per_car,
            min_floor = config.floor_bounds.min,
            max_floor = config.floor_bounds.max,
            travel_time_ms = config.travel_time_ms,
            "elevator fleet started"
        );

        Ok(Self {
            config,
            cars,
            workers: Mutex::new(workers),
            completions,
            counters,
            request_id_counter: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Dispatch a pickup from `source_floor` to `destination_floor`.
    ///
    /// Cars are tried nearest first (lowest id on ties); a full car is skipped
    /// in favour of the next nearest. Once accepted, the request is serviced
    /// only by that car.
    ///
    /// # Errors
    ///
    /// - `DispatchError::InvalidFloor` for equal floors or floors out of bounds
    /// - `DispatchError::FleetSaturated` if every car is at capacity
    /// - `DispatchError::Shutdown` after [`Controller::shutdown`]
    pub fn request_pickup(
        &self,
        source_floor: Floor,
        destination_floor: Floor,
    ) -> Result<RequestId, DispatchError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(DispatchError::Shutdown);
        }
        validate_floors(source_floor, destination_floor, self.config.floor_bounds)?;

        let id = self.request_id_counter.fetch_add(1, Ordering::Relaxed);
        let request = Request::new(id, source_floor, destination_floor);

        let positions: Vec<(CarId, Floor)> = self
            .cars
            .iter()
            .map(|car| (car.id(), car.current_floor()))
            .collect();
        let ranked = rank_by_distance(source_floor, &positions);

        // Slot must exist before the car can possibly finish the trip.
        self.completions.create_slot(id);

        for car_id in ranked {
            match self.cars[car_id].enqueue(request) {
                Ok(()) => {
                    self.counters.dispatched_requests.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        request_id = id,
                        car_id,
                        source_floor,
                        destination_floor,
                        "pickup dispatched"
                    );
                    return Ok(id);
                }
                Err(DispatchError::CapacityExceeded { .. }) => {
                    self.counters.capacity_retries.fetch_add(1, Ordering::Relaxed);
                    debug!(request_id = id, car_id, "car full, trying next nearest");
                }
                Err(e) => {
                    self.completions.remove(id);
                    return Err(e);
                }
            }
        }

        self.completions.remove(id);
        self.counters.saturated_requests.fetch_add(1, Ordering::Relaxed);
        warn!(
            request_id = id,
            source_floor,
            destination_floor,
            cars = self.cars.len(),
            "fleet saturated, pickup rejected"
        );
        Err(DispatchError::FleetSaturated {
            cars: self.cars.len(),
        })
    }

    /// Convenience wrapper over [`Controller::request_pickup`] for async call
    /// sites. Dispatch is a non-blocking `try_send` per car, so it runs inline
    /// without yielding or touching the blocking pool.
    ///
    /// # Errors
    ///
    /// Same as [`Controller::request_pickup`].
    #[cfg(feature = "tokio-runtime")]
    #[allow(clippy::unused_async)]
    pub async fn request_pickup_async(
        &self,
        source_floor: Floor,
        destination_floor: Floor,
    ) -> Result<RequestId, DispatchError> {
        self.request_pickup(source_floor, destination_floor)
    }

    /// Status snapshot of one car.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::UnknownCar` if no such car exists.
    pub fn car_status(&self, car_id: CarId) -> Result<CarStatus, DispatchError> {
        self.cars
            .get(car_id)
            .map(Car::status)
            .ok_or(DispatchError::UnknownCar(car_id))
    }

    /// Status snapshot of every car, ordered by id.
    #[must_use]
    pub fn fleet_status(&self) -> Vec<CarStatus> {
        self.cars.iter().map(Car::status).collect()
    }

    /// Borrow a car handle.
    #[must_use]
    pub fn car(&self, car_id: CarId) -> Option<&Car> {
        self.cars.get(car_id)
    }

    /// Number of cars in the fleet.
    #[must_use]
    pub fn num_cars(&self) -> usize {
        self.cars.len()
    }

    /// Configuration the controller was built with.
    #[must_use]
    pub const fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Block until the request reaches its destination.
    ///
    /// # Errors
    ///
    /// - `DispatchError::Timeout` if it has not finished within `timeout`
    /// - `DispatchError::UnknownRequest` if the id was never dispatched, was
    ///   already claimed, or was evicted by the retention limit
    pub fn await_completion(
        &self,
        request_id: RequestId,
        timeout: Duration,
    ) -> Result<CompletedTrip, DispatchError> {
        self.completions.wait_for(request_id, timeout)
    }

    /// Claim a finished trip without blocking. `None` while the request is
    /// still travelling or when nothing is tracked for `request_id`.
    #[must_use]
    pub fn try_completion(&self, request_id: RequestId) -> Option<CompletedTrip> {
        self.completions.try_take(request_id)
    }

    /// Async variant of [`Controller::await_completion`]. The condvar wait runs
    /// on tokio's blocking pool.
    ///
    /// # Errors
    ///
    /// Same as [`Controller::await_completion`], plus `DispatchError::Internal`
    /// if the blocking task fails.
    #[cfg(feature = "tokio-runtime")]
    pub async fn await_completion_async(
        &self,
        request_id: RequestId,
        timeout: Duration,
    ) -> Result<CompletedTrip, DispatchError> {
        let completions = Arc::clone(&self.completions);
        tokio::task::spawn_blocking(move || completions.wait_for(request_id, timeout))
            .await
            .map_err(|e| DispatchError::Internal(format!("completion wait failed: {e}")))?
    }

    /// Block until every car has serviced all accepted requests.
    ///
    /// Returns `false` if the fleet did not settle within `timeout`.
    #[must_use]
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.cars
            .iter()
            .all(|car| car.wait_idle(deadline.saturating_duration_since(Instant::now())))
    }

    /// Requests whose completion is still tracked (pending or unclaimed).
    #[must_use]
    pub fn tracked_requests(&self) -> usize {
        self.completions.len()
    }

    /// Current fleet statistics.
    #[must_use]
    pub fn stats(&self) -> FleetStats {
        let mut stats = self.counters.snapshot();
        stats.car_count = self.cars.len();
        stats.total_capacity = self.config.total_capacity();
        for status in self.fleet_status() {
            stats.queued_requests += status.queue_length;
            if status.state == CarState::Moving {
                stats.moving_cars += 1;
            }
        }
        stats
    }

    /// Whether [`Controller::shutdown`] has been called.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Stop accepting pickups, let every car finish its queue, and join the
    /// workers. Workers still busy after a short timeout are detached.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }

        info!("shutting down elevator fleet");
        self.cars.iter().for_each(Car::close);

        let mut workers = self.workers.lock();
        let worker_count = workers.len();
        for (car_id, worker) in workers.drain(..).enumerate() {
            let (tx, rx) = crossbeam_channel::bounded(1);
            let join_thread = std::thread::spawn(move || {
                let _ = tx.send(worker.join().is_ok());
            });

            match rx.recv_timeout(WORKER_JOIN_TIMEOUT) {
                Ok(true) => debug!(car_id, "car worker joined"),
                Ok(false) => warn!(car_id, "car worker panicked"),
                Err(_) => {
                    warn!(car_id, "car worker still draining its queue, detaching");
                    continue;
                }
            }
            let _ = join_thread.join();
        }

        info!(worker_count, "elevator fleet shut down");
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        // Close queues but do not join; workers finish their queues and exit.
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            self.cars.iter().for_each(Car::close);
            debug!("controller dropped without explicit shutdown, workers detached");
        }
    }
}
