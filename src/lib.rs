//! # Elevator Dispatch
//!
//! A multi-car elevator dispatch system: every car is an independent worker
//! thread draining its own bounded FIFO queue, and a controller assigns each
//! incoming pickup to the nearest car.
//!
//! ## Key Features
//!
//! - **Per-car workers**: one dedicated OS thread per car, blocked on its queue
//!   while idle (no polling)
//! - **Bounded queues**: a full car rejects with `CapacityExceeded`; the
//!   controller retries the next nearest car and only reports `FleetSaturated`
//!   when every car is full
//! - **Nearest-car dispatch**: absolute floor distance, lowest car id on ties
//! - **Lock-free travel**: the simulated per-floor delay never holds a lock, so
//!   status reads and enqueues stay fast while cars move
//! - **Completion tracking**: block or `.await` until a request is serviced
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use elevator_dispatch::config::FleetConfig;
//! use elevator_dispatch::core::Controller;
//! use elevator_dispatch::util::FloorBounds;
//!
//! let controller = Controller::new(
//!     FleetConfig::new(3, 5, FloorBounds::new(1, 20))
//!         .with_travel_time(Duration::from_millis(100)),
//! )?;
//!
//! let id = controller.request_pickup(5, 10)?;
//! let trip = controller.await_completion(id, Duration::from_secs(10))?;
//! assert_eq!(trip.final_floor, 10);
//!
//! controller.shutdown();
//! # Ok::<(), elevator_dispatch::core::DispatchError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Requests, cars, dispatch policy and the controller.
pub mod core;
/// Fleet configuration.
pub mod config;
/// Builders to construct a controller from configuration.
pub mod builders;
/// Serializable API models for outer layers.
pub mod runtime;
/// Shared utilities.
pub mod util;
