//! Fleet core: requests, cars, dispatch policy and the controller.

pub mod car;
pub mod completion;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod request;
pub mod stats;

pub use car::{Car, CarParams, CarState, CarStatus, CarWorker};
pub use completion::CompletedTrip;
pub use controller::Controller;
pub use dispatch::rank_by_distance;
pub use error::{AppResult, DispatchError};
pub use events::{build_car_event, CarEvent, CarEventKind, EventSink, InMemoryEventSink};
pub use request::{validate_floors, Request};
pub use stats::FleetStats;
