//! API surface for an outer building simulation or dashboard layer.

pub mod api;

pub use api::{
    fleet_snapshot, health, submit_pickup, FleetSnapshot, Health, PickupReceipt, PickupSubmission,
};
