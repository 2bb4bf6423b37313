//! Configuration models for the fleet.

pub mod fleet;

pub use fleet::FleetConfig;
