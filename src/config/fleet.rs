//! Fleet configuration.
//!
//! All knobs are fixed at construction; a running controller never re-reads
//! its configuration.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::serde::{CarId, Floor, FloorBounds};

/// Default per-floor travel time, matching a one second floor-to-floor run.
pub const DEFAULT_TRAVEL_TIME_MS: u64 = 1000;

/// Upper bound on per-floor travel time accepted by [`FleetConfig::validate`].
pub const MAX_TRAVEL_TIME_MS: u64 = 60_000;

/// Default number of finished trips kept for callers that have not claimed them.
pub const DEFAULT_COMPLETION_RETENTION: usize = 1024;

const ENV_NUM_CARS: &str = "ELEVATOR_NUM_CARS";
const ENV_CAPACITY: &str = "ELEVATOR_CAPACITY";
const ENV_MIN_FLOOR: &str = "ELEVATOR_MIN_FLOOR";
const ENV_MAX_FLOOR: &str = "ELEVATOR_MAX_FLOOR";
const ENV_TRAVEL_MS: &str = "ELEVATOR_TRAVEL_MS";

const fn default_travel_time_ms() -> u64 {
    DEFAULT_TRAVEL_TIME_MS
}

const fn default_completion_retention() -> usize {
    DEFAULT_COMPLETION_RETENTION
}

/// Fleet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Number of cars; fixed for the controller's lifetime.
    pub num_cars: usize,
    /// Maximum waiting requests per car.
    pub capacity_per_car: usize,
    /// Serviceable floors.
    pub floor_bounds: FloorBounds,
    /// Simulated time to travel one floor, in milliseconds.
    #[serde(default = "default_travel_time_ms")]
    pub travel_time_ms: u64,
    /// Optional parking floor per car; all cars start at the lowest floor otherwise.
    #[serde(default)]
    pub starting_floors: Option<Vec<Floor>>,
    /// Finished trips kept until claimed, oldest evicted first.
    #[serde(default = "default_completion_retention")]
    pub completion_retention: usize,
    /// Stack size for car worker threads; platform default when unset.
    #[serde(default)]
    pub worker_stack_size: Option<usize>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self::new(3, 5, FloorBounds::default())
    }
}

impl FleetConfig {
    /// Configuration with the given fleet shape and default travel time.
    #[must_use]
    pub const fn new(num_cars: usize, capacity_per_car: usize, floor_bounds: FloorBounds) -> Self {
        Self {
            num_cars,
            capacity_per_car,
            floor_bounds,
            travel_time_ms: DEFAULT_TRAVEL_TIME_MS,
            starting_floors: None,
            completion_retention: DEFAULT_COMPLETION_RETENTION,
            worker_stack_size: None,
        }
    }

    /// Set the simulated per-floor travel time.
    #[must_use]
    pub fn with_travel_time(mut self, travel_time: Duration) -> Self {
        self.travel_time_ms = u64::try_from(travel_time.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Park each car at the given floor; one entry per car.
    #[must_use]
    pub fn with_starting_floors(mut self, floors: Vec<Floor>) -> Self {
        self.starting_floors = Some(floors);
        self
    }

    /// Set how many unclaimed finished trips are retained.
    #[must_use]
    pub fn with_completion_retention(mut self, retention: usize) -> Self {
        self.completion_retention = retention;
        self
    }

    /// Set the worker thread stack size.
    #[must_use]
    pub fn with_worker_stack_size(mut self, bytes: usize) -> Self {
        self.worker_stack_size = Some(bytes);
        self
    }

    /// Per-floor travel time.
    #[must_use]
    pub const fn travel_time(&self) -> Duration {
        Duration::from_millis(self.travel_time_ms)
    }

    /// Floor a car starts at.
    #[must_use]
    pub fn starting_floor(&self, car_id: CarId) -> Floor {
        self.starting_floors
            .as_ref()
            .and_then(|floors| floors.get(car_id).copied())
            .unwrap_or(self.floor_bounds.min)
    }

    /// Total queue capacity of the fleet.
    #[must_use]
    pub const fn total_capacity(&self) -> usize {
        self.num_cars.saturating_mul(self.capacity_per_car)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_cars == 0 {
            return Err("num_cars must be greater than 0".into());
        }
        if self.capacity_per_car == 0 {
            return Err("capacity_per_car must be greater than 0".into());
        }
        if self.floor_bounds.min >= self.floor_bounds.max {
            return Err(format!(
                "floor_bounds min ({}) must be below max ({})",
                self.floor_bounds.min, self.floor_bounds.max
            ));
        }
        if self.travel_time_ms > MAX_TRAVEL_TIME_MS {
            return Err(format!(
                "travel_time_ms ({}) must not exceed {MAX_TRAVEL_TIME_MS}",
                self.travel_time_ms
            ));
        }
        if self.completion_retention == 0 {
            return Err("completion_retention must be greater than 0".into());
        }
        if let Some(floors) = &self.starting_floors {
            if floors.len() != self.num_cars {
                return Err(format!(
                    "starting_floors has {} entries for {} cars",
                    floors.len(),
                    self.num_cars
                ));
            }
            if let Some(bad) = floors.iter().find(|f| !self.floor_bounds.contains(**f)) {
                return Err(format!("starting floor {bad} outside floor_bounds"));
            }
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from environment variables (a `.env` file is loaded
    /// first if present), falling back to [`FleetConfig::default`] per value.
    ///
    /// Reads `ELEVATOR_NUM_CARS`, `ELEVATOR_CAPACITY`, `ELEVATOR_MIN_FLOOR`,
    /// `ELEVATOR_MAX_FLOOR` and `ELEVATOR_TRAVEL_MS`.
    ///
    /// # Errors
    ///
    /// Returns a message if a variable does not parse or validation fails.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();
        let cfg = Self {
            num_cars: env_or(ENV_NUM_CARS, defaults.num_cars)?,
            capacity_per_car: env_or(ENV_CAPACITY, defaults.capacity_per_car)?,
            floor_bounds: FloorBounds::new(
                env_or(ENV_MIN_FLOOR, defaults.floor_bounds.min)?,
                env_or(ENV_MAX_FLOOR, defaults.floor_bounds.max)?,
            ),
            travel_time_ms: env_or(ENV_TRAVEL_MS, defaults.travel_time_ms)?,
            ..defaults
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("{key}={raw:?} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}
