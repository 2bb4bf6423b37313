//! Builder wiring optional observers into a [`Controller`].

use std::sync::Arc;

use crate::config::FleetConfig;
use crate::core::{Controller, DispatchError, EventSink};

/// Builds a [`Controller`] from a [`FleetConfig`] plus optional attachments.
pub struct ControllerBuilder {
    config: FleetConfig,
    events: Option<Arc<dyn EventSink>>,
}

impl ControllerBuilder {
    /// Start from a fleet configuration.
    #[must_use]
    pub const fn new(config: FleetConfig) -> Self {
        Self {
            config,
            events: None,
        }
    }

    /// Start from environment configuration (see [`FleetConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidConfig` if the environment is invalid.
    pub fn from_env() -> Result<Self, DispatchError> {
        FleetConfig::from_env()
            .map(Self::new)
            .map_err(DispatchError::InvalidConfig)
    }

    /// Send every car event to `sink`.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = Some(sink);
        self
    }

    /// Configuration the controller will be built with.
    #[must_use]
    pub const fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Whether an event sink is attached.
    #[must_use]
    pub const fn has_event_sink(&self) -> bool {
        self.events.is_some()
    }

    /// Validate the configuration and start the fleet.
    ///
    /// # Errors
    ///
    /// Same as [`Controller::new`].
    pub fn build(self) -> Result<Controller, DispatchError> {
        Controller::start(self.config, self.events)
    }
}
