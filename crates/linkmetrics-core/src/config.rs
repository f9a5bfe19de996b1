//! Aggregator configuration
//!
//! Event-log capacities are deployment parameters, not hard-coded
//! constants. Each discrete-event kind gets its own bound so a noisy wake
//! path cannot squeeze out pairing or scan history.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default capacity for each discrete-event log.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 50;

fn default_log_capacity() -> usize {
    DEFAULT_EVENT_LOG_CAPACITY
}

/// Capacities for the aggregator's bounded event logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Maximum retained pairing events
    #[serde(default = "default_log_capacity")]
    pub pair_log_capacity: usize,
    /// Maximum retained radio wake events
    #[serde(default = "default_log_capacity")]
    pub wake_log_capacity: usize,
    /// Maximum retained scan events
    #[serde(default = "default_log_capacity")]
    pub scan_log_capacity: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            pair_log_capacity: default_log_capacity(),
            wake_log_capacity: default_log_capacity(),
            scan_log_capacity: default_log_capacity(),
        }
    }
}

/// Errors produced when validating an [`AggregatorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{log} log capacity must be at least 1")]
    ZeroCapacity { log: &'static str },
}

impl AggregatorConfig {
    /// Check that every log can hold at least one event.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_log_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { log: "pair" });
        }
        if self.wake_log_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { log: "wake" });
        }
        if self.scan_log_capacity == 0 {
            return Err(ConfigError::ZeroCapacity { log: "scan" });
        }
        Ok(())
    }
}
