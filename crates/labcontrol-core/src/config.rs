//! Runtime configuration for the occupancy controller.
//!
//! Every field defaults to the reference deployment values from
//! [`constants`](crate::constants), so an empty JSON object is a valid
//! configuration.
//!
//! # Examples
//!
//! ```
//! use labcontrol_core::config::LabConfig;
//!
//! let config = LabConfig::from_json_str(r#"{ "capacity": 4 }"#).unwrap();
//! assert_eq!(config.capacity.get(), 4);
//! assert_eq!(config.debounce().as_millis(), 300);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AUDIO_QUEUE_DEPTH, DEBOUNCE_MS, DISPLAY_INIT_DELAY_MS, NOTICE_HOLD_MS, POLL_INTERVAL_MS,
};
use crate::types::Capacity;
use crate::{Error, Result};

/// Configuration for a controller instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
    /// Maximum simultaneous occupants.
    pub capacity: Capacity,

    /// Button sampling period in milliseconds.
    pub poll_interval_ms: u64,

    /// Hold after a detected press in milliseconds.
    pub debounce_ms: u64,

    /// How long overlays stay on screen in milliseconds.
    pub notice_hold_ms: u64,

    /// Delay before the first status render in milliseconds.
    pub display_init_delay_ms: u64,

    /// Pending sounds kept before new requests are dropped.
    pub audio_queue_depth: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::DEFAULT,
            poll_interval_ms: POLL_INTERVAL_MS,
            debounce_ms: DEBOUNCE_MS,
            notice_hold_ms: NOTICE_HOLD_MS,
            display_init_delay_ms: DISPLAY_INIT_DELAY_MS,
            audio_queue_depth: AUDIO_QUEUE_DEPTH,
        }
    }
}

impl LabConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, names an unknown field, or
    /// fails [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the timings and queue depth are usable.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the poll interval or audio queue depth is
    /// zero.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.audio_queue_depth == 0 {
            return Err(Error::Config(
                "audio_queue_depth must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notice_hold(&self) -> Duration {
        Duration::from_millis(self.notice_hold_ms)
    }

    pub fn display_init_delay(&self) -> Duration {
        Duration::from_millis(self.display_init_delay_ms)
    }
}
