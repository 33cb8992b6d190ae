//! Configuration management for the CLI
//!
//! Defaults come from an optional file and `IOTPLAN_*` environment
//! variables. The loaded value is passed explicitly to each command and is
//! never written back.

use anyhow::{Context, Result};
use planner_lib::CapacityLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Default number of sensors
    #[serde(default = "default_sensors")]
    pub sensors: u32,

    /// Default per-sensor sampling frequency in Hz
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f64,

    /// Default flush latency in seconds
    #[serde(default = "default_latency_secs")]
    pub latency_secs: f64,

    /// Payload sample used when none is given on the command line
    #[serde(default)]
    pub payload_path: Option<PathBuf>,

    /// Hardware and network ceilings
    #[serde(default)]
    pub limits: CapacityLimits,

    /// Quiet period for `watch` in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_sensors() -> u32 {
    10
}

fn default_frequency_hz() -> f64 {
    100.0
}

fn default_latency_secs() -> f64 {
    1.0
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            sensors: default_sensors(),
            frequency_hz: default_frequency_hz(),
            latency_secs: default_latency_secs(),
            payload_path: None,
            limits: CapacityLimits::default(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::config_path() {
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("IOTPLAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the default configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("iotplan").join("config.toml"))
    }
}
