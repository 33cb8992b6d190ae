//! Error types for parameter validation.
//!
//! Sizing and capacity computation are total and never return these; they are
//! raised only when building [`SystemParameters`](crate::SystemParameters) from
//! user input.

use thiserror::Error;

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, ParameterError>;

/// Input outside the domain the capacity model is defined on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Sensor count must be at least 1, got {value}")]
    SensorCount { value: u32 },

    #[error("Sample frequency must be a positive finite number of Hz, got {value}")]
    Frequency { value: f64 },

    #[error("Flush latency must be a positive finite number of seconds, got {value}")]
    Latency { value: f64 },
}
