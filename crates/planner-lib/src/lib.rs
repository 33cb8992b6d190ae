//! Capacity planning library for an MQTT / metrics-agent / time-series stack
//!
//! This crate provides the core functionality for:
//! - Measuring the compact size of a sample payload
//! - Deriving throughput, storage and utilization figures from sensor load
//! - Recommending batch, buffer and jitter settings for the metrics agent
//! - Debounced recalculation when a payload sample changes on disk

pub mod capacity;
pub mod error;
pub mod models;
pub mod observability;
pub mod payload;
pub mod recommendation;
pub mod report;
pub mod utilization;
pub mod watch;

pub use capacity::{compute_metrics, CapacityLimits, CapacityModel};
pub use error::{ParameterError, Result};
pub use models::*;
pub use observability::CalculationLogger;
pub use payload::{compact_payload, measure_payload_bytes, DEFAULT_PAYLOAD_SAMPLE};
pub use recommendation::AgentRecommendation;
pub use report::CalculationReport;
pub use utilization::{display_percent, Resource, Utilization, UtilizationLevel};
