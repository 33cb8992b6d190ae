//! Core data models for the capacity planner

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result};
use crate::payload;

/// Physical parameters of one calculation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemParameters {
    pub sensor_count: u32,
    pub sample_frequency_hz: f64,
    pub flush_latency_secs: f64,
    pub payload_bytes: u64,
}

impl SystemParameters {
    /// Build parameters, rejecting values outside the model's domain
    pub fn new(
        sensor_count: u32,
        sample_frequency_hz: f64,
        flush_latency_secs: f64,
        payload_bytes: u64,
    ) -> Result<Self> {
        if sensor_count < 1 {
            return Err(ParameterError::SensorCount {
                value: sensor_count,
            });
        }
        if !(sample_frequency_hz.is_finite() && sample_frequency_hz > 0.0) {
            return Err(ParameterError::Frequency {
                value: sample_frequency_hz,
            });
        }
        if !(flush_latency_secs.is_finite() && flush_latency_secs > 0.0) {
            return Err(ParameterError::Latency {
                value: flush_latency_secs,
            });
        }

        Ok(Self::unchecked(
            sensor_count,
            sample_frequency_hz,
            flush_latency_secs,
            payload_bytes,
        ))
    }

    /// Build parameters without domain checks
    pub fn unchecked(
        sensor_count: u32,
        sample_frequency_hz: f64,
        flush_latency_secs: f64,
        payload_bytes: u64,
    ) -> Self {
        Self {
            sensor_count,
            sample_frequency_hz,
            flush_latency_secs,
            payload_bytes,
        }
    }
}

/// Result of one capacity calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityMetrics {
    pub messages_per_second: f64,
    pub payload_bytes: u64,
    /// Payload plus fixed protocol overhead
    pub total_message_bytes: u64,
    pub bytes_per_second: f64,
    pub kilobytes_per_second: f64,
    pub disk_writes_per_second: f64,
    /// Compressed bytes written to the database per day
    pub bytes_per_day_estimate: f64,
    pub gigabytes_per_month_estimate: f64,
    pub ram_buffer_megabytes: f64,
    pub recommended_batch_size: u64,
    pub recommended_buffer_limit: u64,
    pub recommended_jitter_seconds: f64,
    pub wifi_utilization_pct: f64,
    pub packet_rate_utilization_pct: f64,
    pub cpu_utilization_pct: f64,
    pub disk_utilization_pct: f64,
}

/// A structured-data payload sample as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayloadSample {
    pub raw: String,
}

impl PayloadSample {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Compact encoded size in bytes, zero when the sample does not parse
    pub fn measure(&self) -> u64 {
        payload::measure_payload_bytes(&self.raw)
    }

    /// Compact encoding of the sample, if it parses
    pub fn compact(&self) -> Option<String> {
        payload::compact_payload(&self.raw)
    }
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self::unchecked(10, 100.0, 1.0, 0)
    }
}
