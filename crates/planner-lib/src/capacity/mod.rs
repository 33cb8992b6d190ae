//! Capacity model
//!
//! Turns sensor count, sampling frequency, flush latency and payload size into
//! throughput, storage and utilization figures plus recommended metrics-agent
//! settings. Every function here is pure: identical inputs give bit-identical
//! outputs.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::models::{CapacityMetrics, SystemParameters};

/// Fixed per-message protocol overhead in bytes
pub const OVERHEAD_BYTES: u64 = 60;

/// Assumed wireless throughput ceiling (KB/s)
pub const WIFI_LIMIT_KB: f64 = 2000.0;

/// Assumed router packet-rate ceiling (packets/s)
pub const PPS_LIMIT: f64 = 5000.0;

/// Assumed agent CPU ceiling (messages/s)
pub const CPU_LIMIT: f64 = 5000.0;

/// Assumed disk write-rate ceiling (writes/s)
pub const IOPS_LIMIT: f64 = 10.0;

/// Storage-engine compression factor applied to raw daily bytes
pub const COMPRESSION_RATIO: f64 = 0.20;

/// Lower bound on flush latency used for the disk write rate
pub const MIN_FLUSH_LATENCY_SECS: f64 = 0.01;

/// Smallest batch size ever recommended
pub const MIN_BATCH_SIZE: u64 = 1000;

/// Smallest buffer limit ever recommended
pub const MIN_BUFFER_LIMIT: u64 = 10_000;

/// Margin over one flush interval's arrivals when sizing a batch
const BATCH_MARGIN: f64 = 1.2;

/// Fraction of the flush latency used as flush jitter
const JITTER_FRACTION: f64 = 0.1;

/// In-flight plus retained copies of buffered messages
const BUFFER_COPIES: f64 = 2.0;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_MONTH: f64 = 30.0;
const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Hardware and network ceilings utilization is measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityLimits {
    pub wifi_limit_kb: f64,
    pub pps_limit: f64,
    pub cpu_limit: f64,
    pub iops_limit: f64,
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self {
            wifi_limit_kb: WIFI_LIMIT_KB,
            pps_limit: PPS_LIMIT,
            cpu_limit: CPU_LIMIT,
            iops_limit: IOPS_LIMIT,
        }
    }
}

/// Capacity model bound to a set of ceilings
#[derive(Debug, Clone, Default)]
pub struct CapacityModel {
    limits: CapacityLimits,
}

impl CapacityModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: CapacityLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &CapacityLimits {
        &self.limits
    }

    /// Derive metrics and recommendations for one set of parameters.
    ///
    /// Utilization percentages are not capped; clamping for display lives in
    /// [`crate::utilization`].
    pub fn compute(&self, params: &SystemParameters) -> CapacityMetrics {
        let latency = params.flush_latency_secs;

        let messages_per_second = params.sensor_count as f64 * params.sample_frequency_hz;
        let total_message_bytes = params.payload_bytes.saturating_add(OVERHEAD_BYTES);
        let message_size = total_message_bytes as f64;

        // Network
        let bytes_per_second = messages_per_second * message_size;
        let kilobytes_per_second = bytes_per_second / KIB;

        // Disk
        let safe_latency = latency.max(MIN_FLUSH_LATENCY_SECS);
        let disk_writes_per_second = 1.0 / safe_latency;

        // Projections
        let bytes_per_day_estimate = bytes_per_second * SECONDS_PER_DAY * COMPRESSION_RATIO;
        let gigabytes_per_month_estimate = bytes_per_day_estimate * DAYS_PER_MONTH / GIB;
        let buffer_one_hour_messages = messages_per_second * SECONDS_PER_HOUR;
        let ram_buffer_megabytes = buffer_one_hour_messages * message_size * BUFFER_COPIES / MIB;

        // Agent settings
        let recommended_batch_size =
            to_count((messages_per_second * latency * BATCH_MARGIN).round()).max(MIN_BATCH_SIZE);
        let recommended_buffer_limit =
            to_count(buffer_one_hour_messages.round()).max(MIN_BUFFER_LIMIT);
        let recommended_jitter_seconds = latency * JITTER_FRACTION;

        CapacityMetrics {
            messages_per_second,
            payload_bytes: params.payload_bytes,
            total_message_bytes,
            bytes_per_second,
            kilobytes_per_second,
            disk_writes_per_second,
            bytes_per_day_estimate,
            gigabytes_per_month_estimate,
            ram_buffer_megabytes,
            recommended_batch_size,
            recommended_buffer_limit,
            recommended_jitter_seconds,
            wifi_utilization_pct: percent_of(kilobytes_per_second, self.limits.wifi_limit_kb),
            packet_rate_utilization_pct: percent_of(messages_per_second, self.limits.pps_limit),
            cpu_utilization_pct: percent_of(messages_per_second, self.limits.cpu_limit),
            disk_utilization_pct: percent_of(disk_writes_per_second, self.limits.iops_limit),
        }
    }
}

/// Compute metrics against the default ceilings
pub fn compute_metrics(
    sensor_count: u32,
    frequency_hz: f64,
    flush_latency_secs: f64,
    payload_bytes: u64,
) -> CapacityMetrics {
    CapacityModel::new().compute(&SystemParameters::unchecked(
        sensor_count,
        frequency_hz,
        flush_latency_secs,
        payload_bytes,
    ))
}

fn percent_of(value: f64, limit: f64) -> f64 {
    value / limit * 100.0
}

/// Saturating float to count conversion; NaN and negatives become zero
fn to_count(value: f64) -> u64 {
    value as u64
}
