//! Calculation memo
//!
//! Human-readable derivation notes that accompany a capacity calculation.

use serde::Serialize;

use crate::models::{CapacityMetrics, SystemParameters};

const SECONDS_PER_DAY: f64 = 86_400.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Storage and buffering projections plus the reasoning behind each setting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub flush_latency_secs: f64,
    /// Uncompressed megabytes produced per day
    pub raw_megabytes_per_day: f64,
    /// Megabytes per day after storage compression
    pub compressed_megabytes_per_day: f64,
    pub gigabytes_per_month: f64,
    pub ram_buffer_megabytes: f64,
    pub disk_writes_per_second: f64,
    pub batch_size: u64,
    pub buffer_limit: u64,
}

impl CalculationReport {
    pub fn new(params: &SystemParameters, metrics: &CapacityMetrics) -> Self {
        Self {
            flush_latency_secs: params.flush_latency_secs,
            raw_megabytes_per_day: metrics.bytes_per_second * SECONDS_PER_DAY / MIB,
            compressed_megabytes_per_day: metrics.bytes_per_day_estimate / MIB,
            gigabytes_per_month: metrics.gigabytes_per_month_estimate,
            ram_buffer_megabytes: metrics.ram_buffer_megabytes,
            disk_writes_per_second: metrics.disk_writes_per_second,
            batch_size: metrics.recommended_batch_size,
            buffer_limit: metrics.recommended_buffer_limit,
        }
    }

    /// Memo sections as (title, body lines)
    pub fn sections(&self) -> Vec<(String, Vec<String>)> {
        let l = self.flush_latency_secs;
        vec![
            (
                format!("1. Why interval = {}s", l),
                vec![
                    "MQTT data arrives by push, not by polling.".to_string(),
                    format!("interval is matched to flush_interval ({}s) to:", l),
                    "  - keep the agent's clock cycle in step with writes".to_string(),
                    "  - avoid needless CPU wake-ups".to_string(),
                    "  - align internal stats collection with flushing".to_string(),
                ],
            ),
            (
                "2. Batch size".to_string(),
                vec![
                    format!("Computed: {} messages", self.batch_size),
                    "(messages per second x latency + 20% margin)".to_string(),
                    "One flush interval's arrivals written in a single request.".to_string(),
                ],
            ),
            (
                "3. Buffer and safety".to_string(),
                vec![
                    format!("Computed: {} messages", self.buffer_limit),
                    "Holds one hour of data in RAM if the database is unreachable.".to_string(),
                ],
            ),
            (
                "4. Disk stress".to_string(),
                vec![
                    format!("Writing every {} seconds.", l),
                    format!("Impact: {:.2} writes/sec", self.disk_writes_per_second),
                ],
            ),
            (
                "5. Storage projections".to_string(),
                vec![
                    format!("Daily data (raw): {:.2} MB", self.raw_megabytes_per_day),
                    format!(
                        "Daily data (compressed): {:.2} MB",
                        self.compressed_megabytes_per_day
                    ),
                    format!("Monthly data (compressed): {:.2} GB", self.gigabytes_per_month),
                    format!("RAM needed (1h buffer x2): {:.2} MB", self.ram_buffer_megabytes),
                ],
            ),
        ]
    }
}
