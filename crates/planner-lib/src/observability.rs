//! Structured logging for planner events

use tracing::{debug, info, warn};

use crate::models::{CapacityMetrics, SystemParameters};

/// Structured logger for calculation events
///
/// Emits events with a stable `event` field so JSON log output can be
/// filtered by kind.
#[derive(Clone)]
pub struct CalculationLogger {
    source: String,
}

impl CalculationLogger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Log a payload measurement
    pub fn log_payload_measured(&self, origin: &str, payload_bytes: u64) {
        if payload_bytes == 0 {
            warn!(
                event = "payload_measured",
                source = %self.source,
                origin = %origin,
                payload_bytes = payload_bytes,
                "Payload sample measured as zero bytes (empty or not valid JSON)"
            );
        } else {
            debug!(
                event = "payload_measured",
                source = %self.source,
                origin = %origin,
                payload_bytes = payload_bytes,
                "Payload sample measured"
            );
        }
    }

    /// Log a completed calculation, warning when a ceiling is exceeded
    pub fn log_metrics(&self, params: &SystemParameters, metrics: &CapacityMetrics) {
        info!(
            event = "metrics_computed",
            source = %self.source,
            sensor_count = params.sensor_count,
            sample_frequency_hz = params.sample_frequency_hz,
            flush_latency_secs = params.flush_latency_secs,
            payload_bytes = params.payload_bytes,
            messages_per_second = metrics.messages_per_second,
            kilobytes_per_second = metrics.kilobytes_per_second,
            batch_size = metrics.recommended_batch_size,
            buffer_limit = metrics.recommended_buffer_limit,
            "Computed capacity metrics"
        );

        for gauge in metrics.utilizations().iter().filter(|g| g.is_overloaded()) {
            warn!(
                event = "overload_detected",
                source = %self.source,
                resource = %gauge.resource,
                percent = gauge.percent,
                "Load exceeds assumed ceiling"
            );
        }
    }
}
