//! Recommended `[agent]` settings for the metrics agent
//!
//! MQTT input is push based, so the collection interval is aligned with the
//! flush interval rather than used for polling.

use serde::Serialize;
use std::fmt;

use crate::models::{CapacityMetrics, SystemParameters};

/// Agent section derived from a capacity calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentRecommendation {
    pub interval_secs: f64,
    pub round_interval: bool,
    pub metric_batch_size: u64,
    pub metric_buffer_limit: u64,
    pub collection_jitter_secs: f64,
    pub flush_interval_secs: f64,
    pub flush_jitter_secs: f64,
}

impl AgentRecommendation {
    pub fn from_metrics(params: &SystemParameters, metrics: &CapacityMetrics) -> Self {
        Self {
            interval_secs: params.flush_latency_secs,
            round_interval: true,
            metric_batch_size: metrics.recommended_batch_size,
            metric_buffer_limit: metrics.recommended_buffer_limit,
            collection_jitter_secs: 0.0,
            flush_interval_secs: params.flush_latency_secs,
            flush_jitter_secs: metrics.recommended_jitter_seconds,
        }
    }

    /// Render as an `[agent]` TOML section
    pub fn to_toml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AgentRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[agent]")?;
        writeln!(f, "  interval = \"{}\"", duration(self.interval_secs))?;
        writeln!(f, "  round_interval = {}", self.round_interval)?;
        writeln!(f, "  metric_batch_size = {}", self.metric_batch_size)?;
        writeln!(f, "  metric_buffer_limit = {}", self.metric_buffer_limit)?;
        writeln!(
            f,
            "  collection_jitter = \"{}\"",
            duration(self.collection_jitter_secs)
        )?;
        writeln!(f, "  flush_interval = \"{}\"", duration(self.flush_interval_secs))?;
        writeln!(f, "  flush_jitter = \"{:.1}s\"", self.flush_jitter_secs)
    }
}

/// Shortest decimal form, e.g. `1s`, `0.25s`
fn duration(secs: f64) -> String {
    format!("{}s", secs)
}
