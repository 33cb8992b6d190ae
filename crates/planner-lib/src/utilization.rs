//! Utilization grading for display
//!
//! The capacity model reports raw, uncapped percentages. Gauges show them
//! clamped to 100 and graded into three bands.

use serde::Serialize;
use std::fmt;

use crate::models::CapacityMetrics;

/// Display value at or above which a gauge turns to warning
pub const WARNING_THRESHOLD: u8 = 50;

/// Display value at or above which a gauge turns to critical
pub const CRITICAL_THRESHOLD: u8 = 85;

/// Resources utilization is reported for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Wifi,
    PacketRate,
    Cpu,
    Disk,
}

impl Resource {
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Wifi => "WiFi",
            Resource::PacketRate => "Router (PPS)",
            Resource::Cpu => "Agent CPU",
            Resource::Disk => "Disk (IOPS)",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity band of a utilization gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationLevel {
    Good,
    Warning,
    Critical,
}

impl UtilizationLevel {
    pub fn from_display(display: u8) -> Self {
        if display < WARNING_THRESHOLD {
            UtilizationLevel::Good
        } else if display < CRITICAL_THRESHOLD {
            UtilizationLevel::Warning
        } else {
            UtilizationLevel::Critical
        }
    }
}

/// One graded gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Utilization {
    pub resource: Resource,
    /// Raw percentage from the model, may exceed 100
    pub percent: f64,
    /// Percentage truncated and clamped to 0..=100
    pub display: u8,
    pub level: UtilizationLevel,
}

impl Utilization {
    pub fn new(resource: Resource, percent: f64) -> Self {
        let display = display_percent(percent);
        Self {
            resource,
            percent,
            display,
            level: UtilizationLevel::from_display(display),
        }
    }

    pub fn is_overloaded(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Truncate a raw percentage and clamp it to 0..=100
pub fn display_percent(percent: f64) -> u8 {
    if percent.is_nan() || percent <= 0.0 {
        return 0;
    }
    percent.min(100.0) as u8
}

impl CapacityMetrics {
    /// Graded gauges for WiFi, packet rate, CPU and disk, in that order
    pub fn utilizations(&self) -> [Utilization; 4] {
        [
            Utilization::new(Resource::Wifi, self.wifi_utilization_pct),
            Utilization::new(Resource::PacketRate, self.packet_rate_utilization_pct),
            Utilization::new(Resource::Cpu, self.cpu_utilization_pct),
            Utilization::new(Resource::Disk, self.disk_utilization_pct),
        ]
    }
}
