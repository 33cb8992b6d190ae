//! CLI commands and shared input resolution

pub mod calculate;
pub mod payload;
pub mod watch;

use anyhow::Result;
use clap::Args;
use planner_lib::{measure_payload_bytes, watch::measure_file, SystemParameters, DEFAULT_PAYLOAD_SAMPLE};
use std::path::PathBuf;

use crate::config::PlannerConfig;

/// Load parameters; unset values fall back to configuration
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Number of sensors (1 - 100000)
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..=100_000))]
    pub sensors: Option<u32>,

    /// Sampling frequency per sensor in Hz (0.1 - 10000)
    #[arg(long, short = 'q', value_parser = parse_frequency)]
    pub frequency: Option<f64>,

    /// Flush latency in seconds (0.1 - 60)
    #[arg(long, short = 'l', value_parser = parse_latency)]
    pub latency: Option<f64>,
}

/// Where to take the payload sample from
#[derive(Args, Debug, Clone, Default)]
pub struct PayloadArgs {
    /// JSON file holding one sample message
    #[arg(long, short = 'p', conflicts_with = "payload_text")]
    pub payload: Option<PathBuf>,

    /// Sample message given inline
    #[arg(long)]
    pub payload_text: Option<String>,
}

/// A measured payload and where it came from
#[derive(Debug, Clone)]
pub struct MeasuredPayload {
    pub origin: String,
    pub bytes: u64,
}

fn parse_frequency(s: &str) -> std::result::Result<f64, String> {
    parse_bounded(s, 0.1, 10_000.0, "Hz")
}

fn parse_latency(s: &str) -> std::result::Result<f64, String> {
    parse_bounded(s, 0.1, 60.0, "s")
}

fn parse_bounded(s: &str, min: f64, max: f64, unit: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if !(min..=max).contains(&value) {
        return Err(format!("{} is not in {}{}..={}{}", value, min, unit, max, unit));
    }
    Ok(value)
}

/// Measure the payload named on the command line, the configured sample
/// file, or the built-in sample, in that order
pub async fn resolve_payload(config: &PlannerConfig, args: &PayloadArgs) -> Result<MeasuredPayload> {
    if let Some(text) = &args.payload_text {
        return Ok(MeasuredPayload {
            origin: "inline".to_string(),
            bytes: measure_payload_bytes(text),
        });
    }

    if let Some(path) = args.payload.as_ref().or(config.payload_path.as_ref()) {
        return Ok(MeasuredPayload {
            origin: path.display().to_string(),
            bytes: measure_file(path).await?,
        });
    }

    Ok(MeasuredPayload {
        origin: "built-in sample".to_string(),
        bytes: measure_payload_bytes(DEFAULT_PAYLOAD_SAMPLE),
    })
}

/// Combine command-line values and configuration into validated parameters
pub fn resolve_params(
    config: &PlannerConfig,
    args: &LoadArgs,
    payload_bytes: u64,
) -> Result<SystemParameters> {
    let params = SystemParameters::new(
        args.sensors.unwrap_or(config.sensors),
        args.frequency.unwrap_or(config.frequency_hz),
        args.latency.unwrap_or(config.latency_secs),
        payload_bytes,
    )?;
    Ok(params)
}
