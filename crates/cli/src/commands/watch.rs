//! Watch a payload sample and recalculate on every settled edit

use anyhow::{Context, Result};
use colored::Colorize;
use planner_lib::watch::{measure_file, PayloadWatcher};
use planner_lib::{CalculationLogger, CapacityModel};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use super::calculate::print_analysis;
use super::{resolve_params, LoadArgs, MeasuredPayload};
use crate::config::PlannerConfig;
use crate::output::{print_info, OutputFormat};

/// Recalculate whenever the sample file changes, until Ctrl-C
pub async fn watch(
    config: &PlannerConfig,
    load: &LoadArgs,
    payload: Option<PathBuf>,
    debounce_ms: Option<u64>,
    logger: &CalculationLogger,
    format: OutputFormat,
) -> Result<()> {
    let path = payload
        .or_else(|| config.payload_path.clone())
        .context("No payload file given (use --payload or set payload_path in the config)")?;
    let debounce = Duration::from_millis(debounce_ms.unwrap_or(config.debounce_ms));

    // Validate the load once up front so a bad flag fails before watching
    resolve_params(config, load, 0)?;

    let model = CapacityModel::with_limits(config.limits);
    let origin = path.display().to_string();

    let recalculate = |payload_bytes: u64| -> Result<()> {
        logger.log_payload_measured(&origin, payload_bytes);
        let params = resolve_params(config, load, payload_bytes)?;
        let metrics = model.compute(&params);
        logger.log_metrics(&params, &metrics);
        let measured = MeasuredPayload {
            origin: origin.clone(),
            bytes: payload_bytes,
        };
        print_analysis(&measured, &params, &metrics, format)
    };

    recalculate(measure_file(&path).await?)?;

    let (tx, mut rx) = mpsc::channel(16);
    let _handle = PayloadWatcher::new(&path, debounce).start(tx).await?;
    if matches!(format, OutputFormat::Table) {
        print_info(&format!("Watching {} (Ctrl-C to stop)", origin));
    }

    loop {
        tokio::select! {
            maybe_update = rx.recv() => match maybe_update {
                Some(update) => {
                    if matches!(format, OutputFormat::Table) {
                        println!("{}", "~".repeat(50).dimmed());
                    }
                    recalculate(update.payload_bytes)?;
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping payload watch");
                break;
            }
        }
    }

    Ok(())
}
