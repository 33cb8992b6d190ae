//! IoT stack capacity planner CLI
//!
//! Sizes an MQTT broker, metrics agent and time-series database deployment
//! from sensor count, sampling frequency, flush latency and a sample payload.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{calculate, payload, watch, LoadArgs, PayloadArgs};
use planner_lib::CalculationLogger;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// IoT stack capacity planner
#[derive(Parser)]
#[command(name = "iotplan")]
#[command(author, version, about = "Capacity planner for an MQTT broker, metrics agent and time-series database", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/iotplan/config.toml)
    #[arg(long, env = "IOTPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute throughput, storage, utilization and agent settings
    Calc {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Measure the compact size of a JSON payload sample
    Size {
        /// Sample file (reads stdin if not specified)
        file: Option<PathBuf>,
    },

    /// Print only the recommended [agent] section
    AgentConfig {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Recalculate each time a payload sample file is edited
    Watch {
        #[command(flatten)]
        load: LoadArgs,

        /// Sample file to watch
        #[arg(long, short = 'p')]
        payload: Option<PathBuf>,

        /// Quiet period after an edit before recalculating, in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = config::PlannerConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    let logger = CalculationLogger::new("cli");

    match cli.command {
        Commands::Calc { load, payload } => {
            calculate::calculate(&config, &load, &payload, &logger, cli.format).await?;
        }
        Commands::Size { file } => {
            payload::size(file.as_deref(), &logger, cli.format).await?;
        }
        Commands::AgentConfig { load, payload } => {
            calculate::agent_config(&config, &load, &payload, &logger, cli.format).await?;
        }
        Commands::Watch {
            load,
            payload,
            debounce_ms,
        } => {
            watch::watch(&config, &load, payload, debounce_ms, &logger, cli.format).await?;
        }
    }

    Ok(())
}
