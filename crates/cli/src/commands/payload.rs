//! Payload sizing command

use anyhow::{Context, Result};
use planner_lib::{CalculationLogger, PayloadSample};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

use crate::output::{format_bytes, print_warning, OutputFormat};

#[derive(Serialize)]
struct SizeOutput {
    origin: String,
    payload_bytes: u64,
    compact: Option<String>,
}

/// Measure a payload sample from a file, or stdin when no file is given
pub async fn size(file: Option<&Path>, logger: &CalculationLogger, format: OutputFormat) -> Result<()> {
    let (origin, text) = match file {
        Some(path) => (
            path.display().to_string(),
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read payload sample {}", path.display()))?,
        ),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read payload sample from stdin")?;
            ("stdin".to_string(), text)
        }
    };

    let sample = PayloadSample::new(text);
    let payload_bytes = sample.measure();
    logger.log_payload_measured(&origin, payload_bytes);

    match format {
        OutputFormat::Json => {
            let output = SizeOutput {
                origin,
                payload_bytes,
                compact: sample.compact(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => match sample.compact() {
            Some(compact) => {
                println!("{} bytes ({})", payload_bytes, format_bytes(payload_bytes as f64));
                println!("{}", compact);
            }
            None => {
                println!("0 bytes");
                print_warning("Sample is not valid JSON");
            }
        },
    }

    Ok(())
}
