//! Capacity calculation commands

use anyhow::Result;
use colored::Colorize;
use planner_lib::{
    AgentRecommendation, CalculationLogger, CalculationReport, CapacityMetrics, CapacityModel,
    SystemParameters, Utilization,
};
use serde::Serialize;
use tabled::Tabled;

use super::{resolve_params, resolve_payload, LoadArgs, MeasuredPayload, PayloadArgs};
use crate::config::PlannerConfig;
use crate::output::{
    color_level, format_bytes, format_rate, gauge, print_heading, print_info, print_subheading,
    print_warning, OutputFormat,
};

/// Row for the throughput table
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Row for the utilization table
#[derive(Tabled)]
struct UtilizationRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "Gauge")]
    gauge: String,
}

/// Full calculation as emitted in JSON mode
#[derive(Serialize)]
struct CalculationOutput<'a> {
    generated_at: String,
    payload_origin: &'a str,
    parameters: &'a SystemParameters,
    metrics: &'a CapacityMetrics,
    utilization: [Utilization; 4],
    recommendation: AgentRecommendation,
    report: CalculationReport,
}

/// Run a calculation and print the full analysis
pub async fn calculate(
    config: &PlannerConfig,
    load: &LoadArgs,
    payload: &PayloadArgs,
    logger: &CalculationLogger,
    format: OutputFormat,
) -> Result<()> {
    let measured = resolve_payload(config, payload).await?;
    logger.log_payload_measured(&measured.origin, measured.bytes);

    let params = resolve_params(config, load, measured.bytes)?;
    let metrics = CapacityModel::with_limits(config.limits).compute(&params);
    logger.log_metrics(&params, &metrics);

    print_analysis(&measured, &params, &metrics, format)
}

/// Print only the recommended `[agent]` section
pub async fn agent_config(
    config: &PlannerConfig,
    load: &LoadArgs,
    payload: &PayloadArgs,
    logger: &CalculationLogger,
    format: OutputFormat,
) -> Result<()> {
    let measured = resolve_payload(config, payload).await?;
    logger.log_payload_measured(&measured.origin, measured.bytes);

    let params = resolve_params(config, load, measured.bytes)?;
    let metrics = CapacityModel::with_limits(config.limits).compute(&params);
    let recommendation = AgentRecommendation::from_metrics(&params, &metrics);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendation)?),
        OutputFormat::Table => print!("{}", recommendation.to_toml()),
    }

    Ok(())
}

/// Render one calculation in the requested format
pub fn print_analysis(
    measured: &MeasuredPayload,
    params: &SystemParameters,
    metrics: &CapacityMetrics,
    format: OutputFormat,
) -> Result<()> {
    let recommendation = AgentRecommendation::from_metrics(params, metrics);
    let report = CalculationReport::new(params, metrics);

    match format {
        OutputFormat::Json => {
            let output = CalculationOutput {
                generated_at: chrono::Utc::now().to_rfc3339(),
                payload_origin: &measured.origin,
                parameters: params,
                metrics,
                utilization: metrics.utilizations(),
                recommendation,
                report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_heading("Capacity Analysis");
            println!("Sensors:                {}", params.sensor_count);
            println!("Frequency:              {} Hz", params.sample_frequency_hz);
            println!("Flush latency:          {} s", params.flush_latency_secs);
            println!(
                "Payload:                {} bytes ({})",
                params.payload_bytes,
                measured.origin.cyan()
            );
            if params.payload_bytes == 0 {
                print_warning("Payload sample is empty or not valid JSON; sized as 0 bytes");
            }
            println!();

            print_subheading("Throughput");
            let rows = vec![
                MetricRow {
                    metric: "Messages",
                    value: format_rate(metrics.messages_per_second, "msg/s"),
                },
                MetricRow {
                    metric: "Message size",
                    value: format!("{} B (incl. overhead)", metrics.total_message_bytes),
                },
                MetricRow {
                    metric: "Bandwidth",
                    value: format_rate(metrics.kilobytes_per_second, "KB/s"),
                },
                MetricRow {
                    metric: "Disk writes",
                    value: format_rate(metrics.disk_writes_per_second, "writes/s"),
                },
                MetricRow {
                    metric: "Stored per day",
                    value: format_bytes(metrics.bytes_per_day_estimate),
                },
                MetricRow {
                    metric: "Stored per month",
                    value: format!("{:.2} GB", metrics.gigabytes_per_month_estimate),
                },
                MetricRow {
                    metric: "RAM buffer",
                    value: format!("{:.2} MB", metrics.ram_buffer_megabytes),
                },
            ];
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!();

            print_subheading("Diagnosis");
            let gauges = metrics.utilizations();
            let rows: Vec<UtilizationRow> = gauges
                .iter()
                .map(|g| UtilizationRow {
                    resource: g.resource.to_string(),
                    load: format!("{:.1}%", g.percent),
                    gauge: color_level(&gauge(g.display), g.level),
                })
                .collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            for g in gauges.iter().filter(|g| g.is_overloaded()) {
                print_warning(&format!(
                    "{} load is {:.0}% of the assumed ceiling",
                    g.resource, g.percent
                ));
            }
            println!();

            print_subheading("Recommended agent settings");
            print!("{}", recommendation.to_toml().green());
            println!();

            print_subheading("Calculation notes");
            for (title, lines) in report.sections() {
                println!("{}", title.bold());
                for line in lines {
                    println!("  {}", line);
                }
            }
            println!();
            print_info("Utilization is measured against assumed WiFi, router, CPU and disk ceilings");
        }
    }

    Ok(())
}
