//! CLI integration tests

use serde_json::Value;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Write a config file so tests never read the user's own configuration
fn config_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("Failed to write config");
    path
}

fn iotplan(config: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iotplan"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn json_stdout(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_iotplan"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("calc"), "Should show calc command");
    assert!(stdout.contains("size"), "Should show size command");
    assert!(stdout.contains("agent-config"), "Should show agent-config command");
    assert!(stdout.contains("watch"), "Should show watch command");
    assert!(stdout.contains("--format"), "Should show format option");
}

/// Test calc subcommand help
#[test]
fn test_calc_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_iotplan"))
        .args(["calc", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Calc help should succeed");
    assert!(stdout.contains("--sensors"));
    assert!(stdout.contains("--frequency"));
    assert!(stdout.contains("--latency"));
    assert!(stdout.contains("--payload-text"));
}

#[test]
fn test_calc_json_small_fleet() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");

    let output = iotplan(
        &config,
        &[
            "--format",
            "json",
            "calc",
            "-n",
            "10",
            "-q",
            "100",
            "-l",
            "1",
            "--payload-text",
            "{\"a\": 1}",
        ],
    );
    assert!(output.status.success(), "calc should succeed");

    let json = json_stdout(&output);
    let metrics = &json["metrics"];
    assert_eq!(json["parameters"]["payload_bytes"], 7);
    assert_eq!(metrics["messages_per_second"], 1000.0);
    assert_eq!(metrics["total_message_bytes"], 67);
    assert_eq!(metrics["recommended_batch_size"], 1200);
    assert_eq!(metrics["recommended_buffer_limit"], 3_600_000);
    assert_eq!(metrics["disk_writes_per_second"], 1.0);
    assert_eq!(json["recommendation"]["metric_batch_size"], 1200);
    assert_eq!(json["utilization"].as_array().unwrap().len(), 4);
}

#[test]
fn test_calc_malformed_payload_is_zero() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");

    let output = iotplan(
        &config,
        &[
            "--format",
            "json",
            "calc",
            "-n",
            "1",
            "-q",
            "0.1",
            "-l",
            "5",
            "--payload-text",
            "{\"a\": 1,",
        ],
    );
    assert!(output.status.success(), "malformed payload should not fail");

    let json = json_stdout(&output);
    assert_eq!(json["metrics"]["payload_bytes"], 0);
    assert_eq!(json["metrics"]["total_message_bytes"], 60);
    assert_eq!(json["metrics"]["recommended_batch_size"], 1000);
    assert_eq!(json["metrics"]["recommended_buffer_limit"], 10_000);
}

#[test]
fn test_calc_table_output() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");

    let output = iotplan(&config, &["calc", "--payload-text", "{\"a\":1}"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Capacity Analysis"));
    assert!(stdout.contains("[agent]"));
    assert!(stdout.contains("metric_batch_size = 1200"));
}

#[test]
fn test_config_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    let payload = dir.path().join("sample.json");
    std::fs::write(&payload, "{ \"a\": 1 }").unwrap();
    let config = config_file(
        &dir,
        &format!(
            "sensors = 20\nlatency_secs = 2.0\npayload_path = {:?}\n",
            payload.display().to_string()
        ),
    );

    let output = iotplan(&config, &["--format", "json", "calc"]);
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["parameters"]["sensor_count"], 20);
    assert_eq!(json["parameters"]["flush_latency_secs"], 2.0);
    assert_eq!(json["parameters"]["payload_bytes"], 7);
    // 2000 msg/s * 2 s * 1.2
    assert_eq!(json["metrics"]["recommended_batch_size"], 4800);
}

#[test]
fn test_agent_config_section() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");

    let output = iotplan(
        &config,
        &["agent-config", "-n", "10", "-q", "100", "-l", "1", "--payload-text", "{\"a\":1}"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with("[agent]"));
    assert!(stdout.contains("interval = \"1s\""));
    assert!(stdout.contains("metric_buffer_limit = 3600000"));
    assert!(stdout.contains("flush_jitter = \"0.1s\""));
}

#[test]
fn test_size_file() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");
    let sample = dir.path().join("sample.json");
    std::fs::write(&sample, "{\n  \"b\": [1, 2],\n  \"a\": \"x\"\n}").unwrap();

    let output = iotplan(
        &config,
        &["--format", "json", "size", sample.to_str().unwrap()],
    );
    assert!(output.status.success());

    let json = json_stdout(&output);
    assert_eq!(json["payload_bytes"], 19);
}

/// Test out-of-range inputs are rejected before calculating
#[test]
fn test_out_of_range_inputs() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");

    for args in [
        &["calc", "-n", "0"][..],
        &["calc", "-q", "0"][..],
        &["calc", "-l", "0.05"][..],
        &["calc", "-l", "61"][..],
    ] {
        let output = iotplan(&config, args);
        assert!(!output.status.success(), "{:?} should fail", args);
    }
}

/// Test conflicting payload sources
#[test]
fn test_payload_sources_conflict() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir, "");

    let output = iotplan(
        &config,
        &["calc", "--payload", "a.json", "--payload-text", "{}"],
    );
    assert!(!output.status.success());
}

/// Test missing explicit config file
#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let output = iotplan(&dir.path().join("absent.toml"), &["calc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration"), "Should mention configuration");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_iotplan"))
        .arg("invalid-command")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");
}
