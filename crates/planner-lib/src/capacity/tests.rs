//! Capacity model tests
//!
//! Covers the worked scenarios, the recommendation floors and the
//! monotonicity and purity properties of the model.

use super::*;
use crate::payload::measure_payload_bytes;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * b.abs().max(1.0)
}

#[test]
fn test_scenario_small_fleet() {
    let payload = measure_payload_bytes(r#"{"a":1}"#);
    assert_eq!(payload, 7);

    let m = compute_metrics(10, 100.0, 1.0, payload);

    assert_eq!(m.messages_per_second, 1000.0);
    assert_eq!(m.total_message_bytes, 67);
    assert_eq!(m.bytes_per_second, 67_000.0);
    assert!(approx(m.kilobytes_per_second, 65.4296875));
    assert_eq!(m.recommended_batch_size, 1200);
    assert_eq!(m.recommended_buffer_limit, 3_600_000);
    assert!(approx(m.recommended_jitter_seconds, 0.1));
    assert_eq!(m.disk_writes_per_second, 1.0);

    assert!(approx(m.bytes_per_day_estimate, 67_000.0 * 86_400.0 * 0.2));
    assert!(approx(
        m.gigabytes_per_month_estimate,
        67_000.0 * 86_400.0 * 0.2 * 30.0 / 1_073_741_824.0
    ));
    assert!(approx(
        m.ram_buffer_megabytes,
        3_600_000.0 * 67.0 * 2.0 / 1_048_576.0
    ));

    assert!(approx(m.wifi_utilization_pct, 65.4296875 / 2000.0 * 100.0));
    assert!(approx(m.packet_rate_utilization_pct, 20.0));
    assert!(approx(m.cpu_utilization_pct, 20.0));
    assert!(approx(m.disk_utilization_pct, 10.0));
}

#[test]
fn test_scenario_idle_sensor_malformed_payload() {
    let payload = measure_payload_bytes("{\"a\": 1,}");
    assert_eq!(payload, 0);

    let m = compute_metrics(1, 0.1, 5.0, payload);

    assert!(approx(m.messages_per_second, 0.1));
    assert_eq!(m.total_message_bytes, 60);
    assert_eq!(m.recommended_batch_size, 1000);
    assert_eq!(m.recommended_buffer_limit, 10_000);
    assert!(approx(m.recommended_jitter_seconds, 0.5));
    assert!(approx(m.disk_writes_per_second, 0.2));
}

#[test]
fn test_zero_latency_hits_floor() {
    let m = compute_metrics(1, 1.0, 0.0, 0);
    assert_eq!(m.disk_writes_per_second, 100.0);
    assert!(m.disk_writes_per_second.is_finite());
    assert_eq!(m.recommended_batch_size, MIN_BATCH_SIZE);
    assert_eq!(m.recommended_jitter_seconds, 0.0);
}

#[test]
fn test_disk_writes_are_inverse_latency() {
    for latency in [0.01, 0.1, 0.25, 1.0, 7.5, 60.0] {
        let m = compute_metrics(3, 2.0, latency, 10);
        assert_eq!(m.disk_writes_per_second, 1.0 / latency);
    }
}

#[test]
fn test_floors_always_enforced() {
    for sensors in [1, 2, 50, 1000, 100_000] {
        for hz in [0.1, 1.0, 33.3, 10_000.0] {
            for latency in [0.1, 1.0, 60.0] {
                let m = compute_metrics(sensors, hz, latency, 128);
                assert!(m.recommended_batch_size >= MIN_BATCH_SIZE);
                assert!(m.recommended_buffer_limit >= MIN_BUFFER_LIMIT);
            }
        }
    }
}

#[test]
fn test_batch_scales_above_floor() {
    // 5000 msg/s * 2 s * 1.2
    let m = compute_metrics(50, 100.0, 2.0, 0);
    assert_eq!(m.recommended_batch_size, 12_000);
}

#[test]
fn test_monotonic_in_sensor_count() {
    let mut previous = compute_metrics(1, 5.0, 1.0, 100);
    for sensors in [2, 5, 10, 100, 1000, 100_000] {
        let current = compute_metrics(sensors, 5.0, 1.0, 100);
        assert_non_decreasing(&previous, &current);
        previous = current;
    }
}

#[test]
fn test_monotonic_in_frequency() {
    let mut previous = compute_metrics(20, 0.1, 1.0, 100);
    for hz in [0.5, 1.0, 10.0, 250.0, 10_000.0] {
        let current = compute_metrics(20, hz, 1.0, 100);
        assert_non_decreasing(&previous, &current);
        previous = current;
    }
}

fn assert_non_decreasing(before: &CapacityMetrics, after: &CapacityMetrics) {
    assert!(after.messages_per_second >= before.messages_per_second);
    assert!(after.kilobytes_per_second >= before.kilobytes_per_second);
    assert!(after.cpu_utilization_pct >= before.cpu_utilization_pct);
    assert!(after.packet_rate_utilization_pct >= before.packet_rate_utilization_pct);
    assert!(after.wifi_utilization_pct >= before.wifi_utilization_pct);
    assert!(after.recommended_buffer_limit >= before.recommended_buffer_limit);
}

#[test]
fn test_repeated_calls_identical() {
    let model = CapacityModel::new();
    let params = SystemParameters::unchecked(37, 12.5, 0.75, 211);
    let first = model.compute(&params);
    for _ in 0..100 {
        assert_eq!(model.compute(&params), first);
    }
    assert_eq!(compute_metrics(37, 12.5, 0.75, 211), first);
}

#[test]
fn test_utilization_not_capped() {
    let m = compute_metrics(100_000, 10_000.0, 0.1, 1000);
    assert!(m.cpu_utilization_pct > 100.0);
    assert!(m.packet_rate_utilization_pct > 100.0);
    assert!(m.wifi_utilization_pct > 100.0);
}

#[test]
fn test_custom_limits() {
    let limits = CapacityLimits {
        wifi_limit_kb: 1000.0,
        pps_limit: 2000.0,
        cpu_limit: 500.0,
        iops_limit: 1.0,
    };
    let model = CapacityModel::with_limits(limits);
    let m = model.compute(&SystemParameters::unchecked(10, 100.0, 1.0, 7));

    assert!(approx(m.packet_rate_utilization_pct, 50.0));
    assert!(approx(m.cpu_utilization_pct, 200.0));
    assert!(approx(m.disk_utilization_pct, 100.0));
    assert!(approx(m.wifi_utilization_pct, 65.4296875 / 1000.0 * 100.0));

    // Ceilings never change the derived rates or recommendations
    let baseline = compute_metrics(10, 100.0, 1.0, 7);
    assert_eq!(m.messages_per_second, baseline.messages_per_second);
    assert_eq!(m.recommended_batch_size, baseline.recommended_batch_size);
    assert_eq!(m.recommended_buffer_limit, baseline.recommended_buffer_limit);
}

#[test]
fn test_default_limits_match_constants() {
    let limits = CapacityLimits::default();
    assert_eq!(limits.wifi_limit_kb, WIFI_LIMIT_KB);
    assert_eq!(limits.pps_limit, PPS_LIMIT);
    assert_eq!(limits.cpu_limit, CPU_LIMIT);
    assert_eq!(limits.iops_limit, IOPS_LIMIT);
}
