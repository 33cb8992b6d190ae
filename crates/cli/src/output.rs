//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use planner_lib::UtilizationLevel;

/// Width of a utilization gauge in characters
const GAUGE_WIDTH: usize = 20;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "=".repeat(50));
}

/// Print a sub-section heading
pub fn print_subheading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(50));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    if bytes >= GB {
        format!("{:.2}Gi", bytes / GB)
    } else if bytes >= MB {
        format!("{:.2}Mi", bytes / MB)
    } else if bytes >= KB {
        format!("{:.2}Ki", bytes / KB)
    } else {
        format!("{:.0}B", bytes)
    }
}

/// Format a rate with two decimals and a unit
pub fn format_rate(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

/// Color text by utilization level
pub fn color_level(text: &str, level: UtilizationLevel) -> String {
    match level {
        UtilizationLevel::Good => text.green().to_string(),
        UtilizationLevel::Warning => text.yellow().to_string(),
        UtilizationLevel::Critical => text.red().to_string(),
    }
}

/// Render a 0..=100 display value as a fixed-width bar
pub fn gauge(display: u8) -> String {
    let filled = (display as usize * GAUGE_WIDTH + 50) / 100;
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled),
        display
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(67.0), "67B");
        assert_eq!(format_bytes(2048.0), "2.00Ki");
        assert_eq!(format_bytes(3.0 * 1024.0 * 1024.0), "3.00Mi");
    }

    #[test]
    fn test_gauge_width() {
        assert_eq!(gauge(0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(gauge(50).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(gauge(100).chars().filter(|c| *c == '█').count(), 20);
        assert!(gauge(100).ends_with("100%"));
    }
}
