//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
#[allow(dead_code)]
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format a currency amount
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a utilization percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Color a waste category for terminal output
pub fn format_category(category: &str) -> String {
    match category {
        "idle" => category.red().bold().to_string(),
        "extreme_underutilization" => category.red().to_string(),
        "underutilized" => category.yellow().to_string(),
        "high_cost_anomaly" => category.magenta().to_string(),
        _ => category.dimmed().to_string(),
    }
}
