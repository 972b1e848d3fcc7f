//! CLI command implementations

pub mod analyze;
pub mod health;
pub mod records;
pub mod report;
pub mod upload;

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::client::{ClassifiedRecord, WasteSummary};
use crate::output::{format_category, format_currency, format_percent};

/// Row for record tables
#[derive(Tabled)]
pub(crate) struct RecordRow {
    #[tabled(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Resource")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Monthly Cost")]
    cost: String,
    #[tabled(rename = "Est. Waste")]
    waste: String,
}

impl From<&ClassifiedRecord> for RecordRow {
    fn from(record: &ClassifiedRecord) -> Self {
        Self {
            rank: record
                .priority_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            id: record.id.clone(),
            category: format_category(&record.waste_category),
            cpu: format_percent(record.cpu_utilization),
            memory: format_percent(record.memory_utilization),
            cost: format_currency(record.monthly_cost),
            waste: format_currency(record.estimated_monthly_waste),
        }
    }
}

/// Print a table of classified records
pub(crate) fn print_records_table(records: &[ClassifiedRecord]) {
    if records.is_empty() {
        println!("{}", "No records found".yellow());
        return;
    }
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print the headline summary numbers
pub(crate) fn print_summary(summary: &WasteSummary) {
    println!("{}", "Waste Summary".bold());
    println!("{}", "=".repeat(50));
    println!("Resources analyzed:       {}", summary.total_records);
    println!("Waste-flagged:            {}", summary.waste_count);
    println!(
        "Average monthly cost:     {}",
        format_currency(summary.average_cost)
    );
    println!(
        "Total monthly cost:       {}",
        format_currency(summary.total_monthly_cost)
    );
    println!(
        "{} {}",
        "Estimated monthly waste:".bold(),
        format_currency(summary.estimated_monthly_waste)
            .green()
            .bold()
    );
}
