//! Records command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, ClassifiedRecord};
use crate::output::{format_category, format_currency, format_percent, OutputFormat};

use super::print_records_table;

pub async fn run(client: &ApiClient, id: Option<String>, format: OutputFormat) -> Result<()> {
    match id {
        Some(id) => {
            let record: ClassifiedRecord = client.get(&format!("api/v1/records/{id}")).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                OutputFormat::Table => print_record_detail(&record),
            }
        }
        None => {
            let records: Vec<ClassifiedRecord> = client.get("api/v1/records").await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Table => print_records_table(&records),
            }
        }
    }

    Ok(())
}

fn print_record_detail(record: &ClassifiedRecord) {
    println!("{}", record.id.bold());
    println!("{}", "-".repeat(50));
    println!("Status:                   {}", record.status);
    println!(
        "CPU utilization:          {}",
        format_percent(record.cpu_utilization)
    );
    println!(
        "Memory utilization:       {}",
        format_percent(record.memory_utilization)
    );
    println!(
        "Monthly cost:             {}",
        format_currency(record.monthly_cost)
    );
    println!(
        "Waste category:           {}",
        format_category(&record.waste_category)
    );
    println!(
        "Estimated monthly waste:  {}",
        format_currency(record.estimated_monthly_waste)
    );
    if let Some(rank) = record.priority_rank {
        println!("Priority rank:            {}", rank);
    }
}
