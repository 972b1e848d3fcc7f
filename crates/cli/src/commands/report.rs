//! Report command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, ReportResponse};
use crate::output::{format_currency, OutputFormat};

pub async fn run(client: &ApiClient, mock: bool, format: OutputFormat) -> Result<()> {
    let path = if mock {
        "api/v1/report?mock=true"
    } else {
        "api/v1/report"
    };
    let result: ReportResponse = client.post(path).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            println!("{}", "Cost Savings Report".bold());
            println!("{}", "=".repeat(50));
            println!("{}", result.narrative);
            println!();
            println!(
                "{} {}",
                "Estimated monthly savings:".bold(),
                format_currency(result.summary.estimated_monthly_waste)
                    .green()
                    .bold()
            );
        }
    }

    Ok(())
}
