//! Health command

use anyhow::Result;
use colored::Colorize;

use crate::client::{ApiClient, HealthResponse};
use crate::output::OutputFormat;

pub async fn run(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: HealthResponse = client.get("healthz").await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            let status = match result.status.as_str() {
                "healthy" => result.status.green().bold(),
                "degraded" => result.status.yellow().bold(),
                _ => result.status.red().bold(),
            };
            println!("Status:          {}", status);
            println!("Records loaded:  {}", result.records_loaded);
        }
    }

    Ok(())
}
