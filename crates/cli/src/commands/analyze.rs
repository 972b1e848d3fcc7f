//! Analyze command

use anyhow::Result;

use crate::client::{AnalysisResponse, ApiClient};
use crate::output::OutputFormat;

use super::{print_records_table, print_summary};

pub async fn run(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result: AnalysisResponse = client.get("api/v1/analyze").await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            print_summary(&result.summary);
            if !result.summary.top_offenders.is_empty() {
                println!();
                println!("Top offenders:");
                print_records_table(&result.summary.top_offenders);
            }
        }
    }

    Ok(())
}
