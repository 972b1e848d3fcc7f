//! Upload command

use std::path::Path;

use anyhow::Result;

use crate::client::{ApiClient, UploadResponse};
use crate::output::{print_success, OutputFormat};

use super::{print_records_table, print_summary};

pub async fn run(client: &ApiClient, file: &Path, format: OutputFormat) -> Result<()> {
    let result: UploadResponse = client.upload_csv("api/v1/upload", file).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            print_success(&result.message);
            println!();
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
