//! CSV ingestion of resource utilization records
//!
//! Parses tabular input into validated `ResourceRecord`s. Expected header:
//!
//! ```text
//! id,cpu_utilization,memory_utilization,monthly_cost,status
//! ```
//!
//! Utilization fields accept either bare numbers (`12.5`) or percent
//! strings (`12.5%`). Status values are lowercased so the classifier's
//! `idle` comparison is case-insensitive at the source. Field-domain
//! validation happens here, not in the classifier.

use std::io::Read;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::models::ResourceRecord;

/// Ingestion failure, positioned at the offending CSV row where possible
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to parse CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: monthly_cost must be non-negative (got {value})")]
    NegativeCost { row: u64, value: f64 },
}

/// Raw CSV row before validation
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: String,
    #[serde(deserialize_with = "percentage")]
    cpu_utilization: f64,
    #[serde(deserialize_with = "percentage")]
    memory_utilization: f64,
    monthly_cost: f64,
    status: String,
}

/// Parse a percentage that may carry a trailing `%`
fn percentage<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("invalid percentage value `{raw}`")))
}

/// Read and validate records from CSV input
///
/// An input with a header but no data rows yields an empty vec, which is
/// a valid degenerate dataset.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ResourceRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        // Header is row 1; first data row is row 2
        let row = index as u64 + 2;

        if raw.monthly_cost < 0.0 {
            return Err(IngestError::NegativeCost {
                row,
                value: raw.monthly_cost,
            });
        }

        records.push(ResourceRecord {
            id: raw.id,
            cpu_utilization: raw.cpu_utilization,
            memory_utilization: raw.memory_utilization,
            monthly_cost: raw.monthly_cost,
            status: raw.status.to_ascii_lowercase(),
        });
    }

    Ok(records)
}

/// Convenience wrapper for in-memory upload payloads
pub fn read_records_from_bytes(bytes: &[u8]) -> Result<Vec<ResourceRecord>, IngestError> {
    read_records(bytes)
}
