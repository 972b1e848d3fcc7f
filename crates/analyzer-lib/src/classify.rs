//! Rule-based waste classification
//!
//! Classifies each resource record into a waste category using fixed
//! thresholds, estimates the reclaimable share of its monthly cost, and
//! aggregates the run into a `WasteSummary`. Categories are mutually
//! exclusive: a record receives the first category its metrics satisfy.

use std::cmp::Ordering;

use crate::models::{ClassifiedRecord, ResourceRecord, WasteCategory, WasteSummary};
use thiserror::Error;

/// CPU below this is extreme underutilization (termination candidate)
pub const EXTREME_CPU_THRESHOLD: f64 = 5.0;

/// CPU below this, combined with low memory, is underutilization
pub const UNDERUTILIZED_CPU_THRESHOLD: f64 = 20.0;

/// Memory below this, combined with low CPU, is underutilization
pub const UNDERUTILIZED_MEM_THRESHOLD: f64 = 20.0;

/// Cost above this multiple of the run average is a high-cost anomaly
pub const HIGH_COST_MULTIPLIER: f64 = 2.0;

/// Idle resources are fully eliminable
pub const IDLE_WASTE_FRACTION: f64 = 1.0;

/// Extreme underutilization: 20% retained for a minimal-tier replacement
pub const EXTREME_WASTE_FRACTION: f64 = 0.8;

/// Underutilization: right-sizing recovers roughly a third of the cost
pub const UNDERUTILIZED_WASTE_FRACTION: f64 = 0.3;

/// Status literal that marks a resource idle
pub const IDLE_STATUS: &str = "idle";

/// Default bound on the top-offenders list
pub const DEFAULT_TOP_OFFENDERS: usize = 5;

/// Classification failure
///
/// Field-domain validation belongs to the ingestor; the classifier only
/// rejects values its own arithmetic cannot order (NaN, infinities),
/// which would otherwise fall through every threshold silently.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("record `{id}`: field `{field}` is not a finite number")]
    InvalidField { id: String, field: &'static str },
}

/// Full output of one analysis run
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Analysis {
    /// Every input record, annotated, in input order
    pub records: Vec<ClassifiedRecord>,
    pub summary: WasteSummary,
}

impl Analysis {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            summary: WasteSummary::empty(),
        }
    }

    /// Waste-flagged records ordered by priority rank
    pub fn flagged(&self) -> Vec<&ClassifiedRecord> {
        let mut flagged: Vec<&ClassifiedRecord> = self
            .records
            .iter()
            .filter(|c| c.waste_category.is_flagged())
            .collect();
        flagged.sort_by_key(|c| c.priority_rank.unwrap_or(u32::MAX));
        flagged
    }
}

/// Classify a set of resource records
///
/// The run average is computed once over the full set before any record
/// is classified, since the high-cost-anomaly threshold depends on it.
/// Empty input short-circuits to an all-zero summary. The input is never
/// mutated; annotated copies are returned in input order.
pub fn classify(records: &[ResourceRecord], top_n: usize) -> Result<Analysis, ClassifyError> {
    if records.is_empty() {
        return Ok(Analysis::empty());
    }

    for record in records {
        check_finite(record)?;
    }

    let total_monthly_cost: f64 = records.iter().map(|r| r.monthly_cost).sum();
    let average_cost = total_monthly_cost / records.len() as f64;

    let mut classified: Vec<ClassifiedRecord> = records
        .iter()
        .map(|r| classify_record(r, average_cost))
        .collect();

    // Rank flagged records by estimated waste descending. Ties keep
    // input order (stable sort).
    let mut flagged: Vec<usize> = (0..classified.len())
        .filter(|&i| classified[i].waste_category.is_flagged())
        .collect();
    flagged.sort_by(|&a, &b| {
        classified[b]
            .estimated_monthly_waste
            .partial_cmp(&classified[a].estimated_monthly_waste)
            .unwrap_or(Ordering::Equal)
    });
    for (rank, &i) in flagged.iter().enumerate() {
        classified[i].priority_rank = Some(rank as u32 + 1);
    }

    let estimated_monthly_waste: f64 = classified
        .iter()
        .map(|c| c.estimated_monthly_waste)
        .sum();

    let top_offenders: Vec<ClassifiedRecord> = flagged
        .iter()
        .filter(|&&i| classified[i].estimated_monthly_waste > 0.0)
        .take(top_n)
        .map(|&i| classified[i].clone())
        .collect();

    let summary = WasteSummary {
        total_records: records.len(),
        waste_count: flagged.len(),
        average_cost,
        total_monthly_cost,
        estimated_monthly_waste,
        top_offenders,
    };

    Ok(Analysis {
        records: classified,
        summary,
    })
}

/// Classify a single record against the precomputed run average
///
/// Rule precedence: idle (explicit operator intent) dominates all
/// utilization-based inference; extreme-low CPU is checked before the
/// combined low-CPU-and-low-memory rule so that memory-bound workloads
/// with near-zero CPU still get the aggressive classification; the cost
/// anomaly is evaluated last so a healthy-but-expensive resource is not
/// absorbed into `none`.
fn classify_record(record: &ResourceRecord, average_cost: f64) -> ClassifiedRecord {
    let (category, fraction) = if record.status == IDLE_STATUS {
        (WasteCategory::Idle, IDLE_WASTE_FRACTION)
    } else if record.cpu_utilization < EXTREME_CPU_THRESHOLD {
        (WasteCategory::ExtremeUnderutilization, EXTREME_WASTE_FRACTION)
    } else if record.cpu_utilization < UNDERUTILIZED_CPU_THRESHOLD
        && record.memory_utilization < UNDERUTILIZED_MEM_THRESHOLD
    {
        (WasteCategory::Underutilized, UNDERUTILIZED_WASTE_FRACTION)
    } else if record.monthly_cost > HIGH_COST_MULTIPLIER * average_cost {
        // Detection-only: expensive is not necessarily wasteful
        (WasteCategory::HighCostAnomaly, 0.0)
    } else {
        (WasteCategory::None, 0.0)
    };

    ClassifiedRecord {
        record: record.clone(),
        waste_category: category,
        estimated_monthly_waste: fraction * record.monthly_cost,
        priority_rank: None,
    }
}

fn check_finite(record: &ResourceRecord) -> Result<(), ClassifyError> {
    let fields = [
        ("cpu_utilization", record.cpu_utilization),
        ("memory_utilization", record.memory_utilization),
        ("monthly_cost", record.monthly_cost),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ClassifyError::InvalidField {
                id: record.id.clone(),
                field,
            });
        }
    }
    Ok(())
}
