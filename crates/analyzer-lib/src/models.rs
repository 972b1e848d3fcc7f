//! Core data models for the cost analyzer

use serde::{Deserialize, Serialize};

/// A single resource utilization record, one per input row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    /// Average CPU utilization percentage. Out-of-range values are
    /// accepted and propagated unchanged.
    pub cpu_utilization: f64,
    /// Average memory utilization percentage
    pub memory_utilization: f64,
    /// Monthly cost, currency-agnostic, non-negative
    pub monthly_cost: f64,
    /// Free-form status; only the literal value "idle" carries
    /// classification significance
    pub status: String,
}

/// Waste classification bucket assigned to a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    /// No waste signal
    None,
    /// CPU and memory both under 20%, right-sizing candidate
    Underutilized,
    /// CPU under 5%, termination candidate
    ExtremeUnderutilization,
    /// Operator marked the resource idle, fully eliminable
    Idle,
    /// Cost more than double the run average, flagged for review only
    HighCostAnomaly,
}

impl WasteCategory {
    /// Returns true for every category other than `None`
    pub fn is_flagged(&self) -> bool {
        !matches!(self, WasteCategory::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::None => "none",
            WasteCategory::Underutilized => "underutilized",
            WasteCategory::ExtremeUnderutilization => "extreme_underutilization",
            WasteCategory::Idle => "idle",
            WasteCategory::HighCostAnomaly => "high_cost_anomaly",
        }
    }
}

/// A resource record annotated with classification output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: ResourceRecord,
    pub waste_category: WasteCategory,
    /// Estimated reclaimable monthly spend, always <= monthly_cost
    pub estimated_monthly_waste: f64,
    /// 1-based position among waste-flagged records ordered by estimated
    /// waste descending; absent for unflagged records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_rank: Option<u32>,
}

/// Aggregate findings for one analysis run, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteSummary {
    pub total_records: usize,
    /// Records with any category other than `none`
    pub waste_count: usize,
    /// Mean monthly cost across all records, 0.0 for an empty run
    pub average_cost: f64,
    pub total_monthly_cost: f64,
    /// Sum of per-record estimated waste
    pub estimated_monthly_waste: f64,
    /// Highest-waste records, descending, zero-waste records excluded
    pub top_offenders: Vec<ClassifiedRecord>,
}

impl WasteSummary {
    /// Zero-valued summary for an empty input set
    pub fn empty() -> Self {
        Self {
            total_records: 0,
            waste_count: 0,
            average_cost: 0.0,
            total_monthly_cost: 0.0,
            estimated_monthly_waste: 0.0,
            top_offenders: Vec::new(),
        }
    }
}
