//! Deterministic narrative template
//!
//! Offline fallback producing the same report every time for the same
//! analysis. Wording follows the per-category remediation advice:
//! terminate idle resources, terminate or downsize extreme cases,
//! right-size underutilized ones, review cost anomalies.

use std::fmt::Write;

use async_trait::async_trait;

use crate::classify::Analysis;
use crate::models::WasteCategory;

use super::{NarrativeError, NarrativeGenerator};

#[derive(Debug, Clone, Default)]
pub struct TemplateNarrative;

impl TemplateNarrative {
    pub fn new() -> Self {
        Self
    }

    /// Render the report synchronously; infallible by construction
    pub fn render(&self, analysis: &Analysis) -> String {
        let summary = &analysis.summary;
        if summary.waste_count == 0 {
            return "No wasteful resources detected. All resources appear to be properly \
                    utilized."
                .to_string();
        }

        let mut text = format!(
            "Found {} resource(s) with savings opportunities out of {} analyzed:\n\n",
            summary.waste_count, summary.total_records
        );

        for classified in analysis.flagged() {
            let record = &classified.record;
            let _ = write!(text, "- {}: ", record.id);
            match classified.waste_category {
                WasteCategory::Idle => {
                    let _ = write!(
                        text,
                        "status is idle and should be stopped or terminated, saving \
                         ${:.2}/month.",
                        classified.estimated_monthly_waste
                    );
                }
                WasteCategory::ExtremeUnderutilization => {
                    let _ = write!(
                        text,
                        "CPU at {:.1}% makes it a termination candidate, saving \
                         ${:.2}/month.",
                        record.cpu_utilization, classified.estimated_monthly_waste
                    );
                }
                WasteCategory::Underutilized => {
                    let _ = write!(
                        text,
                        "CPU {:.1}% and memory {:.1}% suggest right-sizing, saving \
                         ${:.2}/month.",
                        record.cpu_utilization,
                        record.memory_utilization,
                        classified.estimated_monthly_waste
                    );
                }
                WasteCategory::HighCostAnomaly => {
                    let _ = write!(
                        text,
                        "costs ${:.2}/month, more than double the ${:.2} average; review \
                         for optimization.",
                        record.monthly_cost, summary.average_cost
                    );
                }
                WasteCategory::None => {}
            }
            text.push('\n');
        }

        let _ = write!(
            text,
            "\nTotal estimated savings: ${:.2}/month.",
            summary.estimated_monthly_waste
        );
        text
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrative {
    async fn generate(&self, analysis: &Analysis) -> Result<String, NarrativeError> {
        Ok(self.render(analysis))
    }
}
