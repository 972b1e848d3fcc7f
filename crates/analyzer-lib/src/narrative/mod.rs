//! Narrative report generation
//!
//! Turns an analysis into human-readable prose. Two interchangeable
//! implementations sit behind one narrow trait: a remote text-generation
//! call and a deterministic offline template. The `Narrator` wrapper
//! selects the primary at startup and falls back to the template when the
//! remote service is unreachable, so call sites never branch on the mode.

mod openai;
mod template;

pub use openai::{OpenAiConfig, OpenAiNarrative};
pub use template::TemplateNarrative;

use async_trait::async_trait;
use thiserror::Error;

use crate::classify::Analysis;
use crate::observability::{AnalysisLogger, AnalyzerMetrics};

/// Narrative generation failure
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("narrative service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("narrative response missing completion text")]
    MalformedResponse,
}

/// Generates a prose report from an analysis
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, analysis: &Analysis) -> Result<String, NarrativeError>;
}

/// Narrator with an optional remote primary and a template fallback
pub struct Narrator {
    primary: Option<Box<dyn NarrativeGenerator>>,
    fallback: TemplateNarrative,
    metrics: AnalyzerMetrics,
    logger: AnalysisLogger,
}

impl Narrator {
    /// When `primary` is `None` the template serves every request
    pub fn new(primary: Option<Box<dyn NarrativeGenerator>>) -> Self {
        Self {
            primary,
            fallback: TemplateNarrative::new(),
            metrics: AnalyzerMetrics::new(),
            logger: AnalysisLogger::new(),
        }
    }

    /// Mode label for logs and diagnostics
    pub fn mode(&self) -> &'static str {
        if self.primary.is_some() {
            "remote"
        } else {
            "template"
        }
    }

    /// Produce a narrative; never fails, a remote error is logged and the
    /// deterministic template answers instead
    pub async fn narrate(&self, analysis: &Analysis) -> String {
        if let Some(primary) = &self.primary {
            match primary.generate(analysis).await {
                Ok(text) => return text,
                Err(err) => {
                    self.logger.log_narrative_fallback(&err.to_string());
                    self.metrics.inc_narrative_fallbacks();
                }
            }
        }
        self.fallback.render(analysis)
    }

    /// Force the deterministic template, bypassing the remote primary
    pub fn narrate_offline(&self, analysis: &Analysis) -> String {
        self.fallback.render(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, DEFAULT_TOP_OFFENDERS};
    use crate::models::ResourceRecord;

    struct FailingGenerator;

    #[async_trait]
    impl NarrativeGenerator for FailingGenerator {
        async fn generate(&self, _analysis: &Analysis) -> Result<String, NarrativeError> {
            Err(NarrativeError::MalformedResponse)
        }
    }

    struct CannedGenerator;

    #[async_trait]
    impl NarrativeGenerator for CannedGenerator {
        async fn generate(&self, _analysis: &Analysis) -> Result<String, NarrativeError> {
            Ok("remote narrative".to_string())
        }
    }

    fn sample_analysis() -> Analysis {
        let records = vec![ResourceRecord {
            id: "db-1".to_string(),
            cpu_utilization: 2.0,
            memory_utilization: 40.0,
            monthly_cost: 1000.0,
            status: "active".to_string(),
        }];
        classify(&records, DEFAULT_TOP_OFFENDERS).unwrap()
    }

    #[tokio::test]
    async fn test_primary_answer_used_when_available() {
        let narrator = Narrator::new(Some(Box::new(CannedGenerator)));
        assert_eq!(narrator.mode(), "remote");
        let text = narrator.narrate(&sample_analysis()).await;
        assert_eq!(text, "remote narrative");
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_template() {
        let narrator = Narrator::new(Some(Box::new(FailingGenerator)));
        let text = narrator.narrate(&sample_analysis()).await;
        assert!(text.contains("db-1"));
    }

    #[tokio::test]
    async fn test_no_primary_serves_template() {
        let narrator = Narrator::new(None);
        assert_eq!(narrator.mode(), "template");
        let text = narrator.narrate(&sample_analysis()).await;
        assert_eq!(text, narrator.narrate_offline(&sample_analysis()));
    }
}
