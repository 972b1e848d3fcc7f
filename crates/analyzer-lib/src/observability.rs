//! Observability infrastructure
//!
//! Provides:
//! - Prometheus metrics (analysis latency, ingest counts, waste totals)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge, register_histogram, register_int_counter, register_int_gauge, Gauge,
    Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for analysis latency (in seconds); classification is
/// a bounded in-memory pass, so the buckets skew small
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<AnalyzerMetricsInner> = OnceLock::new();

struct AnalyzerMetricsInner {
    analysis_latency_seconds: Histogram,
    analyses_total: IntCounter,
    records_ingested_total: IntCounter,
    ingest_errors_total: IntCounter,
    narrative_fallbacks_total: IntCounter,
    dataset_records: IntGauge,
    waste_flagged: IntGauge,
    estimated_monthly_waste: Gauge,
}

impl AnalyzerMetricsInner {
    fn new() -> Self {
        Self {
            analysis_latency_seconds: register_histogram!(
                "cost_analyzer_analysis_latency_seconds",
                "Time spent classifying a dataset",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register analysis_latency_seconds"),

            analyses_total: register_int_counter!(
                "cost_analyzer_analyses_total",
                "Total number of analysis runs"
            )
            .expect("Failed to register analyses_total"),

            records_ingested_total: register_int_counter!(
                "cost_analyzer_records_ingested_total",
                "Total number of resource records ingested"
            )
            .expect("Failed to register records_ingested_total"),

            ingest_errors_total: register_int_counter!(
                "cost_analyzer_ingest_errors_total",
                "Total number of rejected CSV uploads"
            )
            .expect("Failed to register ingest_errors_total"),

            narrative_fallbacks_total: register_int_counter!(
                "cost_analyzer_narrative_fallbacks_total",
                "Total number of narrative requests served by the template fallback"
            )
            .expect("Failed to register narrative_fallbacks_total"),

            dataset_records: register_int_gauge!(
                "cost_analyzer_dataset_records",
                "Number of records in the currently stored dataset"
            )
            .expect("Failed to register dataset_records"),

            waste_flagged: register_int_gauge!(
                "cost_analyzer_waste_flagged",
                "Waste-flagged records in the most recent analysis"
            )
            .expect("Failed to register waste_flagged"),

            estimated_monthly_waste: register_gauge!(
                "cost_analyzer_estimated_monthly_waste",
                "Estimated monthly waste in the most recent analysis"
            )
            .expect("Failed to register estimated_monthly_waste"),
        }
    }
}

/// Analyzer metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct AnalyzerMetrics {
    _private: (),
}

impl Default for AnalyzerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(AnalyzerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &AnalyzerMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_analysis_latency(&self, duration_secs: f64) {
        self.inner().analysis_latency_seconds.observe(duration_secs);
    }

    pub fn inc_analyses(&self) {
        self.inner().analyses_total.inc();
    }

    pub fn add_records_ingested(&self, count: u64) {
        self.inner().records_ingested_total.inc_by(count);
        self.inner().dataset_records.set(count as i64);
    }

    pub fn inc_ingest_errors(&self) {
        self.inner().ingest_errors_total.inc();
    }

    pub fn inc_narrative_fallbacks(&self) {
        self.inner().narrative_fallbacks_total.inc();
    }

    /// Record the headline numbers of the most recent analysis
    pub fn set_analysis_results(&self, waste_flagged: usize, estimated_monthly_waste: f64) {
        self.inner().waste_flagged.set(waste_flagged as i64);
        self.inner()
            .estimated_monthly_waste
            .set(estimated_monthly_waste);
    }
}

/// Structured logger for analyzer events
///
/// Emits consistent JSON-formatted events for ingestion, analysis runs,
/// and narrative fallbacks.
#[derive(Debug, Clone, Default)]
pub struct AnalysisLogger;

impl AnalysisLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn log_startup(&self, version: &str, narrative_mode: &str) {
        info!(
            event = "startup",
            version = %version,
            narrative_mode = %narrative_mode,
            "Cost analyzer starting"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(event = "shutdown", reason = %reason, "Cost analyzer shutting down");
    }

    pub fn log_ingest(&self, records: usize) {
        info!(event = "dataset_ingested", records = records, "Dataset ingested");
    }

    pub fn log_analysis(
        &self,
        total_records: usize,
        waste_count: usize,
        estimated_monthly_waste: f64,
        average_cost: f64,
    ) {
        info!(
            event = "analysis_completed",
            total_records = total_records,
            waste_count = waste_count,
            estimated_monthly_waste = estimated_monthly_waste,
            average_cost = average_cost,
            "Analysis completed"
        );
    }

    pub fn log_narrative_fallback(&self, error: &str) {
        warn!(
            event = "narrative_fallback",
            error = %error,
            "Remote narrative generation failed, using template fallback"
        );
    }
}
