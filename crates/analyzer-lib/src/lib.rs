//! Core library for the cloud cost waste analyzer
//!
//! This crate provides the core functionality for:
//! - CSV ingestion of resource utilization records
//! - Rule-based waste classification and savings estimation
//! - Narrative report generation (remote or deterministic template)
//! - Health checks and observability

pub mod classify;
pub mod health;
pub mod ingest;
pub mod models;
pub mod narrative;
pub mod observability;
pub mod store;

pub use classify::{classify, Analysis, ClassifyError};
pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use narrative::{NarrativeError, NarrativeGenerator, Narrator, TemplateNarrative};
pub use observability::{AnalysisLogger, AnalyzerMetrics};
pub use store::DatasetStore;
