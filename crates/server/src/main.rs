//! Cost Analyzer - cloud resource waste analysis service
//!
//! Ingests tabular utilization records, classifies each resource into a
//! waste category, and serves aggregate savings summaries and narrative
//! reports over HTTP.

use analyzer_lib::{
    health::{components, HealthRegistry},
    narrative::{Narrator, OpenAiConfig, OpenAiNarrative},
    observability::{AnalysisLogger, AnalyzerMetrics},
    store::DatasetStore,
};
use anyhow::Result;
use cost_analyzer::{api, config};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ANALYZER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting cost-analyzer");

    let config = config::ServerConfig::load()?;

    // Narrative mode is decided once, at startup
    let narrator = match &config.openai_api_key {
        Some(api_key) => Narrator::new(Some(Box::new(OpenAiNarrative::new(OpenAiConfig {
            endpoint: config.openai_endpoint.clone(),
            api_key: api_key.clone(),
            model: config.openai_model.clone(),
        })?))),
        None => Narrator::new(None),
    };

    let registry = HealthRegistry::new();
    registry.register(components::STORE).await;
    registry.register(components::NARRATIVE).await;

    let metrics = AnalyzerMetrics::new();
    let logger = AnalysisLogger::new();
    logger.log_startup(ANALYZER_VERSION, narrator.mode());

    let state = Arc::new(api::AppState {
        store: DatasetStore::new(),
        narrator,
        registry: registry.clone(),
        metrics,
        logger: logger.clone(),
        top_offenders: config.top_offenders,
    });

    registry.set_ready(true).await;

    let api_handle = tokio::spawn(api::serve(config.api_port, state));

    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    api_handle.abort();

    Ok(())
}
