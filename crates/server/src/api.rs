//! HTTP API for the cost analyzer
//!
//! Exposes CSV upload, analysis, record lookup, narrative reports, and
//! the health/metrics endpoints.

use std::sync::Arc;
use std::time::Instant;

use analyzer_lib::{
    classify::classify,
    health::{ComponentStatus, HealthRegistry},
    ingest,
    models::{ClassifiedRecord, ResourceRecord, WasteSummary},
    narrative::Narrator,
    observability::{AnalysisLogger, AnalyzerMetrics},
    store::DatasetStore,
    Analysis,
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// Shared application state
pub struct AppState {
    pub store: DatasetStore,
    pub narrator: Narrator,
    pub registry: HealthRegistry,
    pub metrics: AnalyzerMetrics,
    pub logger: AnalysisLogger,
    pub top_offenders: usize,
}

/// API error mapped to a JSON body and status code
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub records_ingested: usize,
    pub summary: WasteSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub narrative: String,
    pub summary: WasteSummary,
}

#[derive(Debug, Deserialize)]
pub struct ReportParams {
    /// Force the deterministic template generator
    #[serde(default)]
    pub mock: bool,
}

/// Classify the given records and record the run in metrics and logs
fn run_analysis(state: &AppState, records: &[ResourceRecord]) -> Result<Analysis, ApiError> {
    let started = Instant::now();
    let analysis =
        classify(records, state.top_offenders).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    state
        .metrics
        .observe_analysis_latency(started.elapsed().as_secs_f64());
    state.metrics.inc_analyses();
    state.metrics.set_analysis_results(
        analysis.summary.waste_count,
        analysis.summary.estimated_monthly_waste,
    );
    state.logger.log_analysis(
        analysis.summary.total_records,
        analysis.summary.waste_count,
        analysis.summary.estimated_monthly_waste,
        analysis.summary.average_cost,
    );
    Ok(analysis)
}

/// Snapshot the stored dataset or fail with 404
async fn stored_analysis(state: &AppState) -> Result<Analysis, ApiError> {
    let snapshot = state.store.snapshot().await.ok_or_else(|| {
        ApiError::NotFound("No cost data available. Upload a CSV file first.".to_string())
    })?;
    run_analysis(state, &snapshot)
}

/// Health check - 200 while operational, 503 once a component fails
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records_loaded = state.store.len().await;
    let health = state.registry.health(records_loaded).await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check - 200 once initialized, 503 otherwise
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Upload a CSV dataset, replace the stored one, and analyze it
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut payload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            payload = Some(field.bytes().await.map_err(|e| {
                ApiError::BadRequest(format!("Failed to read uploaded file: {e}"))
            })?);
        }
    }
    let payload =
        payload.ok_or_else(|| ApiError::BadRequest("Missing `file` form field".to_string()))?;

    let records = ingest::read_records_from_bytes(&payload).map_err(|e| {
        state.metrics.inc_ingest_errors();
        ApiError::BadRequest(e.to_string())
    })?;

    let analysis = run_analysis(&state, &records)?;
    let count = records.len();
    state.store.replace(records).await;
    state.metrics.add_records_ingested(count as u64);
    state.logger.log_ingest(count);

    Ok(Json(UploadResponse {
        message: format!("Successfully processed {count} records"),
        records_ingested: count,
        summary: analysis.summary,
    }))
}

/// Analyze the stored dataset
async fn analyze(State(state): State<Arc<AppState>>) -> Result<Json<Analysis>, ApiError> {
    let analysis = stored_analysis(&state).await?;
    Ok(Json(analysis))
}

/// All stored records with classification flags
async fn records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClassifiedRecord>>, ApiError> {
    let analysis = stored_analysis(&state).await?;
    Ok(Json(analysis.records))
}

/// One stored record by id
async fn record_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ClassifiedRecord>, ApiError> {
    let analysis = stored_analysis(&state).await?;
    analysis
        .records
        .into_iter()
        .find(|c| c.record.id == id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Resource `{id}` not found")))
}

/// Narrative savings report over the stored dataset
async fn report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReportParams>,
) -> Result<Json<ReportResponse>, ApiError> {
    let analysis = stored_analysis(&state).await?;

    let narrative = if params.mock {
        state.narrator.narrate_offline(&analysis)
    } else {
        state.narrator.narrate(&analysis).await
    };

    Ok(Json(ReportResponse {
        narrative,
        summary: analysis.summary,
    }))
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/upload", post(upload))
        .route("/api/v1/analyze", get(analyze))
        .route("/api/v1/records", get(records))
        .route("/api/v1/records/:id", get(record_by_id))
        .route("/api/v1/report", post(report))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
