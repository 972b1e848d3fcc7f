//! Integration tests for the analyzer API endpoints

use analyzer_lib::{
    health::{components, HealthRegistry},
    narrative::Narrator,
    observability::{AnalysisLogger, AnalyzerMetrics},
    store::DatasetStore,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cost_analyzer::api::{self, AppState};
use std::sync::Arc;
use tower::ServiceExt;

const SAMPLE_CSV: &str = "id,cpu_utilization,memory_utilization,monthly_cost,status\n\
                          idle-db,50,50,300,idle\n\
                          zombie-1,2,40,1000,active\n\
                          small-web,15,10,200,active\n\
                          healthy-api,80,70,250,active\n";

async fn setup_test_app() -> (Router, Arc<AppState>) {
    let registry = HealthRegistry::new();
    registry.register(components::STORE).await;
    registry.register(components::NARRATIVE).await;
    registry.set_ready(true).await;

    let state = Arc::new(AppState {
        store: DatasetStore::new(),
        narrator: Narrator::new(None),
        registry,
        metrics: AnalyzerMetrics::new(),
        logger: AnalysisLogger::new(),
        top_offenders: 5,
    });
    let router = api::create_router(state.clone());

    (router, state)
}

fn multipart_request(csv: &str) -> Request<Body> {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"data.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{boundary}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/v1/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_healthz_returns_ok_when_healthy() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["records_loaded"], 0);
}

#[tokio::test]
async fn test_healthz_returns_503_when_unhealthy() {
    let (app, state) = setup_test_app().await;
    state
        .registry
        .set_unhealthy(components::NARRATIVE, "endpoint unreachable")
        .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_readyz_ready_after_setup() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let readiness = body_json(response).await;
    assert_eq!(readiness["ready"], true);
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_analyzer_metrics() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("cost_analyzer_analyses_total"));
}

#[tokio::test]
async fn test_analyze_before_upload_is_404() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("No cost data"));
}

#[tokio::test]
async fn test_upload_then_analyze() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(multipart_request(SAMPLE_CSV))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let upload = body_json(response).await;
    assert_eq!(upload["records_ingested"], 4);
    assert_eq!(upload["summary"]["waste_count"], 3);
    // 300 (idle) + 800 (extreme) + 60 (underutilized)
    assert_eq!(upload["summary"]["estimated_monthly_waste"], 1160.0);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let analysis = body_json(response).await;
    assert_eq!(analysis["summary"]["total_records"], 4);
    assert_eq!(analysis["records"][0]["waste_category"], "idle");
    assert_eq!(analysis["records"][1]["waste_category"], "extreme_underutilization");
    assert_eq!(analysis["records"][1]["estimated_monthly_waste"], 800.0);
    assert_eq!(analysis["records"][1]["priority_rank"], 1);
    assert_eq!(analysis["records"][3]["waste_category"], "none");

    let offenders = analysis["summary"]["top_offenders"].as_array().unwrap();
    assert_eq!(offenders.len(), 3);
    assert_eq!(offenders[0]["id"], "zombie-1");
}

#[tokio::test]
async fn test_upload_rejects_malformed_csv() {
    let (app, _state) = setup_test_app().await;

    let bad_csv = "id,cpu_utilization,memory_utilization,monthly_cost,status\n\
                   web-1,not-a-number,10,100,active\n";
    let response = app.oneshot(multipart_request(bad_csv)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let (app, _state) = setup_test_app().await;

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"other\"\r\n\r\n\
         hello\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_lookup_by_id() {
    let (app, _state) = setup_test_app().await;
    app.clone()
        .oneshot(multipart_request(SAMPLE_CSV))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/records/zombie-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = body_json(response).await;
    assert_eq!(record["waste_category"], "extreme_underutilization");
    assert_eq!(record["monthly_cost"], 1000.0);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/records/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_with_template_narrator() {
    let (app, _state) = setup_test_app().await;
    app.clone()
        .oneshot(multipart_request(SAMPLE_CSV))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/report?mock=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_json(response).await;
    let narrative = report["narrative"].as_str().unwrap();
    assert!(narrative.contains("zombie-1"));
    assert!(narrative.contains("Total estimated savings"));
    assert_eq!(report["summary"]["waste_count"], 3);
}

#[tokio::test]
async fn test_upload_empty_dataset_is_valid() {
    let (app, _state) = setup_test_app().await;

    let header_only = "id,cpu_utilization,memory_utilization,monthly_cost,status\n";
    let response = app
        .clone()
        .oneshot(multipart_request(header_only))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let upload = body_json(response).await;
    assert_eq!(upload["records_ingested"], 0);
    assert_eq!(upload["summary"]["waste_count"], 0);
    assert_eq!(upload["summary"]["average_cost"], 0.0);
}
