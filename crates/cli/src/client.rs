//! API client for the cost analyzer service

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// API client for the analyzer service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    /// Make a POST request with no body
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    /// Upload a CSV file as multipart form data
    pub async fn upload_csv<T: DeserializeOwned>(&self, path: &str, file: &Path) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.csv".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")
            .context("Invalid MIME type")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API response types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub id: String,
    pub cpu_utilization: f64,
    pub memory_utilization: f64,
    pub monthly_cost: f64,
    pub status: String,
    pub waste_category: String,
    pub estimated_monthly_waste: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_rank: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteSummary {
    pub total_records: usize,
    pub waste_count: usize,
    pub average_cost: f64,
    pub total_monthly_cost: f64,
    pub estimated_monthly_waste: f64,
    pub top_offenders: Vec<ClassifiedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub records: Vec<ClassifiedRecord>,
    pub summary: WasteSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub records_ingested: usize,
    pub summary: WasteSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub narrative: String,
    pub summary: WasteSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub records_loaded: usize,
    #[serde(default)]
    pub components: serde_json::Value,
}
