//! Remote narrative generation via an OpenAI-style chat completion API

use std::fmt::Write;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::classify::Analysis;

use super::{NarrativeError, NarrativeGenerator};

const SYSTEM_PROMPT: &str = "You are a cloud cost optimization expert. Analyze the provided \
     wasteful cloud resources and generate a concise, actionable summary suggesting which \
     resources should be turned off. Be specific about resource names and potential savings.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the remote narrative generator
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Chat completions endpoint URL
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

/// Chat-completion-backed narrative generator
pub struct OpenAiNarrative {
    client: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiNarrative {
    pub fn new(config: OpenAiConfig) -> Result<Self, NarrativeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Build the user prompt from the flagged records
    fn build_prompt(analysis: &Analysis) -> String {
        let flagged = analysis.flagged();
        if flagged.is_empty() {
            return "No wasteful resources found.".to_string();
        }

        let mut prompt =
            "Analyze these wasteful cloud resources and suggest which to turn off:\n\n"
                .to_string();
        for classified in flagged {
            let record = &classified.record;
            let _ = writeln!(prompt, "Resource: {}", record.id);
            let _ = writeln!(prompt, "  - Category: {}", classified.waste_category.as_str());
            let _ = writeln!(prompt, "  - Monthly Cost: ${:.2}", record.monthly_cost);
            let _ = writeln!(
                prompt,
                "  - Estimated Waste: ${:.2}/month",
                classified.estimated_monthly_waste
            );
            let _ = writeln!(prompt, "  - CPU Usage: {:.1}%", record.cpu_utilization);
            let _ = writeln!(prompt, "  - Memory Usage: {:.1}%", record.memory_utilization);
            let _ = writeln!(prompt, "  - Status: {}", record.status);
            prompt.push('\n');
        }
        prompt.push_str(
            "Provide a concise summary (2-3 sentences) suggesting which resources to turn \
             off and why.",
        );
        prompt
    }
}

#[async_trait]
impl NarrativeGenerator for OpenAiNarrative {
    async fn generate(&self, analysis: &Analysis) -> Result<String, NarrativeError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::build_prompt(analysis) },
            ],
            "temperature": 0.7,
            "max_tokens": 500,
        });

        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "Requesting narrative");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Api { status, body });
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(NarrativeError::MalformedResponse)
    }
}
