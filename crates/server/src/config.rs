//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Analyzer service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Bound on the top-offenders list in analysis summaries
    #[serde(default = "default_top_offenders")]
    pub top_offenders: usize,

    /// API key for remote narrative generation; the deterministic
    /// template serves every report when unset
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Chat completions endpoint
    #[serde(default = "default_openai_endpoint")]
    pub openai_endpoint: String,

    /// Model used for narrative generation
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
}

fn default_api_port() -> u16 {
    8080
}

fn default_top_offenders() -> usize {
    analyzer_lib::classify::DEFAULT_TOP_OFFENDERS
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            top_offenders: default_top_offenders(),
            openai_api_key: None,
            openai_endpoint: default_openai_endpoint(),
            openai_model: default_openai_model(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `ANALYZER_*` environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ANALYZER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }
}
