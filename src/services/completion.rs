//! Remote text completion.
//!
//! [`CompletionClient`] is the seam the companion talks to; [`ClaudeClient`]
//! is the production implementation backed by the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion service is not configured")]
    NotConfigured,

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// One completion for `message` under the `system` prompt. Implementations
    /// make a single attempt and must bound it with a timeout.
    async fn complete(&self, system: &str, message: &str) -> Result<String, CompletionError>;
}

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct ClaudeClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        Self::new(
            config.claude_api_url.clone(),
            config.claude_api_key.clone(),
            config.claude_model.clone(),
            config.completion_max_tokens,
            config.completion_timeout(),
        )
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[async_trait]
impl CompletionClient for ClaudeClient {
    async fn complete(&self, system: &str, message: &str) -> Result<String, CompletionError> {
        if !self.is_configured() {
            return Err(CompletionError::NotConfigured);
        }

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": 0.7,
                "system": system,
                "messages": [{
                    "role": "user",
                    "content": message
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let body: Value = response.json().await?;
        extract_text(&body)
    }
}

/// Concatenates the `text` blocks of a Messages API response body.
fn extract_text(body: &Value) -> Result<String, CompletionError> {
    let blocks = body["content"]
        .as_array()
        .ok_or_else(|| CompletionError::Malformed("missing content array".into()))?;

    let texts: Vec<&str> = blocks
        .iter()
        .filter(|block| block["type"].as_str().unwrap_or("text") == "text")
        .filter_map(|block| block["text"].as_str())
        .collect();

    if texts.is_empty() && !blocks.is_empty() {
        return Err(CompletionError::Malformed("no text block in content".into()));
    }

    Ok(texts.concat())
}
