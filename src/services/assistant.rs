use crate::config::AssistantSettings;
use crate::models::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const API_VERSION: &str = "2023-06-01";

/// Errors that can occur when talking to the assistant API
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Assistant API key not configured")]
    NotConfigured,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Chat completion provider used by the chat endpoint
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Generate a reply for the conversation
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String, AssistantError>;

    /// Whether the provider has credentials to serve requests
    fn is_configured(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

/// Messages API client
pub struct AssistantClient {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl AssistantClient {
    /// Create a new assistant client
    pub fn new(settings: &AssistantSettings) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            client,
        })
    }
}

#[async_trait]
impl Assistant for AssistantClient {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::NotConfigured)?;

        let url = format!("{}/v1/messages", self.endpoint.trim_end_matches('/'));
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages,
        };

        tracing::debug!("Sending {} messages to {}", messages.len(), url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AssistantError::ApiError(format!("{}: {}", status, detail)));
        }

        let json: Value = response.json().await?;

        json.get("content")
            .and_then(|c| c.as_array())
            .and_then(|blocks| blocks.iter().find_map(|b| b.get("text").and_then(|t| t.as_str())))
            .map(str::to_string)
            .ok_or_else(|| AssistantError::InvalidResponse("Missing text content".into()))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
