//! ChatCompletionsClient - direct REST implementation of the completion call.
//!
//! Posts the request body to a fixed endpoint URL. An API key is optional:
//! the reference deployment posts through a proxy that injects credentials
//! server-side. Key resolution priority: ~/.config/ritu/secret.json, then the
//! `RITU_API_KEY` environment variable.

use std::env;

use async_trait::async_trait;
use reqwest::Client;

use ritu_core::config::AppConfig;
use ritu_infrastructure::storage::SecretStorage;

use crate::completion::{
    CompletionError, CompletionRequest, CompletionResponse, extract_text_response, map_http_error,
    parse_retry_after,
};

/// The seam between the assistant bridge and the network.
///
/// The bridge depends on this trait only, so tests substitute a scripted
/// backend and never touch the wire.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issues one completion call and returns the reply text.
    ///
    /// Not cancellable once issued; there is no client-enforced timeout. The
    /// failure model relies on the call itself reporting failure.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// HTTP client for an OpenAI-style chat-completions endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    /// Creates a client for the given endpoint with no API key.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Sets the bearer key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Builds a client from the application config, resolving the API key
    /// from secret storage or the environment.
    ///
    /// Priority:
    /// 1. ~/.config/ritu/secret.json
    /// 2. `RITU_API_KEY` environment variable
    /// 3. No key (proxy deployments)
    pub fn from_config(config: &AppConfig) -> Self {
        let mut client = Self::new(config.endpoint.clone());
        if let Some(key) = resolve_api_key() {
            client = client.with_api_key(key);
        }
        client
    }
}

fn resolve_api_key() -> Option<String> {
    if let Ok(storage) = SecretStorage::new() {
        if let Ok(secrets) = storage.load() {
            if let Some(key) = secrets.api_key {
                return Some(key);
            }
        }
    }

    env::var("RITU_API_KEY").ok()
}

#[async_trait]
impl CompletionBackend for ChatCompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json");

        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "issuing completion call"
        );

        let response = builder.json(&request).send().await.map_err(|err| {
            CompletionError::Process {
                status_code: None,
                message: format!("completion request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
                retry_after: None,
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let retry_after = parse_retry_after(
                response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok()),
            );
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body, retry_after));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Parse(err.to_string()))?;

        extract_text_response(parsed)
    }
}
