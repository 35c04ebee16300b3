//! OpenRouter HTTP transport.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::debug;

use crate::constants::{CONNECT_TIMEOUT_SECS, OPENROUTER_CHAT_COMPLETIONS_URL, READ_TIMEOUT_SECS};
use crate::error::PixrouteError;
use crate::request::Message;

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    modalities: &'a [&'a str],
}

/// A minimal OpenRouter chat-completions client.
///
/// One best-effort request per call: no retries, no backoff, no rate
/// limiting. A retry policy, if one is ever wanted, belongs in a wrapper
/// around [`OpenRouterClient::submit`] rather than in here.
#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    http: HttpClient,
    endpoint: String,
    api_key: String,
}

impl OpenRouterClient {
    /// Creates a client with the fixed connect/read timeouts.
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PixrouteError> {
        let http = HttpClient::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            endpoint: OPENROUTER_CHAT_COMPLETIONS_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Overrides the chat-completions endpoint (proxies, tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Submits one generation request and returns the raw response.
    ///
    /// Status checking and JSON parsing are the caller's job.
    ///
    /// # Errors
    /// Fails on connect/read timeout or other transport failures.
    pub async fn submit(
        &self,
        messages: &[Message],
        model: &str,
    ) -> Result<reqwest::Response, PixrouteError> {
        let body = GenerationRequest {
            model,
            messages,
            modalities: &["image", "text"],
        };
        debug!("POST {} model={}", self.endpoint, model);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        Ok(response)
    }
}
