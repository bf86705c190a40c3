//! HTTP question simplifier
//!
//! `POST {endpoint}` with `{"text": ...}`; the service answers
//! `{"simplified_text": ...}`. A reply without text yields the input
//! unchanged.

use async_trait::async_trait;
use pulse_application::ports::simplifier::{SimplifyError, Simplifier};
use pulse_domain::core::string::squash_whitespace;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default simplification endpoint
pub const DEFAULT_SIMPLIFIER_ENDPOINT: &str = "https://api.lingo.dev/simplify";

#[derive(Serialize)]
struct SimplifyRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct SimplifyResponse {
    #[serde(default)]
    simplified_text: Option<String>,
}

pub struct HttpSimplifier {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpSimplifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SimplifyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SimplifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl Simplifier for HttpSimplifier {
    async fn simplify(&self, text: &str) -> Result<String, SimplifyError> {
        if self.endpoint.trim().is_empty() {
            return Err(SimplifyError::NotConfigured);
        }
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&SimplifyRequest { text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SimplifyError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SimplifyError::Status(status.as_u16()));
        }
        let body: SimplifyResponse = response
            .json()
            .await
            .map_err(|e| SimplifyError::Transport(e.to_string()))?;

        let simplified = body
            .simplified_text
            .map(|t| squash_whitespace(&t))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| text.to_string());
        debug!(chars = simplified.len(), "Simplified question");
        Ok(simplified)
    }
}
