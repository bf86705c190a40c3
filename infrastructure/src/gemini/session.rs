//! Gemini session.
//!
//! Provides [`GeminiSession`] which implements [`LlmSession`]. The REST API
//! is stateless, so a session is the model, the optional system prompt and
//! a shared HTTP client; every `send` is one `generateContent` call.

use super::error::{GeminiError, Result};
use super::protocol::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use pulse_application::ports::llm_gateway::{GatewayError, LlmSession};
use pulse_domain::Model;
use pulse_domain::core::string::truncate;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};

/// Connection details shared by every session of one gateway
pub(crate) struct GeminiEndpoint {
    pub client: Client,
    pub base_url: String,
    pub api_key: String,
}

pub struct GeminiSession {
    endpoint: Arc<GeminiEndpoint>,
    model: Model,
    system_prompt: Option<String>,
}

impl GeminiSession {
    pub(crate) fn new(
        endpoint: Arc<GeminiEndpoint>,
        model: Model,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            endpoint,
            model,
            system_prompt,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send one prompt and return the text of the first candidate
    pub async fn generate(&self, prompt: &str, json: bool) -> Result<String> {
        let request = GenerateContentRequest::new(self.system_prompt.as_deref(), prompt, json);
        debug!(model = %self.model, json, prompt = %truncate(prompt, 120), "generateContent");

        let response = self
            .endpoint
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.endpoint.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            warn!(model = %self.model, status = status.as_u16(), "Gemini request failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(reason) = body.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }
        body.text().ok_or(GeminiError::EmptyResponse)
    }
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        Ok(self.generate(content, false).await?)
    }

    async fn send_expecting_json(
        &self,
        content: &str,
    ) -> std::result::Result<String, GatewayError> {
        Ok(self.generate(content, true).await?)
    }
}
