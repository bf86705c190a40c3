//! Gemini LLM Gateway implementation

use super::error::GeminiError;
use super::session::{GeminiEndpoint, GeminiSession};
use async_trait::async_trait;
use pulse_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use pulse_domain::Model;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Default REST endpoint of the Gemini API
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// LLM Gateway implementation for the Gemini REST API
pub struct GeminiGateway {
    endpoint: Arc<GeminiEndpoint>,
}

impl GeminiGateway {
    /// Create a gateway; every request is bounded by `timeout`
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, GatewayError> {
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey.into());
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(base_url, "GeminiGateway initialized");
        Ok(Self {
            endpoint: Arc::new(GeminiEndpoint {
                client,
                base_url: base_url.to_string(),
                api_key: api_key.to_string(),
            }),
        })
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(GeminiSession::new(
            Arc::clone(&self.endpoint),
            model.clone(),
            None,
        )))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(GeminiSession::new(
            Arc::clone(&self.endpoint),
            model.clone(),
            Some(system_prompt.to_string()),
        )))
    }
}
