//! LLM Gateway port
//!
//! Defines the interface for communicating with the text-generation service.

use async_trait::async_trait;
use pulse_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the generation
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with the specified model
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Create a new session with a system prompt
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active session with an LLM
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model for this session
    fn model(&self) -> &Model;

    /// Send a message and get the full response text
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message and ask the model to answer in JSON.
    ///
    /// Default implementation falls back to [`send`](Self::send); adapters
    /// whose backend has a JSON response mode override it.
    async fn send_expecting_json(&self, content: &str) -> Result<String, GatewayError> {
        self.send(content).await
    }
}
