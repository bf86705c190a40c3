//! Question simplifier port

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimplifyError {
    #[error("simplification service unreachable: {0}")]
    Transport(String),

    #[error("simplification service returned HTTP {0}")]
    Status(u16),

    #[error("simplification service returned no text")]
    EmptyResponse,

    #[error("simplification service not configured")]
    NotConfigured,
}

/// Rewrites a question in simpler language
#[async_trait]
pub trait Simplifier: Send + Sync {
    async fn simplify(&self, text: &str) -> Result<String, SimplifyError>;
}
