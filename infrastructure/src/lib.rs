//! Infrastructure layer for lecture-pulse
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logstore;
pub mod room_codes;
pub mod simplifier;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLlmConfig, FileLogStoreConfig,
    FileServerConfig, FileSessionsConfig, FileSimplifierConfig, LogStoreBackend,
};
pub use gemini::{GeminiError, GeminiGateway, GeminiSession};
pub use logstore::{HttpLogStore, InMemoryLogStore};
pub use room_codes::RandomRoomCodeGenerator;
pub use simplifier::HttpSimplifier;
