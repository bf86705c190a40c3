//! Presentation layer for lecture-pulse
//!
//! This crate contains the CLI definition, the axum router with its
//! handlers, and the server runner.

pub mod cli;
pub mod http;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use cli::commands::{Cli, StoreBackend};
pub use http::create_router;
pub use server::{PulseServer, ServerConfig, ServerError};
pub use state::{AppState, Collaborators};
