//! Log store adapters
//!
//! - [`HttpLogStore`] - the hosted basin, over its REST API
//! - [`InMemoryLogStore`] - process-local streams for development and tests

mod http;
mod memory;
mod protocol;

pub use http::HttpLogStore;
pub use memory::InMemoryLogStore;
