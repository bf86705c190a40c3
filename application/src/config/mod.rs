//! Application-level configuration.
//!
//! - [`SessionParams`] - read limits, index usage and room code attempts

pub mod session_params;

pub use session_params::SessionParams;
