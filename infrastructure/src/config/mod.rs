//! Configuration file loading for lecture-pulse
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PULSE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./pulse.toml` or `./.pulse.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lecture-pulse/config.toml`
//! 5. Fallback: `~/.config/lecture-pulse/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_LOG_STORE_URL, FileConfig, FileLlmConfig, FileLogStoreConfig,
    FileServerConfig, FileSessionsConfig, FileSimplifierConfig, LogStoreBackend,
};
pub use loader::ConfigLoader;
