//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [log_store]
//! backend = "http"
//! base_url = "https://lecture-pulse.b.aws.s2.dev/v1"
//! read_limit = 500
//!
//! [llm]
//! model = "gemini-2.5-flash"
//!
//! [sessions]
//! use_index = true
//! ```

use crate::gemini::DEFAULT_GEMINI_BASE_URL;
use crate::simplifier::DEFAULT_SIMPLIFIER_ENDPOINT;
use pulse_application::SessionParams;
use pulse_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default basin endpoint of the hosted log store
pub const DEFAULT_LOG_STORE_URL: &str = "https://lecture-pulse.b.aws.s2.dev/v1";

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("server.port cannot be 0")]
    InvalidPort,

    #[error("log_store.read_limit must be at least 1")]
    InvalidReadLimit,

    #[error("{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("sessions.max_code_attempts must be at least 1")]
    InvalidCodeAttempts,

    #[error("log_store.access_token is required for the http backend (or set S2_ACCESS_TOKEN)")]
    MissingAccessToken,

    #[error("{0}.base_url cannot be empty")]
    EmptyBaseUrl(&'static str),
}

/// Raw HTTP server configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which log store adapter to run against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStoreBackend {
    /// The hosted basin over HTTP
    #[default]
    Http,
    /// Process-local streams, lost on restart
    Memory,
}

impl std::str::FromStr for LogStoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(LogStoreBackend::Http),
            "memory" => Ok(LogStoreBackend::Memory),
            other => Err(format!("unknown log store backend '{other}'")),
        }
    }
}

/// Raw log store configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogStoreConfig {
    pub backend: LogStoreBackend,
    pub base_url: String,
    /// Bearer token; falls back to `S2_ACCESS_TOKEN`
    pub access_token: Option<String>,
    /// Maximum records read from one stream
    pub read_limit: usize,
    pub timeout_seconds: Option<u64>,
}

impl Default for FileLogStoreConfig {
    fn default() -> Self {
        Self {
            backend: LogStoreBackend::Http,
            base_url: DEFAULT_LOG_STORE_URL.to_string(),
            access_token: None,
            read_limit: 500,
            timeout_seconds: Some(30),
        }
    }
}

/// Raw generation service configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub base_url: String,
    pub model: Model,
    /// Falls back to `GEMINI_API_KEY`
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: Model::default(),
            api_key: None,
            timeout_seconds: Some(60),
        }
    }
}

/// Raw simplification service configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimplifierConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for FileSimplifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SIMPLIFIER_ENDPOINT.to_string(),
            api_key: None,
            timeout_seconds: Some(10),
        }
    }
}

/// Raw session behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionsConfig {
    /// Maintain and consult the room/owner index streams
    pub use_index: bool,
    pub max_code_attempts: usize,
}

impl Default for FileSessionsConfig {
    fn default() -> Self {
        Self {
            use_index: true,
            max_code_attempts: 5,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub log_store: FileLogStoreConfig,
    pub llm: FileLlmConfig,
    pub simplifier: FileSimplifierConfig,
    pub sessions: FileSessionsConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        if self.log_store.read_limit == 0 {
            return Err(ConfigValidationError::InvalidReadLimit);
        }
        if self.sessions.max_code_attempts == 0 {
            return Err(ConfigValidationError::InvalidCodeAttempts);
        }
        for (section, timeout) in [
            ("log_store", self.log_store.timeout_seconds),
            ("llm", self.llm.timeout_seconds),
            ("simplifier", self.simplifier.timeout_seconds),
        ] {
            if timeout == Some(0) {
                return Err(ConfigValidationError::InvalidTimeout(section));
            }
        }
        if self.log_store.backend == LogStoreBackend::Http {
            if self.log_store.base_url.trim().is_empty() {
                return Err(ConfigValidationError::EmptyBaseUrl("log_store"));
            }
            if !has_secret(&self.log_store.access_token) {
                return Err(ConfigValidationError::MissingAccessToken);
            }
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl("llm"));
        }
        Ok(())
    }

    /// Fill unset secrets from their conventional variables via `lookup`
    pub fn with_secret_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if !has_secret(&self.log_store.access_token) {
            self.log_store.access_token = lookup("S2_ACCESS_TOKEN");
        }
        if !has_secret(&self.llm.api_key) {
            self.llm.api_key = lookup("GEMINI_API_KEY");
        }
        self
    }

    /// Parameters for the session use cases
    pub fn session_params(&self) -> SessionParams {
        SessionParams::default()
            .with_read_limit(self.log_store.read_limit)
            .with_index(self.sessions.use_index)
            .with_max_code_attempts(self.sessions.max_code_attempts)
    }

    pub fn log_store_timeout(&self) -> Duration {
        Duration::from_secs(self.log_store.timeout_seconds.unwrap_or(30))
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds.unwrap_or(60))
    }

    pub fn simplifier_timeout(&self) -> Duration {
        Duration::from_secs(self.simplifier.timeout_seconds.unwrap_or(10))
    }

    /// Copy with secrets masked, for `--show-config`
    pub fn redacted(&self) -> Self {
        let mask = |s: &Option<String>| s.as_ref().map(|_| "********".to_string());
        let mut copy = self.clone();
        copy.log_store.access_token = mask(&self.log_store.access_token);
        copy.llm.api_key = mask(&self.llm.api_key);
        copy.simplifier.api_key = mask(&self.simplifier.api_key);
        copy
    }
}

fn has_secret(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> FileConfig {
        let mut config = FileConfig::default();
        config.log_store.access_token = Some("token".to_string());
        config
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
host = "127.0.0.1"
port = 8080

[log_store]
backend = "memory"
read_limit = 50

[llm]
model = "gemini-2.5-pro"
timeout_seconds = 20

[simplifier]
endpoint = "http://localhost:9000/simplify"

[sessions]
use_index = false
max_code_attempts = 2
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log_store.backend, LogStoreBackend::Memory);
        assert_eq!(config.log_store.read_limit, 50);
        assert_eq!(config.llm.model, Model::Gemini25Pro);
        assert_eq!(config.llm_timeout(), Duration::from_secs(20));
        assert_eq!(config.simplifier.endpoint, "http://localhost:9000/simplify");
        assert!(!config.sessions.use_index);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[server]\nport = 4000\n").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.log_store.base_url, DEFAULT_LOG_STORE_URL);
        assert_eq!(config.llm.model, Model::Gemini25Flash);
    }

    #[test]
    fn test_http_backend_requires_token() {
        assert_eq!(
            FileConfig::default().validate(),
            Err(ConfigValidationError::MissingAccessToken)
        );
        assert!(with_token().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = with_token();
        config.server.port = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidPort));

        let mut config = with_token();
        config.log_store.read_limit = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidReadLimit));

        let mut config = with_token();
        config.llm.timeout_seconds = Some(0);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("llm"))
        );
    }

    #[test]
    fn test_secret_fallbacks_only_fill_gaps() {
        let mut config = FileConfig::default();
        config.llm.api_key = Some("from-file".to_string());
        let config = config.with_secret_fallbacks(|name| Some(format!("env-{name}")));

        assert_eq!(
            config.log_store.access_token.as_deref(),
            Some("env-S2_ACCESS_TOKEN")
        );
        assert_eq!(config.llm.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_session_params() {
        let mut config = FileConfig::default();
        config.log_store.read_limit = 42;
        config.sessions.use_index = false;
        let params = config.session_params();
        assert_eq!(params.read_limit, 42);
        assert!(!params.use_index);
        assert_eq!(params.max_code_attempts, 5);
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let redacted = with_token().redacted();
        assert_eq!(redacted.log_store.access_token.as_deref(), Some("********"));
        assert_eq!(redacted.llm.api_key, None);
    }
}
