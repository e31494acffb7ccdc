//! Configuration System
//!
//! Layered configuration for the generation endpoint and logging: built-in
//! defaults, the user's global file, workspace files, then `DRAFTDESK_*`
//! environment overrides. The loaded value is passed around explicitly; there
//! is no global configuration state.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/generate";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftDeskConfig {
    /// Generation endpoint and retry budget
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Endpoint URL accepting `{"question": ...}` POSTs
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_timeout_ms", alias = "timeoutMs", alias = "timeoutms")]
    pub timeout_ms: u64,

    /// Retries after a timed-out attempt
    #[serde(default = "default_max_retries", alias = "maxRetries", alias = "maxretries")]
    pub max_retries: u32,

    /// Fixed delay before each retry, in milliseconds
    #[serde(default = "default_backoff_ms", alias = "backoffMs", alias = "backoffms")]
    pub backoff_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    2_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    Generation(String),
    Logging(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ConfigValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl GenerationConfig {
    /// Validate endpoint and timing settings
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        match Url::parse(&self.endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => problems.push(format!(
                "endpoint must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => problems.push(format!("endpoint '{}' is not a URL: {}", self.endpoint, e)),
        }
        if self.timeout_ms == 0 {
            problems.push("timeout_ms must be greater than zero".to_string());
        }
        problems
    }
}

impl DraftDeskConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors: Vec<ConfigValidationError> = self
            .generation
            .validate()
            .into_iter()
            .map(ConfigValidationError::Generation)
            .collect();

        if let Err(e) = self.logging.validate() {
            errors.push(ConfigValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load from the workspace (or an explicit file) and validate.
    pub fn load_validated(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace_root)?,
        };
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
