//! Engine configuration errors.

use super::error_code::{self, TenetErrorCode};

/// Errors raised while resolving or validating the engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl TenetErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
