//! Check input errors.

use super::error_code::{self, TenetErrorCode};

/// Errors raised while assembling check input from the caller's paths.
/// The check itself is pure and cannot fail once its input exists.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to read input file {path}: {message}")]
    UnreadableInput { path: String, message: String },

    #[error("No input: supply at least one file path or --tag")]
    EmptyDescriptor,
}

impl TenetErrorCode for CheckError {
    fn error_code(&self) -> &'static str {
        error_code::CHECK_ERROR
    }
}
