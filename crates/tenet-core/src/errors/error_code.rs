//! Stable error codes, one per subsystem.

pub const CONFIG_ERROR: &str = "TENET_CONFIG_ERROR";
pub const CATALOG_ERROR: &str = "TENET_CATALOG_ERROR";
pub const CHECK_ERROR: &str = "TENET_CHECK_ERROR";

/// Maps an error to its stable code string.
pub trait TenetErrorCode {
    fn error_code(&self) -> &'static str;
}
