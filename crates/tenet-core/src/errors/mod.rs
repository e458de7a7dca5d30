//! Error handling for tenet.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod check_error;
pub mod config_error;
pub mod error_code;

pub use catalog_error::CatalogError;
pub use check_error::CheckError;
pub use config_error::ConfigError;
pub use error_code::TenetErrorCode;
