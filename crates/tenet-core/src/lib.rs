//! tenet-core — shared errors and configuration.

pub mod config;
pub mod errors;
