//! Configuration for the tenet engine.

pub mod engine_config;

pub use engine_config::{CliOverrides, EngineConfig};
