//! Pattern checking — pure scans of change content against the active set.

pub mod checker;
pub mod compiled;
pub mod gateway;
pub mod types;

pub use checker::PatternChecker;
pub use gateway::GatewayRegions;
pub use types::{CheckReport, Location, Violation};
