//! Active rule set — resolution, deduplication, precedence.

pub mod active_set;

pub use active_set::{ActiveRuleSet, DuplicateRuleWarning};
