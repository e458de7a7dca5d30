//! Trigger routing — which modules apply to a change.

pub mod matcher;

pub use matcher::TriggerMatcher;
