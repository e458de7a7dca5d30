//! tenet-catalog — rule catalog model, loader, and queries.
//!
//! The catalog is loaded once at startup from one TOML file per module,
//! validated fail-fast (no partial catalog), and immutable afterwards.

pub mod catalog;
pub mod loader;
pub mod model;

pub use catalog::RuleCatalog;
pub use loader::CatalogLoader;
pub use model::{
    ChangeDescriptor, ChangeFile, Module, PatternKind, PatternSpec, Pillar, Rule, Severity,
    Triggers,
};
