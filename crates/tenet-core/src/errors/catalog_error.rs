//! Rule catalog errors.
//!
//! Any of these aborts the load with no partial catalog constructed.

use super::error_code::{self, TenetErrorCode};

/// Errors raised while loading or querying the rule catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read module file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse module file {path}: {message}")]
    ModuleParse { path: String, message: String },

    #[error("Module '{module}': rule '{rule}' is missing required field '{field}'")]
    MissingField {
        module: String,
        rule: String,
        field: String,
    },

    #[error("Module '{module}' declares rule id '{rule_id}' more than once")]
    DuplicateRuleId { module: String, rule_id: String },

    #[error("Module id '{module_id}' is declared by more than one file")]
    DuplicateModuleId { module_id: String },

    #[error("Modules '{first}' and '{second}' both declare rank {rank}")]
    DuplicateModuleRank {
        rank: u32,
        first: String,
        second: String,
    },

    #[error("Rule '{rule}' has invalid severity '{value}' (expected 'blocking' or 'advisory')")]
    InvalidSeverity { rule: String, value: String },

    #[error("Rule '{rule}' has an invalid pattern: {message}")]
    InvalidPattern { rule: String, message: String },

    #[error("Module '{module}' declares an empty trigger keyword")]
    EmptyTriggerKeyword { module: String },

    #[error("Module '{module}': trigger glob '{glob}' is invalid: {message}")]
    InvalidTriggerGlob {
        module: String,
        glob: String,
        message: String,
    },

    #[error("Catalog has no base module (exactly one module must declare rank 0)")]
    NoBaseModule,

    #[error("Unknown rule id '{rule_id}'")]
    RuleNotFound { rule_id: String },
}

impl TenetErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        error_code::CATALOG_ERROR
    }
}
