//! Violation and report types.

use std::fmt;

use serde::{Serialize, Serializer};

use tenet_catalog::Severity;

use crate::ruleset::DuplicateRuleWarning;

/// Where a violation was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A textual hit at a 1-based line and byte column.
    Text {
        path: String,
        line: u32,
        column: u32,
    },
    /// A whole-file condition (e.g. line-count checks).
    File { path: String },
}

impl Location {
    pub fn path(&self) -> &str {
        match self {
            Location::Text { path, .. } | Location::File { path } => path,
        }
    }

    /// (path, line, column) with whole-file locations ordered first.
    pub fn sort_key(&self) -> (&str, u32, u32) {
        match self {
            Location::File { path } => (path, 0, 0),
            Location::Text { path, line, column } => (path, *line, *column),
        }
    }

    /// Same file and line — the granularity used for conflict arbitration.
    pub fn same_site(&self, other: &Location) -> bool {
        match (self, other) {
            (
                Location::Text { path: p1, line: l1, .. },
                Location::Text { path: p2, line: l2, .. },
            ) => p1 == p2 && l1 == l2,
            (Location::File { path: p1 }, Location::File { path: p2 }) => p1 == p2,
            _ => false,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Text { path, line, column } => write!(f, "{path}:{line}:{column}"),
            Location::File { path } => write!(f, "file:{path}"),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One detected rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule_id: String,
    pub severity: Severity,
    pub location: Location,
    /// Human-readable message drawn from the rule title.
    pub message: String,
    /// Set by arbitration when a lower-tier conflicting rule won at the
    /// same site. The violation stays listed but no longer blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
}

impl Violation {
    /// Blocking and not superseded — the condition that fails a check.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking && self.superseded_by.is_none()
    }
}

/// The structured result of one check invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// False iff at least one blocking, non-superseded violation exists.
    pub ok: bool,
    pub loaded_modules: Vec<String>,
    /// Fully enumerated, ordered by (path, line, column, rule id).
    pub violations: Vec<Violation>,
    pub duplicate_warnings: Vec<DuplicateRuleWarning>,
}

impl CheckReport {
    pub fn blocking_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_blocking()).count()
    }

    /// Advisory violations plus superseded ones (which no longer block).
    pub fn advisory_count(&self) -> usize {
        self.violations.len() - self.blocking_count()
    }
}
