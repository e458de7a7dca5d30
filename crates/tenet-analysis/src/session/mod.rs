//! Session log — append-only trace of which modules and rules applied.
//!
//! In-memory unless the caller persists the serialized entries; prior
//! entries are never mutated (forward-only history).

use serde::Serialize;

use tenet_catalog::ChangeDescriptor;

use crate::check::CheckReport;
use crate::ruleset::ActiveRuleSet;

/// One recorded check, immutable once appended.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub sequence: u64,
    pub touched_areas: Vec<String>,
    pub loaded_modules: Vec<String>,
    /// Ids of the rules that were active for this check.
    pub applied_rules: Vec<String>,
    /// Blocking, non-superseded violations.
    pub blocking_count: usize,
    /// Advisory violations plus superseded ones.
    pub advisory_count: usize,
    pub ok: bool,
}

impl LogEntry {
    pub fn summarize(&self) -> SessionSummary {
        SessionSummary {
            touched_areas: self.touched_areas.clone(),
            loaded_modules: self.loaded_modules.clone(),
            blocking_count: self.blocking_count,
            advisory_count: self.advisory_count,
        }
    }
}

/// Condensed view of one log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub touched_areas: Vec<String>,
    pub loaded_modules: Vec<String>,
    pub blocking_count: usize,
    pub advisory_count: usize,
}

/// Append-only, in-memory log of checks for one process session.
#[derive(Debug, Default)]
pub struct SessionLog {
    entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry and return a reference to it.
    pub fn record(
        &mut self,
        descriptor: &ChangeDescriptor,
        active: &ActiveRuleSet<'_>,
        report: &CheckReport,
    ) -> &LogEntry {
        let entry = LogEntry {
            sequence: self.entries.len() as u64,
            touched_areas: descriptor.tags.clone(),
            loaded_modules: active.module_ids(),
            applied_rules: active.rules().iter().map(|r| r.id.clone()).collect(),
            blocking_count: report.blocking_count(),
            advisory_count: report.advisory_count(),
            ok: report.ok,
        };
        self.entries.push(entry);
        // Just pushed, so the log is non-empty.
        self.entries.last().unwrap()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
