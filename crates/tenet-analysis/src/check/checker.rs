//! The pattern checker.
//!
//! `check` is a pure function of (descriptor, active set): no I/O, no
//! catalog mutation, byte-identical output on repeated invocation.
//! Files are scanned on rayon workers; ordering is restored before the
//! report is assembled.

use rayon::prelude::*;
use tracing::debug;

use tenet_catalog::{ChangeDescriptor, ChangeFile};
use tenet_core::config::engine_config::{DEFAULT_GATEWAY_END, DEFAULT_GATEWAY_START};
use tenet_core::config::EngineConfig;

use super::compiled::CompiledActiveSet;
use super::gateway::GatewayRegions;
use super::types::{CheckReport, Location, Violation};
use crate::ruleset::ActiveRuleSet;

/// Applies the active set's pattern specs to change content.
pub struct PatternChecker {
    gateway_start: String,
    gateway_end: String,
}

impl PatternChecker {
    pub fn new() -> Self {
        Self::with_markers(DEFAULT_GATEWAY_START, DEFAULT_GATEWAY_END)
    }

    pub fn with_markers(start: &str, end: &str) -> Self {
        Self {
            gateway_start: start.to_string(),
            gateway_end: end.to_string(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let (start, end) = config.gateway_markers();
        Self::with_markers(start, end)
    }

    /// Check all files of the change against the active rule set.
    pub fn check(&self, descriptor: &ChangeDescriptor, active: &ActiveRuleSet<'_>) -> CheckReport {
        let compiled = CompiledActiveSet::build(active);

        let mut violations: Vec<Violation> = descriptor
            .files
            .par_iter()
            .map(|file| self.check_file(file, &compiled, active))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        violations.sort_by(|a, b| {
            a.location
                .sort_key()
                .cmp(&b.location.sort_key())
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });

        active.arbitrate(&mut violations);

        let ok = !violations.iter().any(Violation::is_blocking);
        debug!(
            files = descriptor.files.len(),
            violations = violations.len(),
            ok,
            "check complete"
        );

        CheckReport {
            ok,
            loaded_modules: active.module_ids(),
            violations,
            duplicate_warnings: active.warnings().to_vec(),
        }
    }

    fn check_file(
        &self,
        file: &ChangeFile,
        compiled: &CompiledActiveSet<'_>,
        active: &ActiveRuleSet<'_>,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        let content = file.content.as_str();
        let line_starts = line_starts(content);

        let gateway_file = active.is_gateway_path(&file.path);
        let regions = if compiled.needs_gateway_scan() && !gateway_file {
            GatewayRegions::scan(content, &self.gateway_start, &self.gateway_end)
        } else {
            GatewayRegions::default()
        };

        // Forbidden patterns: one RegexSet prefilter pass, then exact
        // positions only for the patterns that hit.
        let hits: Vec<usize> = match &compiled.prefilter {
            Some(set) => set.matches(content).into_iter().collect(),
            None => (0..compiled.forbidden.len()).collect(),
        };
        for idx in hits {
            let check = &compiled.forbidden[idx];
            if check.outside_gateway_only && gateway_file {
                continue;
            }
            for m in check.regex.find_iter(content) {
                let (line, column) = offset_to_line_col(&line_starts, m.start());
                if check.outside_gateway_only && regions.contains_line(line) {
                    continue;
                }
                violations.push(Violation {
                    rule_id: check.rule.id.clone(),
                    severity: check.severity,
                    location: Location::Text {
                        path: file.path.clone(),
                        line,
                        column,
                    },
                    message: check.rule.title.clone(),
                    superseded_by: None,
                });
            }
        }

        // Whole-file line-count ceilings.
        let count = file.line_count();
        for check in &compiled.max_lines {
            if count > check.threshold {
                violations.push(Violation {
                    rule_id: check.rule.id.clone(),
                    severity: check.severity,
                    location: Location::File {
                        path: file.path.clone(),
                    },
                    message: format!(
                        "{} ({} lines, limit {})",
                        check.rule.title, count, check.threshold
                    ),
                    superseded_by: None,
                });
            }
        }

        // Version-suffixed identifiers outside allowed schema contexts.
        for check in &compiled.suffix {
            if check.has_allowed_paths && check.allowed_paths.is_match(file.path.as_str()) {
                continue;
            }
            for m in check.regex.find_iter(content) {
                let (line, column) = offset_to_line_col(&line_starts, m.start());
                violations.push(Violation {
                    rule_id: check.rule.id.clone(),
                    severity: check.severity,
                    location: Location::Text {
                        path: file.path.clone(),
                        line,
                        column,
                    },
                    message: format!("{} ('{}')", check.rule.title, m.as_str()),
                    superseded_by: None,
                });
            }
        }

        violations
    }
}

impl Default for PatternChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offsets of each line start, for offset -> (line, column) mapping.
fn line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// 1-based line and byte column for a byte offset.
fn offset_to_line_col(line_starts: &[usize], offset: usize) -> (u32, u32) {
    let line_idx = match line_starts.binary_search(&offset) {
        Ok(i) => i,
        Err(i) => i - 1,
    };
    let column = offset - line_starts[line_idx] + 1;
    (line_idx as u32 + 1, column as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_line_col() {
        let content = "ab\ncd\nef";
        let starts = line_starts(content);
        assert_eq!(offset_to_line_col(&starts, 0), (1, 1));
        assert_eq!(offset_to_line_col(&starts, 1), (1, 2));
        assert_eq!(offset_to_line_col(&starts, 3), (2, 1));
        assert_eq!(offset_to_line_col(&starts, 7), (3, 2));
    }
}
