//! Per-check compiled view of the active set.
//!
//! Forbidden-pattern regexes are additionally gathered into one
//! `RegexSet` so each file takes a single prefilter pass; only the
//! specs that actually hit are then re-run for match positions.

use regex::RegexSet;

use tenet_catalog::{PatternKind, Rule, Severity};

use crate::ruleset::ActiveRuleSet;

pub(crate) struct ForbiddenCheck<'c> {
    pub rule: &'c Rule,
    pub severity: Severity,
    pub regex: &'c regex::Regex,
    pub outside_gateway_only: bool,
}

pub(crate) struct MaxLinesCheck<'c> {
    pub rule: &'c Rule,
    pub severity: Severity,
    pub threshold: usize,
}

pub(crate) struct SuffixCheck<'c> {
    pub rule: &'c Rule,
    pub severity: Severity,
    pub regex: &'c regex::Regex,
    pub allowed_paths: &'c globset::GlobSet,
    pub has_allowed_paths: bool,
}

/// Flattened, compiled spec lists for one active set.
pub(crate) struct CompiledActiveSet<'c> {
    pub forbidden: Vec<ForbiddenCheck<'c>>,
    /// Indices aligned with `forbidden`.
    pub prefilter: Option<RegexSet>,
    pub max_lines: Vec<MaxLinesCheck<'c>>,
    pub suffix: Vec<SuffixCheck<'c>>,
}

impl<'c> CompiledActiveSet<'c> {
    pub fn build(active: &ActiveRuleSet<'c>) -> Self {
        let mut forbidden = Vec::new();
        let mut max_lines = Vec::new();
        let mut suffix = Vec::new();

        for &rule in active.rules() {
            for spec in &rule.patterns {
                match &spec.kind {
                    PatternKind::Forbidden {
                        regex,
                        outside_gateway_only,
                    } => forbidden.push(ForbiddenCheck {
                        rule,
                        severity: spec.severity,
                        regex,
                        outside_gateway_only: *outside_gateway_only,
                    }),
                    PatternKind::MaxLines { threshold } => max_lines.push(MaxLinesCheck {
                        rule,
                        severity: spec.severity,
                        threshold: *threshold,
                    }),
                    PatternKind::IdentifierSuffix {
                        regex,
                        allowed_paths,
                        allowed_paths_raw,
                        ..
                    } => suffix.push(SuffixCheck {
                        rule,
                        severity: spec.severity,
                        regex,
                        allowed_paths,
                        has_allowed_paths: !allowed_paths_raw.is_empty(),
                    }),
                }
            }
        }

        // Every pattern compiled individually at catalog load; the
        // combined set can only fail on pathological size limits, in
        // which case the per-spec regexes still run unfiltered.
        let prefilter = if forbidden.is_empty() {
            None
        } else {
            RegexSet::new(forbidden.iter().map(|c| c.regex.as_str())).ok()
        };

        Self {
            forbidden,
            prefilter,
            max_lines,
            suffix,
        }
    }

    pub fn needs_gateway_scan(&self) -> bool {
        self.forbidden.iter().any(|c| c.outside_gateway_only)
    }
}
