//! Request-scoped resolved rule view.

use serde::Serialize;
use tracing::warn;

use tenet_catalog::{Module, Rule};

use crate::check::Violation;

/// Recorded when two selected modules declare the same rule id.
/// Informational, never fatal, never dropped from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRuleWarning {
    pub rule_id: String,
    pub winner_module: String,
    pub loser_module: String,
}

/// The deduplicated, precedence-ordered rule set for one change.
/// Derived per request, never persisted.
pub struct ActiveRuleSet<'c> {
    modules: Vec<&'c Module>,
    /// Sorted by (precedence tier, id).
    rules: Vec<&'c Rule>,
    warnings: Vec<DuplicateRuleWarning>,
}

impl<'c> ActiveRuleSet<'c> {
    /// Resolve the selected modules into one rule set.
    ///
    /// `selected` must be in module-rank order (as produced by the
    /// matcher). On duplicate ids the later module wins and a
    /// `DuplicateRuleWarning` is recorded.
    pub fn resolve(selected: Vec<&'c Module>) -> Self {
        let mut winners: Vec<&'c Rule> = Vec::new();
        let mut warnings = Vec::new();

        for &module in &selected {
            for rule in &module.rules {
                if let Some(existing) = winners.iter_mut().find(|r| r.id == rule.id) {
                    warn!(
                        rule = %rule.id,
                        winner = %module.id,
                        loser = %existing.module,
                        "duplicate rule id; later module wins"
                    );
                    warnings.push(DuplicateRuleWarning {
                        rule_id: rule.id.clone(),
                        winner_module: module.id.clone(),
                        loser_module: existing.module.clone(),
                    });
                    *existing = rule;
                } else {
                    winners.push(rule);
                }
            }
        }

        winners.sort_by(|a, b| {
            a.precedence_tier
                .cmp(&b.precedence_tier)
                .then_with(|| a.id.cmp(&b.id))
        });

        Self {
            modules: selected,
            rules: winners,
            warnings,
        }
    }

    /// Active rules, (tier, id) order.
    pub fn rules(&self) -> &[&'c Rule] {
        &self.rules
    }

    pub fn modules(&self) -> &[&'c Module] {
        &self.modules
    }

    pub fn module_ids(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.id.clone()).collect()
    }

    pub fn warnings(&self) -> &[DuplicateRuleWarning] {
        &self.warnings
    }

    pub fn get(&self, rule_id: &str) -> Option<&'c Rule> {
        self.rules.iter().find(|r| r.id == rule_id).copied()
    }

    /// Whether a path is a designated gateway context for any active module.
    pub fn is_gateway_path(&self, path: &str) -> bool {
        self.modules.iter().any(|m| {
            !m.triggers.gateway_paths_raw.is_empty() && m.triggers.gateway_paths.is_match(path)
        })
    }

    /// Arbitrate conflicting violations in place.
    ///
    /// Two violations conflict when they sit at the same file and line
    /// and their rules are declared mutually exclusive via
    /// `conflicts_with`. The lower precedence tier wins; the loser is
    /// annotated as superseded (and stops counting toward failure)
    /// rather than being dropped.
    pub fn arbitrate(&self, violations: &mut [Violation]) {
        for i in 0..violations.len() {
            for j in (i + 1)..violations.len() {
                if !violations[i].location.same_site(&violations[j].location) {
                    continue;
                }
                let (Some(a), Some(b)) = (
                    self.get(&violations[i].rule_id),
                    self.get(&violations[j].rule_id),
                ) else {
                    continue;
                };
                if a.id == b.id || !Self::declared_conflict(a, b) {
                    continue;
                }
                // Equal tiers stay unresolved on purpose: both remain in force.
                let (winner_idx, loser_idx) = if a.precedence_tier < b.precedence_tier {
                    (i, j)
                } else if b.precedence_tier < a.precedence_tier {
                    (j, i)
                } else {
                    continue;
                };
                let winner = self.get(&violations[winner_idx].rule_id);
                if let Some(winner) = winner {
                    violations[loser_idx].superseded_by = Some(format!(
                        "superseded by tier-{} rule '{}'",
                        winner.precedence_tier, winner.id
                    ));
                }
            }
        }
    }

    fn declared_conflict(a: &Rule, b: &Rule) -> bool {
        a.conflicts_with.iter().any(|id| id == &b.id)
            || b.conflicts_with.iter().any(|id| id == &a.id)
    }
}
