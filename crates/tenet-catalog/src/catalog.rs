//! The immutable, process-wide rule catalog.

use rustc_hash::FxHashMap;
use tracing::info;

use tenet_core::errors::CatalogError;

use crate::model::{Module, Rule};

/// All loaded modules and their rules. Built once, never mutated;
/// shareable across threads without synchronization.
#[derive(Debug)]
pub struct RuleCatalog {
    /// Modules sorted by rank ascending (base first).
    modules: Vec<Module>,
    /// Rule id -> (module index, rule index). When the same id is
    /// declared by several modules, the highest-rank declaration wins,
    /// matching active-set resolution.
    index: FxHashMap<String, (usize, usize)>,
}

impl RuleCatalog {
    /// Validate cross-module invariants and build the catalog.
    pub fn from_modules(mut modules: Vec<Module>) -> Result<Self, CatalogError> {
        for (i, module) in modules.iter().enumerate() {
            if modules[..i].iter().any(|m| m.id == module.id) {
                return Err(CatalogError::DuplicateModuleId {
                    module_id: module.id.clone(),
                });
            }
            if let Some(clash) = modules[..i].iter().find(|m| m.rank == module.rank) {
                return Err(CatalogError::DuplicateModuleRank {
                    rank: module.rank,
                    first: clash.id.clone(),
                    second: module.id.clone(),
                });
            }
        }
        if !modules.iter().any(|m| m.is_base()) {
            return Err(CatalogError::NoBaseModule);
        }

        modules.sort_by_key(|m| m.rank);

        let mut index = FxHashMap::default();
        for (mi, module) in modules.iter().enumerate() {
            for (ri, rule) in module.rules.iter().enumerate() {
                // Insert in rank order so later modules overwrite.
                index.insert(rule.id.clone(), (mi, ri));
            }
        }

        let catalog = Self { modules, index };
        info!(
            modules = catalog.modules.len(),
            rules = catalog.index.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// All modules, rank ascending.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// The always-active base module.
    pub fn base_module(&self) -> &Module {
        // from_modules guarantees a base module exists and sorts it first.
        &self.modules[0]
    }

    /// Look up a rule by id. For ids declared by several modules this
    /// returns the highest-rank declaration (the resolution winner).
    pub fn get_rule(&self, id: &str) -> Result<&Rule, CatalogError> {
        self.index
            .get(id)
            .map(|&(mi, ri)| &self.modules[mi].rules[ri])
            .ok_or_else(|| CatalogError::RuleNotFound {
                rule_id: id.to_string(),
            })
    }

    /// All rules, deduplicated by id, sorted by (precedence tier, id).
    pub fn all_rules(&self) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self
            .index
            .values()
            .map(|&(mi, ri)| &self.modules[mi].rules[ri])
            .collect();
        rules.sort_by(|a, b| {
            a.precedence_tier
                .cmp(&b.precedence_tier)
                .then_with(|| a.id.cmp(&b.id))
        });
        rules
    }

    /// Rules that carry no machine-checkable signature. They are loaded
    /// and listed but never produce violations.
    pub fn unchecked_rules(&self) -> Vec<&Rule> {
        self.all_rules()
            .into_iter()
            .filter(|r| r.is_unchecked())
            .collect()
    }

    /// Total distinct rule ids.
    pub fn rule_count(&self) -> usize {
        self.index.len()
    }
}
