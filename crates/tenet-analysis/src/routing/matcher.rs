//! Module selection from change metadata.
//!
//! Binary inclusion, no scoring: a non-base module activates iff at
//! least one of its trigger keywords or path globs matches the change.

use aho_corasick::AhoCorasick;
use tracing::debug;

use tenet_catalog::{ChangeDescriptor, Module, RuleCatalog};

/// Routes a change descriptor to the set of active modules.
///
/// Keyword automata are compiled once per catalog; selection itself is
/// a pure function of the descriptor.
pub struct TriggerMatcher<'c> {
    catalog: &'c RuleCatalog,
    /// One case-insensitive automaton per module, aligned with
    /// `catalog.modules()`. `None` when a module declares no keywords.
    keyword_sets: Vec<Option<AhoCorasick>>,
}

impl<'c> TriggerMatcher<'c> {
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        let keyword_sets = catalog
            .modules()
            .iter()
            .map(|module| {
                if module.triggers.keywords.is_empty() {
                    return None;
                }
                let ac = AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&module.triggers.keywords)
                    .expect("trigger keywords are non-empty literals, validated at load");
                Some(ac)
            })
            .collect();
        Self {
            catalog,
            keyword_sets,
        }
    }

    /// Select active modules for the change, in module-rank order.
    /// The base module is always first.
    pub fn select_modules(&self, descriptor: &ChangeDescriptor) -> Vec<&'c Module> {
        let mut selected = Vec::new();
        for (i, module) in self.catalog.modules().iter().enumerate() {
            if module.is_base() || self.module_matches(module, &self.keyword_sets[i], descriptor) {
                selected.push(module);
            }
        }
        debug!(
            modules = ?selected.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            tags = ?descriptor.tags,
            "selected modules"
        );
        selected
    }

    fn module_matches(
        &self,
        module: &Module,
        keywords: &Option<AhoCorasick>,
        descriptor: &ChangeDescriptor,
    ) -> bool {
        if let Some(ac) = keywords {
            for tag in &descriptor.tags {
                if ac.is_match(tag.as_str()) {
                    return true;
                }
            }
            for file in &descriptor.files {
                if ac.is_match(file.path.as_str()) {
                    return true;
                }
            }
        }
        if !module.triggers.path_globs_raw.is_empty() {
            for file in &descriptor.files {
                if module.triggers.path_globs.is_match(file.path.as_str()) {
                    return true;
                }
            }
        }
        false
    }
}
