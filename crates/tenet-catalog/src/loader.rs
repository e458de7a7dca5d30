//! Declarative TOML module definitions and their compilation.
//!
//! One TOML file per module. Every regex and glob is compiled at load
//! time; the first invalid field aborts the whole load with no partial
//! catalog constructed.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use smallvec::SmallVec;
use tracing::debug;

use tenet_core::errors::CatalogError;

use crate::catalog::RuleCatalog;
use crate::model::{Module, PatternKind, PatternSpec, Rule, Severity, Triggers};

/// A TOML-defined module file.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDef {
    pub id: Option<String>,
    pub rank: Option<u32>,
    #[serde(default)]
    pub triggers: TriggerDef,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// Raw trigger block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerDef {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub gateway_paths: Vec<String>,
}

/// Raw rule block.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDef {
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub pillar: Option<String>,
    pub precedence_tier: Option<u32>,
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<PatternDef>,
}

/// Raw pattern block.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDef {
    pub kind: Option<String>,
    pub severity: Option<String>,
    pub pattern: Option<String>,
    #[serde(default)]
    pub outside_gateway_only: bool,
    pub threshold: Option<usize>,
    #[serde(default)]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub allowed_paths: Vec<String>,
}

/// Loader for TOML module files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load all `*.toml` module files from a directory.
    ///
    /// Files are read in sorted filename order so the load is
    /// deterministic regardless of directory iteration order.
    pub fn load_dir(dir: &Path) -> Result<RuleCatalog, CatalogError> {
        let entries = std::fs::read_dir(dir).map_err(|e| CatalogError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::Io {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sources = Vec::with_capacity(paths.len());
        for path in &paths {
            let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            sources.push((path.display().to_string(), content));
        }

        let borrowed: Vec<(&str, &str)> = sources
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
            .collect();
        Self::load_from_sources(&borrowed)
    }

    /// Load a catalog from in-memory (name, TOML content) pairs.
    pub fn load_from_sources(sources: &[(&str, &str)]) -> Result<RuleCatalog, CatalogError> {
        let mut modules = Vec::with_capacity(sources.len());
        for (name, content) in sources {
            let def: ModuleDef = toml::from_str(content).map_err(|e| CatalogError::ModuleParse {
                path: name.to_string(),
                message: e.to_string(),
            })?;
            modules.push(Self::compile_module(name, def)?);
        }
        RuleCatalog::from_modules(modules)
    }

    /// Compile one raw module definition, validating every field.
    fn compile_module(source: &str, def: ModuleDef) -> Result<Module, CatalogError> {
        let module_id = def.id.ok_or_else(|| CatalogError::MissingField {
            module: source.to_string(),
            rule: "<module>".to_string(),
            field: "id".to_string(),
        })?;
        let rank = def.rank.ok_or_else(|| CatalogError::MissingField {
            module: module_id.clone(),
            rule: "<module>".to_string(),
            field: "rank".to_string(),
        })?;

        let triggers = Self::compile_triggers(&module_id, def.triggers)?;

        let mut rules = Vec::with_capacity(def.rules.len());
        for rule_def in def.rules {
            let rule = Self::compile_rule(&module_id, rule_def)?;
            if rules.iter().any(|r: &Rule| r.id == rule.id) {
                return Err(CatalogError::DuplicateRuleId {
                    module: module_id,
                    rule_id: rule.id,
                });
            }
            rules.push(rule);
        }

        debug!(
            module = %module_id,
            rank,
            rules = rules.len(),
            "compiled module"
        );

        Ok(Module {
            id: module_id,
            rank,
            triggers,
            rules,
        })
    }

    fn compile_triggers(module_id: &str, def: TriggerDef) -> Result<Triggers, CatalogError> {
        for keyword in &def.keywords {
            if keyword.trim().is_empty() {
                return Err(CatalogError::EmptyTriggerKeyword {
                    module: module_id.to_string(),
                });
            }
        }
        // Trigger path globs match case-insensitively; gateway globs
        // name concrete exempt locations and stay exact.
        let path_globs = Self::build_globset(module_id, &def.paths, true)?;
        let gateway_paths = Self::build_globset(module_id, &def.gateway_paths, false)?;
        Ok(Triggers {
            keywords: def.keywords,
            path_globs,
            path_globs_raw: def.paths,
            gateway_paths,
            gateway_paths_raw: def.gateway_paths,
        })
    }

    fn build_globset(
        module_id: &str,
        globs: &[String],
        case_insensitive: bool,
    ) -> Result<GlobSet, CatalogError> {
        let mut builder = GlobSetBuilder::new();
        for raw in globs {
            let glob = GlobBuilder::new(raw)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| CatalogError::InvalidTriggerGlob {
                    module: module_id.to_string(),
                    glob: raw.clone(),
                    message: e.to_string(),
                })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| CatalogError::InvalidTriggerGlob {
            module: module_id.to_string(),
            glob: "<set>".to_string(),
            message: e.to_string(),
        })
    }

    fn compile_rule(module_id: &str, def: RuleDef) -> Result<Rule, CatalogError> {
        let missing = |rule: &str, field: &str| CatalogError::MissingField {
            module: module_id.to_string(),
            rule: rule.to_string(),
            field: field.to_string(),
        };

        let id = def.id.ok_or_else(|| missing("<unnamed>", "id"))?;
        let title = def.title.ok_or_else(|| missing(&id, "title"))?;
        let body = def.body.ok_or_else(|| missing(&id, "body"))?;
        let precedence_tier = def
            .precedence_tier
            .ok_or_else(|| missing(&id, "precedence_tier"))?;
        let pillar = def.pillar.unwrap_or_else(|| "general".to_string());

        let mut patterns = Vec::with_capacity(def.patterns.len());
        for pattern_def in def.patterns {
            patterns.push(Self::compile_pattern(module_id, &id, pattern_def)?);
        }

        Ok(Rule {
            id,
            title,
            body,
            pillar,
            precedence_tier,
            conflicts_with: def.conflicts_with,
            patterns,
            module: module_id.to_string(),
        })
    }

    fn compile_pattern(
        module_id: &str,
        rule_id: &str,
        def: PatternDef,
    ) -> Result<PatternSpec, CatalogError> {
        let severity_str = def.severity.ok_or_else(|| CatalogError::MissingField {
            module: module_id.to_string(),
            rule: rule_id.to_string(),
            field: "severity".to_string(),
        })?;
        let severity =
            Severity::parse_str(&severity_str).ok_or_else(|| CatalogError::InvalidSeverity {
                rule: rule_id.to_string(),
                value: severity_str,
            })?;

        let kind_str = def.kind.ok_or_else(|| CatalogError::MissingField {
            module: module_id.to_string(),
            rule: rule_id.to_string(),
            field: "kind".to_string(),
        })?;

        let invalid = |message: String| CatalogError::InvalidPattern {
            rule: rule_id.to_string(),
            message,
        };

        let kind = match kind_str.as_str() {
            "forbidden" => {
                let raw = def
                    .pattern
                    .ok_or_else(|| invalid("forbidden pattern requires 'pattern'".to_string()))?;
                let regex = regex::Regex::new(&raw)
                    .map_err(|e| invalid(format!("regex error: {e}")))?;
                PatternKind::Forbidden {
                    regex,
                    outside_gateway_only: def.outside_gateway_only,
                }
            }
            "max_lines" => {
                let threshold = def
                    .threshold
                    .ok_or_else(|| invalid("max_lines pattern requires 'threshold'".to_string()))?;
                if threshold == 0 {
                    return Err(invalid("threshold must be greater than 0".to_string()));
                }
                PatternKind::MaxLines { threshold }
            }
            "identifier_suffix" => {
                if def.suffixes.is_empty() {
                    return Err(invalid(
                        "identifier_suffix pattern requires non-empty 'suffixes'".to_string(),
                    ));
                }
                // Suffixes are regex fragments anchored at the end of an
                // identifier, e.g. "V\d+" or "Legacy". The stem may be
                // empty so a bare suffix identifier is still flagged.
                let alternation = def.suffixes.join("|");
                let raw = format!(r"\b[A-Za-z0-9_]*?(?:{alternation})\b");
                let regex = regex::Regex::new(&raw)
                    .map_err(|e| invalid(format!("suffix regex error: {e}")))?;

                let mut builder = GlobSetBuilder::new();
                for raw_glob in &def.allowed_paths {
                    let glob = Glob::new(raw_glob)
                        .map_err(|e| invalid(format!("glob '{raw_glob}': {e}")))?;
                    builder.add(glob);
                }
                let allowed_paths = builder
                    .build()
                    .map_err(|e| invalid(format!("glob set: {e}")))?;

                PatternKind::IdentifierSuffix {
                    regex,
                    suffixes: SmallVec::from_vec(def.suffixes),
                    allowed_paths,
                    allowed_paths_raw: def.allowed_paths,
                }
            }
            other => {
                return Err(invalid(format!(
                    "unknown pattern kind '{other}' (expected 'forbidden', 'max_lines', or 'identifier_suffix')"
                )));
            }
        };

        Ok(PatternSpec { severity, kind })
    }
}
