//! Compiled catalog model.
//!
//! These are the post-validation types: regexes and globs are already
//! compiled, every required field is present. The raw TOML-facing
//! definitions live in `loader`.

use globset::GlobSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Violation severity attached to each pattern spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the overall check.
    Blocking,
    /// Reported, never fails the check.
    Advisory,
}

impl Severity {
    /// Parse from the catalog's string form.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "blocking" => Some(Severity::Blocking),
            "advisory" => Some(Severity::Advisory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Blocking => "blocking",
            Severity::Advisory => "advisory",
        }
    }
}

/// Thematic grouping of a rule. Informational only, never enforced.
pub type Pillar = String;

/// A machine-checkable signature owned by one rule.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub severity: Severity,
    pub kind: PatternKind,
}

/// The detection signature itself.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Content must not match `regex`. With `outside_gateway_only`,
    /// matches inside gateway regions or gateway-designated files are
    /// exempt.
    Forbidden {
        regex: Regex,
        outside_gateway_only: bool,
    },
    /// Whole-file line count must not strictly exceed `threshold`.
    MaxLines { threshold: usize },
    /// Identifiers must not end in one of `suffixes`, except in files
    /// matching `allowed_paths` (persisted-schema contexts).
    IdentifierSuffix {
        regex: Regex,
        suffixes: SmallVec<[String; 2]>,
        allowed_paths: GlobSet,
        allowed_paths_raw: Vec<String>,
    },
}

impl PatternKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PatternKind::Forbidden { .. } => "forbidden",
            PatternKind::MaxLines { .. } => "max_lines",
            PatternKind::IdentifierSuffix { .. } => "identifier_suffix",
        }
    }
}

/// One guideline rule, owned by exactly one authoring module.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub title: String,
    pub body: String,
    pub pillar: Pillar,
    /// Lower tier wins when two rules conflict.
    pub precedence_tier: u32,
    /// Rule ids this rule is declared mutually exclusive with.
    pub conflicts_with: Vec<String>,
    /// Empty for advisory-only rules that admit no static signature;
    /// such rules are flagged "unchecked" and never produce violations.
    pub patterns: Vec<PatternSpec>,
    /// Id of the module that declared this rule.
    pub module: String,
}

impl Rule {
    /// A rule with no machine-checkable signature.
    pub fn is_unchecked(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Activation triggers for a non-base module.
#[derive(Debug, Clone, Default)]
pub struct Triggers {
    /// Case-insensitive substrings matched against tags and path segments.
    pub keywords: Vec<String>,
    /// Path globs matched against touched file paths.
    pub path_globs: GlobSet,
    pub path_globs_raw: Vec<String>,
    /// Files matching these globs are gateway contexts: checks marked
    /// `outside_gateway_only` skip them entirely.
    pub gateway_paths: GlobSet,
    pub gateway_paths_raw: Vec<String>,
}

/// A rule module: the base module (rank 0) is always active, the rest
/// activate when a trigger matches the change scope.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: String,
    /// Fixed ordering used for duplicate-id resolution; base is 0.
    pub rank: u32,
    pub triggers: Triggers,
    pub rules: Vec<Rule>,
}

impl Module {
    pub fn is_base(&self) -> bool {
        self.rank == 0
    }
}

/// One file of a proposed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeFile {
    pub path: String,
    /// Full text or diff hunks; line counts are derived from this.
    pub content: String,
}

impl ChangeFile {
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// Caller-supplied description of one task/change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeDescriptor {
    /// Declared domain tags, e.g. "ui", "backend-data".
    pub tags: Vec<String>,
    pub files: Vec<ChangeFile>,
}

impl ChangeDescriptor {
    pub fn new(tags: Vec<String>, files: Vec<ChangeFile>) -> Self {
        Self { tags, files }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.files.is_empty()
    }
}
