//! Shared fixture catalog for the analysis tests.

use tenet_catalog::{CatalogLoader, ChangeDescriptor, ChangeFile, RuleCatalog};

pub const BASE: &str = r#"
id = "base"
rank = 0

[triggers]
gateway_paths = ["**/gateway/**"]

[[rules]]
id = "no-empty-handler"
title = "Error handlers must not be empty"
body = "Swallowed errors hide defects."
pillar = "error-handling"
precedence_tier = 1

[[rules.patterns]]
kind = "forbidden"
severity = "blocking"
pattern = 'catch\s*(\([^)]*\))?\s*\{\s*\}'

[[rules]]
id = "no-fallback-masking"
title = "No boundary-masking fallbacks outside gateways"
body = "Past the gateway, absence is a defect and must fail loudly."
pillar = "error-handling"
precedence_tier = 1

[[rules.patterns]]
kind = "forbidden"
severity = "blocking"
pattern = '\?\.[^\n]*?(\|\||\?\?)'
outside_gateway_only = true

[[rules]]
id = "file-length-limit"
title = "Files must stay under 1000 lines"
body = "Split oversized files."
pillar = "architecture"
precedence_tier = 3

[[rules.patterns]]
kind = "max_lines"
severity = "blocking"
threshold = 1000

[[rules]]
id = "no-version-suffix"
title = "No version-suffixed identifiers"
body = "Replace implementations instead of suffixing new ones."
pillar = "architecture"
precedence_tier = 2

[[rules.patterns]]
kind = "identifier_suffix"
severity = "blocking"
suffixes = ['V\d+', "Legacy"]
allowed_paths = ["**/migrations/**"]

[[rules]]
id = "guard-clauses"
title = "Prefer guard clauses over else blocks"
body = "Flatten control flow with early returns."
pillar = "architecture"
precedence_tier = 2

[[rules.patterns]]
kind = "forbidden"
severity = "blocking"
pattern = '\belse\s*\{'

[[rules]]
id = "business-logic-pure"
title = "Business logic is pure"
body = "Not statically decidable."
pillar = "architecture"
precedence_tier = 2
"#;

pub const UI: &str = r#"
id = "ui"
rank = 1

[triggers]
keywords = ["ui", "frontend"]
paths = ["**/components/**", "**/*.tsx"]

[[rules]]
id = "stable-callbacks"
title = "Callbacks passed to memoized components must be stable"
body = "Inline closures defeat memoization."
pillar = "performance"
precedence_tier = 4

[[rules.patterns]]
kind = "forbidden"
severity = "advisory"
pattern = 'on[A-Z][A-Za-z]*=\{\s*(async\s*)?\([^)]*\)\s*=>'
"#;

pub const BACKEND: &str = r#"
id = "backend-data"
rank = 2

[triggers]
keywords = ["backend", "database"]
paths = ["**/db/**"]

[[rules]]
id = "no-sql-concat"
title = "No string-concatenated SQL"
body = "Parameterize queries, always."
pillar = "security"
precedence_tier = 1

[[rules.patterns]]
kind = "forbidden"
severity = "blocking"
pattern = '(?i)\b(select|insert|update|delete)\b[^\n]*"\s*\+'
"#;

pub const STYLE: &str = r#"
id = "style"
rank = 3

[triggers]
keywords = ["style"]

[[rules]]
id = "single-exit"
title = "Functions have a single exit point"
body = "Declared in conflict with guard-clauses for arbitration."
pillar = "cosmetics"
precedence_tier = 5
conflicts_with = ["guard-clauses"]

[[rules.patterns]]
kind = "forbidden"
severity = "blocking"
pattern = '\belse\s*\{'
"#;

pub fn catalog() -> RuleCatalog {
    CatalogLoader::load_from_sources(&[
        ("base.toml", BASE),
        ("ui.toml", UI),
        ("backend-data.toml", BACKEND),
        ("style.toml", STYLE),
    ])
    .unwrap()
}

pub fn descriptor(tags: &[&str], files: &[(&str, &str)]) -> ChangeDescriptor {
    ChangeDescriptor::new(
        tags.iter().map(|t| t.to_string()).collect(),
        files
            .iter()
            .map(|(path, content)| ChangeFile {
                path: path.to_string(),
                content: content.to_string(),
            })
            .collect(),
    )
}
