//! tenet — route guideline modules onto a change and check it.
//!
//! Usage:
//!   tenet check src/a.ts src/b.ts --tag ui     → check files, exit 0/1
//!   tenet check --format json ...              → machine-readable report
//!   tenet rules                                → list the loaded catalog
//!
//! Exit codes: 0 = compliant, 1 = blocking violations, 2 = the rule
//! system itself failed to load (config or catalog error), 3 = the
//! invocation was unusable (no inputs, unreadable input file).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tenet_analysis::{create_reporter, ActiveRuleSet, PatternChecker, SessionLog, TriggerMatcher};
use tenet_catalog::{CatalogLoader, ChangeDescriptor, ChangeFile, RuleCatalog};
use tenet_core::config::{CliOverrides, EngineConfig};
use tenet_core::errors::{CheckError, TenetErrorCode};

const EXIT_OK: u8 = 0;
const EXIT_BLOCKED: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_USAGE: u8 = 3;

#[derive(Parser)]
#[command(
    name = "tenet",
    about = "Catalog-driven guideline checks for proposed changes",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Rules directory (default: $TENET_RULES_DIR, then ./rules)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files against the active rule set
    Check {
        /// Files to scan
        paths: Vec<PathBuf>,

        /// Declared touched-area tags (e.g. ui, backend)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Report format: console or json
        #[arg(long)]
        format: Option<String>,

        /// Print the recorded session summary after the report
        #[arg(long)]
        session_summary: bool,

        /// Disable color in console output
        #[arg(long)]
        no_color: bool,
    },
    /// List the loaded catalog
    Rules {
        /// Only list rules with no machine-checkable signature
        #[arg(long)]
        unchecked: bool,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let overrides = CliOverrides {
        rules_dir: cli.rules.clone(),
        format: match &cli.command {
            Commands::Check { format, .. } => format.clone(),
            Commands::Rules { .. } => None,
        },
    };

    let config = match EngineConfig::load(Path::new("."), Some(&overrides)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", e.error_code());
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let catalog = match CatalogLoader::load_dir(&config.rules_dir()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}: {e}", e.error_code());
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match cli.command {
        Commands::Check {
            paths,
            tag,
            session_summary,
            no_color,
            ..
        } => run_check(&config, &catalog, paths, tag, session_summary, no_color),
        Commands::Rules { unchecked } => run_rules(&catalog, unchecked),
    }
}

fn run_check(
    config: &EngineConfig,
    catalog: &RuleCatalog,
    paths: Vec<PathBuf>,
    tags: Vec<String>,
    session_summary: bool,
    no_color: bool,
) -> ExitCode {
    let descriptor = match build_descriptor(paths, tags) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            // Input problems are the caller's, not the catalog's;
            // keep EXIT_CONFIG for a broken rule system only.
            eprintln!("{}: {e}", e.error_code());
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let matcher = TriggerMatcher::new(catalog);
    let active = ActiveRuleSet::resolve(matcher.select_modules(&descriptor));
    let checker = PatternChecker::from_config(config);
    let report = checker.check(&descriptor, &active);

    let mut log = SessionLog::new();
    let entry = log.record(&descriptor, &active, &report);
    let summary = entry.summarize();

    let output = match config.format() {
        "console" if no_color => {
            use tenet_analysis::Reporter;
            tenet_analysis::report::console::ConsoleReporter::new(false).generate(&report)
        }
        format => {
            // Format names were validated when the config resolved.
            let reporter = match create_reporter(format) {
                Some(reporter) => reporter,
                None => {
                    eprintln!("unknown report format '{format}'");
                    return ExitCode::from(EXIT_CONFIG);
                }
            };
            reporter.generate(&report)
        }
    };

    match output {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("failed to render report: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    }

    if session_summary {
        match serde_json::to_string(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to render session summary: {e}"),
        }
    }

    if report.ok {
        ExitCode::from(EXIT_OK)
    } else {
        ExitCode::from(EXIT_BLOCKED)
    }
}

fn run_rules(catalog: &RuleCatalog, unchecked_only: bool) -> ExitCode {
    for rule in catalog.all_rules() {
        if unchecked_only && !rule.is_unchecked() {
            continue;
        }
        let checked = if rule.is_unchecked() {
            " (unchecked)"
        } else {
            ""
        };
        println!(
            "tier {} [{}] {} — {}{}",
            rule.precedence_tier, rule.module, rule.id, rule.title, checked
        );
    }
    ExitCode::from(EXIT_OK)
}

fn build_descriptor(
    paths: Vec<PathBuf>,
    tags: Vec<String>,
) -> Result<ChangeDescriptor, CheckError> {
    if paths.is_empty() && tags.is_empty() {
        return Err(CheckError::EmptyDescriptor);
    }
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content =
            std::fs::read_to_string(&path).map_err(|e| CheckError::UnreadableInput {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        files.push(ChangeFile {
            path: path.display().to_string(),
            content,
        });
    }
    Ok(ChangeDescriptor::new(tags, files))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenet=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
