//! tenet-analysis — the request-scoped half of the engine.
//!
//! Control flow per change: `TriggerMatcher` selects modules from the
//! immutable catalog, `ActiveRuleSet::resolve` dedupes and orders their
//! rules, `PatternChecker::check` scans the change's files, and the
//! outcome can be appended to a `SessionLog` and rendered by a
//! `Reporter`. Everything here is derived per request and discarded;
//! nothing mutates the catalog.

pub mod check;
pub mod report;
pub mod routing;
pub mod ruleset;
pub mod session;

pub use check::{CheckReport, Location, PatternChecker, Violation};
pub use report::{create_reporter, Reporter};
pub use routing::TriggerMatcher;
pub use ruleset::{ActiveRuleSet, DuplicateRuleWarning};
pub use session::{LogEntry, SessionLog, SessionSummary};
