//! Console reporter — human-readable output with color codes.

use tenet_catalog::Severity;

use super::Reporter;
use crate::check::CheckReport;

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn severity_prefix(&self, severity: &Severity) -> &'static str {
        match severity {
            Severity::Blocking => "blocking",
            Severity::Advisory => "advisory",
        }
    }

    fn color_start(&self, severity: &Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Blocking => "\x1b[31m", // red
            Severity::Advisory => "\x1b[33m", // yellow
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &CheckReport) -> Result<String, String> {
        let mut output = String::new();

        output.push_str(&format!(
            "Modules: {}\n\n",
            report.loaded_modules.join(", ")
        ));

        for warning in &report.duplicate_warnings {
            output.push_str(&format!(
                "⚠ duplicate rule id '{}': '{}' overrides '{}'\n",
                warning.rule_id, warning.winner_module, warning.loser_module
            ));
        }
        if !report.duplicate_warnings.is_empty() {
            output.push('\n');
        }

        for violation in &report.violations {
            let prefix = self.severity_prefix(&violation.severity);
            let cs = self.color_start(&violation.severity);
            let ce = self.color_end();
            let superseded = match &violation.superseded_by {
                Some(note) => format!(" [{note}]"),
                None => String::new(),
            };
            output.push_str(&format!(
                "  {cs}{prefix}{ce} {}: [{}] {}{superseded}\n",
                violation.location, violation.rule_id, violation.message,
            ));
        }

        output.push_str(&format!(
            "\n─── {} blocking, {} advisory ───\n",
            report.blocking_count(),
            report.advisory_count()
        ));
        if report.ok {
            output.push_str("Result: OK ✓\n");
        } else {
            output.push_str("Result: BLOCKED ✗\n");
        }

        Ok(output)
    }
}
