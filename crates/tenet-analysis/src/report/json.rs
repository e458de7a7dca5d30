//! JSON reporter — the machine-readable report structure.

use super::Reporter;
use crate::check::CheckReport;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &CheckReport) -> Result<String, String> {
        serde_json::to_string_pretty(report).map_err(|e| e.to_string())
    }
}
