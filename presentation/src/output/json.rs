//! JSON output formatter

use crate::output::formatter::{OutputFormatter, ReportEntry};
use mindat_query_domain::GenerationOutput;

/// Formats reports as pretty-printed JSON
///
/// Without validation the document is the plain result sequence; with
/// validation each element pairs the result with its validation.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, _query: &str, entries: &[ReportEntry]) -> String {
        let document = if entries.iter().all(|entry| entry.validation.is_none()) {
            let results: Vec<&GenerationOutput> = entries.iter().map(|e| &e.result).collect();
            serde_json::to_string_pretty(&results)
        } else {
            serde_json::to_string_pretty(entries)
        };
        document.unwrap_or_else(|_| "[]".to_string())
    }
}
