//! Output formatter trait

use mindat_query_domain::{GenerationOutput, ValidationResult};
use serde::Serialize;

/// One generation result, with its validation when one was run
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub result: GenerationOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
}

impl ReportEntry {
    pub fn new(result: GenerationOutput) -> Self {
        Self {
            result,
            validation: None,
        }
    }

    pub fn with_validation(mut self, validation: ValidationResult) -> Self {
        self.validation = Some(validation);
        self
    }
}

/// Trait for formatting generation reports
pub trait OutputFormatter {
    /// Format every entry produced for `query`
    fn format(&self, query: &str, entries: &[ReportEntry]) -> String;
}
