//! Console output formatter for generation reports

use crate::output::formatter::{OutputFormatter, ReportEntry};
use colored::Colorize;
use mindat_query_domain::{
    ConsensusFailure, GenerationOutput, QueryParameters, ValidationResult, ValidationStatus,
};

/// Formats generation reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every entry produced for `query`
    pub fn format(query: &str, entries: &[ReportEntry]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Mindat Query Parameters"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Request:".cyan().bold(), query));

        for (index, entry) in entries.iter().enumerate() {
            if entries.len() > 1 {
                output.push_str(&Self::section_header(&format!("Result {}", index + 1)));
            } else {
                output.push('\n');
            }
            output.push_str(&Self::format_output(&entry.result));
            if let Some(validation) = &entry.validation {
                output.push_str(&Self::format_validation(validation));
            }
        }

        output.push('\n');
        output.push_str(&Self::footer());
        output
    }

    fn format_output(result: &GenerationOutput) -> String {
        match result {
            GenerationOutput::Params(params) => Self::format_params(params),
            GenerationOutput::Failed(failure) => {
                format!("{} {}\n", "Error:".red().bold(), failure.message)
            }
            GenerationOutput::ConsensusFailed(failure) => Self::format_consensus_failure(failure),
        }
    }

    /// One line per set parameter
    pub fn format_params(params: &QueryParameters) -> String {
        let keys: Vec<String> = params
            .keys()
            .into_iter()
            .filter(|key| params.is_set(key))
            .collect();

        if keys.is_empty() {
            return format!("  {}\n", "(no parameters)".dimmed());
        }

        let width = keys.iter().map(String::len).max().unwrap_or(0);
        let mut output = String::new();
        for key in &keys {
            output.push_str(&format!(
                "  {}  {}\n",
                format!("{:width$}", key, width = width).yellow(),
                Self::render_value(&params.field_value(key))
            ));
        }
        output
    }

    fn format_consensus_failure(failure: &ConsensusFailure) -> String {
        let mut output = format!("{}\n", failure.message.red());
        if failure.candidates.is_empty() {
            return output;
        }
        for (index, candidate) in failure.candidates.iter().enumerate() {
            output.push_str(&format!(
                "\n{}\n",
                format!("── Candidate {} ──", index + 1).yellow().bold()
            ));
            output.push_str(&Self::format_params(candidate));
        }
        output
    }

    /// Validation status followed by one line per issue
    pub fn format_validation(validation: &ValidationResult) -> String {
        let status = match validation.status {
            ValidationStatus::Valid => "valid".green().bold(),
            ValidationStatus::Invalid => "invalid".red().bold(),
            ValidationStatus::Uncertain => "uncertain".yellow().bold(),
        };
        let mut output = format!("\n{} {}\n", "Validation:".cyan().bold(), status);

        for (name, issue) in &validation.issues {
            output.push_str(&format!("  {} {}: {}\n", "!".red(), name.bold(), issue.reason()));
        }

        if !validation.is_valid()
            && let Some(corrected) = &validation.corrected_params
        {
            output.push_str(&format!("{}\n", "Corrected parameters:".cyan()));
            output.push_str(&Self::format_params(corrected));
        }
        output
    }

    fn render_value(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{}\n{}\n",
            line.cyan(),
            format!("{:^60}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("┌─ {} ─┐", title).blue().bold())
    }

    fn footer() -> String {
        "=".repeat(60).cyan().to_string()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, query: &str, entries: &[ReportEntry]) -> String {
        ConsoleFormatter::format(query, entries)
    }
}
