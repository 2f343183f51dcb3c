//! Validation outcome types shared by the rule and semantic layers

use crate::apidoc::ParameterDoc;
use crate::query::QueryParameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Issue key used for failures that are not tied to one parameter
pub const ERROR_ISSUE_KEY: &str = "_error";

/// Outcome status of a validation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// All checks passed
    Valid,
    /// At least one check failed
    Invalid,
    /// Needs user confirmation (e.g. inferred rather than stated values)
    Uncertain,
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Invalid => "invalid",
            ValidationStatus::Uncertain => "uncertain",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic for a single parameter raised by semantic validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterIssue {
    /// Current value of the parameter (`null` when unset)
    pub value: Value,
    /// Why the parameter was flagged
    pub reason: String,
    /// Documentation of the parameter, when the API documents it
    pub api_doc: Option<ParameterDoc>,
}

/// A single validation diagnostic
///
/// Rule checks report a plain message; semantic checks report the offending
/// value together with its documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Issue {
    Message(String),
    Parameter(ParameterIssue),
}

impl Issue {
    /// Human-readable reason, regardless of the issue shape
    pub fn reason(&self) -> &str {
        match self {
            Issue::Message(message) => message,
            Issue::Parameter(issue) => &issue.reason,
        }
    }
}

/// Result of running one or more validation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    /// Rule name or parameter name → diagnostic
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub issues: BTreeMap<String, Issue>,
    /// Normalized parameters, present once rule validation passed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_params: Option<QueryParameters>,
}

impl ValidationResult {
    /// A passing result carrying the corrected parameters
    pub fn valid(corrected_params: QueryParameters) -> Self {
        Self {
            status: ValidationStatus::Valid,
            issues: BTreeMap::new(),
            corrected_params: Some(corrected_params),
        }
    }

    /// A failing result with the collected issues
    pub fn invalid(issues: BTreeMap<String, Issue>) -> Self {
        Self {
            status: ValidationStatus::Invalid,
            issues,
            corrected_params: None,
        }
    }

    /// A result with an explicit status and issues
    pub fn with_status(status: ValidationStatus, issues: BTreeMap<String, Issue>) -> Self {
        Self {
            status,
            issues,
            corrected_params: None,
        }
    }

    /// Fail-closed result for a validation oracle that could not answer
    pub fn oracle_failure(reason: impl Into<String>) -> Self {
        let mut issues = BTreeMap::new();
        issues.insert(
            ERROR_ISSUE_KEY.to_string(),
            Issue::Parameter(ParameterIssue {
                value: Value::Null,
                reason: reason.into(),
                api_doc: None,
            }),
        );
        Self::invalid(issues)
    }

    /// Attach corrected parameters unless the result already carries some
    pub fn or_corrected_params(mut self, params: QueryParameters) -> Self {
        if self.corrected_params.is_none() {
            self.corrected_params = Some(params);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Issue keys joined with their reasons, one per line
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|(key, issue)| format!("{}: {}", key, issue.reason()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
