//! Semantic (intent / hallucination) verdict returned by a validation oracle

use super::result::{ERROR_ISSUE_KEY, Issue, ParameterIssue, ValidationResult, ValidationStatus};
use crate::apidoc::EndpointDocs;
use crate::query::{OutputSchema, QueryParameters};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Raw oracle answer: a status plus parameter name → reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticVerdict {
    pub status: ValidationStatus,
    #[serde(default)]
    pub issues: Option<BTreeMap<String, String>>,
}

impl SemanticVerdict {
    /// Output schema the oracle must answer with
    pub fn output_schema() -> OutputSchema {
        OutputSchema::new(
            "IntentHallucinationValidationOutput",
            "Structured output for intent and hallucination validation",
            json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "enum": ["valid", "invalid", "uncertain"],
                        "description": "Validation status: 'valid' if passes, 'invalid' if fails, 'uncertain' if needs user confirmation"
                    },
                    "issues": {
                        "type": ["object", "null"],
                        "additionalProperties": { "type": "string" },
                        "description": "Parameters with issues, mapping param name to reason. For 'invalid' status, use '_error' as key for general errors."
                    }
                },
                "required": ["status"]
            }),
        )
    }

    /// Enrich the verdict with current values and documentation.
    ///
    /// A `valid` verdict drops any issues the oracle may have attached.
    pub fn into_result(self, params: &QueryParameters, docs: &EndpointDocs) -> ValidationResult {
        if self.status.is_valid() {
            return ValidationResult::with_status(ValidationStatus::Valid, BTreeMap::new());
        }

        let issues = self
            .issues
            .unwrap_or_default()
            .into_iter()
            .map(|(name, reason)| {
                let issue = if name == ERROR_ISSUE_KEY {
                    ParameterIssue {
                        value: Value::Null,
                        reason,
                        api_doc: None,
                    }
                } else {
                    ParameterIssue {
                        value: params.field_value(&name),
                        reason,
                        api_doc: docs.get(&name).cloned(),
                    }
                };
                (name, Issue::Parameter(issue))
            })
            .collect();

        ValidationResult::with_status(self.status, issues)
    }
}
