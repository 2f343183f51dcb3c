//! Prompt templates for parameter generation and semantic validation

use serde::Serialize;
use serde_json::Value;

/// Templates for each oracle call
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for parameter generation
    pub fn generation_system() -> &'static str {
        "You are a helpful assistant that generates structured search parameters for querying the mindat database. "
    }

    /// User prompt for the first generation attempt
    pub fn generation_request(user_input: &str) -> String {
        format!(
            "Given the user input: '{}', generate a JSON object with the following fields: ",
            user_input
        )
    }

    /// User prompt for a retry, carrying the previous attempt's failure.
    ///
    /// `attempt` is the 1-indexed number of the attempt that failed.
    pub fn generation_retry(
        user_input: &str,
        attempt: usize,
        error_kind: &str,
        error_message: &str,
    ) -> String {
        format!(
            "{}\n\n\
             IMPORTANT: Previous attempt #{} failed with the following error:\n\
             Error type: {}\n\
             Error message: {}\n\
             Please fix the issue and generate a valid response.",
            Self::generation_request(user_input),
            attempt,
            error_kind,
            error_message
        )
    }

    /// System prompt for semantic validation
    pub fn semantic_system() -> &'static str {
        "You validate generated API search parameters for semantic correctness against the user's request."
    }

    /// User prompt for semantic validation
    pub fn semantic_validation<P: Serialize, D: Serialize>(
        user_query: &str,
        params: &P,
        api_docs: &D,
    ) -> String {
        format!(
            r#"Validate API parameters against user query and documentation.

USER QUERY: "{}"
PARAMETERS: {}
API DOCS: {}

Check:
1. Are all GENERATED parameters relevant to the query?
2. For parameters that EXIST in the API docs provided, are there missing values the user mentioned?
3. Do values comply with API constraints (enum values, format)?
4. Are values based on user input or fabricated?

CRITICAL RULES:
- ONLY validate parameters that appear in the provided API DOCS
- Do NOT suggest parameters that are not in the API DOCS, even if they seem relevant
- "Missing parameter" means: user mentioned a requirement that maps to a provided API parameter, but it's not set
- Example: User says "no sulfur", API docs include "el_exc", but el_exc is not in parameters → INVALID (missing el_exc)
- Counter-example: User says "red minerals", but API docs don't include a color parameter → VALID (API doesn't support color filter)

IMPORTANT: Do NOT check data types (string vs array, etc). Data type validation is handled by other mechanisms. Focus only on semantic correctness.

Response format:
{{
    "status": "valid" | "invalid" | "uncertain",
    "issues": {{"param_name": "reason"}}  // Only if status is not "valid"
}}

Examples:
1. Invalid: User "with iron, no sulfur", Params {{"el_inc": "Fe"}} → {{"status": "invalid", "issues": {{"el_exc": "User said 'no sulfur' but el_exc is missing"}}}}
2. Uncertain: User "like quartz", Params {{"hardness_min": 7}} → {{"status": "uncertain", "issues": {{"hardness_min": "Inferred from quartz, not explicit"}}}}
3. Valid: User "hardness 5-7", Params {{"hardness_min": 5, "hardness_max": 7}} → {{"status": "valid"}}
"#,
            user_query,
            pretty_json(params),
            pretty_json(api_docs)
        )
    }
}

fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| Value::Null.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generation_request_quotes_input() {
        let prompt = PromptTemplate::generation_request("minerals with copper");
        assert!(prompt.starts_with("Given the user input: 'minerals with copper'"));
    }

    #[test]
    fn test_generation_retry_carries_failure() {
        let prompt = PromptTemplate::generation_retry("quartz", 2, "Decode", "missing field `ima`");

        assert!(prompt.starts_with(&PromptTemplate::generation_request("quartz")));
        assert!(prompt.contains("Previous attempt #2 failed"));
        assert!(prompt.contains("Error type: Decode"));
        assert!(prompt.contains("Error message: missing field `ima`"));
    }

    #[test]
    fn test_semantic_validation_embeds_json() {
        let prompt = PromptTemplate::semantic_validation(
            "iron, no sulfur",
            &json!({"el_inc": "Fe"}),
            &json!({"el_exc": {"name": "el_exc"}}),
        );

        assert!(prompt.contains("USER QUERY: \"iron, no sulfur\""));
        assert!(prompt.contains("\"el_inc\": \"Fe\""));
        assert!(prompt.contains("\"name\": \"el_exc\""));
        assert!(prompt.contains("\"status\": \"valid\" | \"invalid\" | \"uncertain\""));
    }
}
