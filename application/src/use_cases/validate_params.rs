//! Validate Params use case
//!
//! Runs the deterministic rule checks and, when an original query is
//! available, the semantic (intent / hallucination) check.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, StructuredRequest};
use crate::schema_registry::SchemaRegistry;
use mindat_query_domain::{
    GEOMATERIALS_ENDPOINT, PromptTemplate, QueryParameters, RuleValidator, SemanticVerdict,
    ValidationResult,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// LLM-backed semantic validator
///
/// Fails closed: any oracle failure becomes an `invalid` result with an
/// `_error` issue.
pub struct SemanticValidator<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    registry: Arc<SchemaRegistry>,
    endpoint: String,
}

impl<G: LlmGateway + 'static> SemanticValidator<G> {
    pub fn new(gateway: Arc<G>, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            gateway,
            registry,
            endpoint: GEOMATERIALS_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Judge `params` against the user's query and the endpoint documentation.
    ///
    /// Only parameters carried by `params` are documented to the oracle.
    pub async fn validate(&self, params: &QueryParameters, original_query: &str) -> ValidationResult {
        let docs = self
            .registry
            .get_params_info(params.keys().as_slice(), &self.endpoint)
            .await;
        debug!("Semantic validation with {} documented parameters", docs.len());

        let request = StructuredRequest::new(
            PromptTemplate::semantic_system(),
            PromptTemplate::semantic_validation(original_query, params, &docs),
            SemanticVerdict::output_schema(),
        );

        match self.request_verdict(&request).await {
            Ok(verdict) => {
                let result = verdict.into_result(params, &docs);
                info!("Semantic validation: {}", result.status);
                result
            }
            Err(e) => {
                warn!("Semantic validation failed closed: {}", e);
                ValidationResult::oracle_failure(format!("Validation error: {}", e))
            }
        }
    }

    async fn request_verdict(
        &self,
        request: &StructuredRequest,
    ) -> Result<SemanticVerdict, GatewayError> {
        let value = self.gateway.generate_structured(request).await?;
        serde_json::from_value(value).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

/// Rule check followed by an optional semantic check
pub struct ValidationPipeline<G: LlmGateway + 'static> {
    rules: RuleValidator,
    semantic: Option<SemanticValidator<G>>,
}

impl<G: LlmGateway + 'static> ValidationPipeline<G> {
    /// Pipeline with rule checks only
    pub fn rules_only() -> Self {
        Self {
            rules: RuleValidator::new(),
            semantic: None,
        }
    }

    pub fn new(semantic: SemanticValidator<G>) -> Self {
        Self {
            rules: RuleValidator::new(),
            semantic: Some(semantic),
        }
    }

    /// Validate `params`.
    ///
    /// A rule failure is returned as is. Otherwise the semantic layer runs
    /// on the corrected parameters when both it and `original_query` are
    /// available, and the corrected parameters are carried in the result.
    pub async fn validate(
        &self,
        params: &QueryParameters,
        original_query: Option<&str>,
    ) -> ValidationResult {
        let rule_result = self.rules.run_validation(params);
        if !rule_result.is_valid() {
            info!("Rule validation failed: {}", rule_result.summary());
            return rule_result;
        }

        let (Some(semantic), Some(query)) = (&self.semantic, original_query) else {
            debug!("Skipping semantic validation");
            return rule_result;
        };

        let corrected = rule_result
            .corrected_params
            .unwrap_or_else(|| params.clone());
        semantic
            .validate(&corrected, query)
            .await
            .or_corrected_params(corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{ScriptedGateway, StaticSchema, geomaterials_document};
    use mindat_query_domain::{ERROR_ISSUE_KEY, Issue, ValidationStatus};
    use mindat_query_domain::validation::ParameterIssue;
    use serde_json::{Value, json};

    fn registry() -> Arc<SchemaRegistry> {
        Arc::new(SchemaRegistry::new(Arc::new(StaticSchema(
            geomaterials_document(),
        ))))
    }

    fn semantic(gateway: &Arc<ScriptedGateway>) -> SemanticValidator<ScriptedGateway> {
        SemanticValidator::new(Arc::clone(gateway), registry())
    }

    fn parameter_issue<'a>(result: &'a ValidationResult, key: &str) -> &'a ParameterIssue {
        match &result.issues[key] {
            Issue::Parameter(issue) => issue,
            Issue::Message(message) => panic!("expected parameter issue, got {}", message),
        }
    }

    #[tokio::test]
    async fn test_missing_exclusion_is_invalid() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(json!({
            "status": "invalid",
            "issues": { "el_exc": "User said 'no sulfur' but el_exc is missing" }
        }))]));
        let validator = semantic(&gateway);

        let params = QueryParameters::new().with_el_inc("Fe");
        let result = validator.validate(&params, "no sulfur, with iron").await;

        assert_eq!(result.status, ValidationStatus::Invalid);
        let issue = parameter_issue(&result, "el_exc");
        assert_eq!(issue.value, Value::Null);
        assert_eq!(
            issue.api_doc.as_ref().unwrap().description,
            "Chemical elements must exclude, e.g. Fe,Cu"
        );
    }

    #[tokio::test]
    async fn test_prompt_carries_only_documented_params() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(json!({"status": "valid"}))]));
        let validator = semantic(&gateway);

        let params = QueryParameters::new().with_el_inc("Fe");
        let result = validator.validate(&params, "minerals with iron").await;
        assert!(result.is_valid());

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        let prompt = &requests[0].user_prompt;
        assert!(prompt.contains("USER QUERY: \"minerals with iron\""));
        assert!(prompt.contains("Chemical elements must exclude"));
        assert!(prompt.contains("Mohs hardness from"));
        assert!(!prompt.contains("Search query"));
        assert_eq!(requests[0].schema.name, "IntentHallucinationValidationOutput");
    }

    #[tokio::test]
    async fn test_uncertain_verdict() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(json!({
            "status": "uncertain",
            "issues": { "hardness_min": "Inferred from quartz, not explicit" }
        }))]));
        let validator = semantic(&gateway);

        let params = QueryParameters::new().with_hardness(Some(7.0), None);
        let result = validator.validate(&params, "minerals like quartz").await;

        assert_eq!(result.status, ValidationStatus::Uncertain);
        let issue = parameter_issue(&result, "hardness_min");
        assert_eq!(issue.value, json!(7.0));
        assert_eq!(issue.api_doc.as_ref().unwrap().name, "hardness_min");
    }

    #[tokio::test]
    async fn test_oracle_error_fails_closed() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::Timeout)]));
        let validator = semantic(&gateway);

        let result = validator
            .validate(&QueryParameters::new().with_el_inc("Fe"), "iron")
            .await;

        assert_eq!(result.status, ValidationStatus::Invalid);
        let issue = parameter_issue(&result, ERROR_ISSUE_KEY);
        assert_eq!(issue.reason, "Validation error: Timeout");
        assert!(issue.api_doc.is_none());
    }

    #[tokio::test]
    async fn test_malformed_verdict_fails_closed() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(json!({"status": "maybe"}))]));
        let validator = semantic(&gateway);

        let result = validator
            .validate(&QueryParameters::new().with_el_inc("Fe"), "iron")
            .await;

        assert_eq!(result.status, ValidationStatus::Invalid);
        assert!(
            parameter_issue(&result, ERROR_ISSUE_KEY)
                .reason
                .starts_with("Validation error: Invalid response:")
        );
    }

    #[tokio::test]
    async fn test_pipeline_rule_failure_skips_semantic() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let pipeline = ValidationPipeline::new(semantic(&gateway));

        let params = QueryParameters::new().with_el_inc("Fe").with_el_exc("Fe");
        let result = pipeline.validate(&params, Some("iron but not iron")).await;

        assert_eq!(result.status, ValidationStatus::Invalid);
        assert!(result.issues.contains_key("rule_element_conflict"));
        assert!(result.corrected_params.is_none());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_pipeline_without_query_is_rule_only() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let pipeline = ValidationPipeline::new(semantic(&gateway));

        let params = QueryParameters::new().with_el_inc("fe,cu").with_el_exc("s");
        let result = pipeline.validate(&params, None).await;

        assert!(result.is_valid());
        let corrected = result.corrected_params.unwrap();
        assert_eq!(corrected.el_inc.as_deref(), Some("Cu,Fe"));
        assert_eq!(corrected.el_exc.as_deref(), Some("S"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rules_only_pipeline() {
        let pipeline = ValidationPipeline::<ScriptedGateway>::rules_only();

        let result = pipeline
            .validate(&QueryParameters::new().with_ima(true), Some("ima minerals"))
            .await;

        assert!(result.is_valid());
        assert!(result.corrected_params.is_some());
    }

    #[tokio::test]
    async fn test_pipeline_semantic_sees_corrected_params() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(json!({"status": "valid"}))]));
        let pipeline = ValidationPipeline::new(semantic(&gateway));

        let params = QueryParameters::new().with_el_inc("cu,fe");
        let result = pipeline.validate(&params, Some("copper and iron")).await;

        assert!(result.is_valid());
        assert_eq!(
            result.corrected_params.unwrap().el_inc.as_deref(),
            Some("Cu,Fe")
        );
        assert!(gateway.requests()[0].user_prompt.contains("\"el_inc\": \"Cu,Fe\""));
    }

    #[tokio::test]
    async fn test_pipeline_merges_corrected_params_on_semantic_failure() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Err(GatewayError::ConnectionError(
            "refused".to_string(),
        ))]));
        let pipeline = ValidationPipeline::new(semantic(&gateway));

        let params = QueryParameters::new().with_el_inc("fe");
        let result = pipeline.validate(&params, Some("iron")).await;

        assert_eq!(result.status, ValidationStatus::Invalid);
        assert!(result.issues.contains_key(ERROR_ISSUE_KEY));
        assert_eq!(result.corrected_params.unwrap().el_inc.as_deref(), Some("Fe"));
    }
}
