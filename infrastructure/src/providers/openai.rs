//! OpenAI-compatible structured-output gateway
//!
//! Sends chat completions with `response_format = json_schema` and returns
//! the parsed JSON content of the first choice.

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use mindat_query_application::ports::llm_gateway::{GatewayError, LlmGateway, StructuredRequest};
use mindat_query_domain::core::string::truncate;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

/// Maximum number of error body bytes carried into a gateway error
const MAX_ERROR_BODY: usize = 500;

/// Gateway backed by an OpenAI-compatible chat-completions API
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Self::build(base_url, api_key.into(), model.into(), 0.3, None)
    }

    /// Create from the `[provider]` configuration section
    pub fn from_config(config: &FileProviderConfig) -> Result<Self, GatewayError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| GatewayError::MissingApiKey(config.api_key_env.clone()))?;
        Self::build(
            &config.base_url,
            api_key,
            config.model.clone(),
            config.temperature,
            config.timeout(),
        )
    }

    fn build(
        base_url: &str,
        api_key: String,
        model: String,
        temperature: f32,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
            temperature,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body for one structured completion
    fn request_body(&self, request: &StructuredRequest) -> Value {
        json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": &request.system_prompt},
                {"role": "user", "content": &request.user_prompt}
            ],
            "temperature": self.temperature,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": &request.schema.name,
                    "description": &request.schema.description,
                    "schema": &request.schema.schema
                }
            }
        })
    }
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

/// Extract the structured value from a chat-completions response body
fn parse_completion(body: &str) -> Result<Value, GatewayError> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::InvalidResponse(format!("malformed envelope: {}", e)))?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| GatewayError::InvalidResponse("no choices returned".to_string()))?;

    if let Some(refusal) = message.refusal {
        return Err(GatewayError::InvalidResponse(format!("model refused: {}", refusal)));
    }

    let content = message
        .content
        .ok_or_else(|| GatewayError::InvalidResponse("empty message content".to_string()))?;

    serde_json::from_str(&content)
        .map_err(|e| GatewayError::InvalidResponse(format!("content is not JSON: {}", e)))
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn generate_structured(
        &self,
        request: &StructuredRequest,
    ) -> Result<Value, GatewayError> {
        debug!(
            "Requesting {} from {} ({})",
            request.schema.name, self.endpoint, self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body, MAX_ERROR_BODY)
            )));
        }

        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindat_query_domain::OutputSchema;

    fn gateway() -> OpenAiGateway {
        OpenAiGateway::new("http://localhost:8080/", "sk-test", "gpt-4o").unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(gateway().endpoint, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_request_body_carries_schema() {
        let request = StructuredRequest::new(
            "system text",
            "user text",
            OutputSchema::query_parameters(),
        );
        let body = gateway().with_temperature(0.0).request_body(&request);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user text");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(
            body["response_format"]["json_schema"]["name"],
            "MindatQueryDict"
        );
        assert!(body["response_format"]["json_schema"]["schema"]["properties"]["el_inc"].is_object());
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"el_inc\":\"Fe\"}"}}]}"#;
        let value = parse_completion(body).unwrap();
        assert_eq!(value, json!({"el_inc": "Fe"}));
    }

    #[test]
    fn test_parse_completion_failures() {
        let no_choices = parse_completion(r#"{"choices":[]}"#);
        assert!(matches!(no_choices, Err(GatewayError::InvalidResponse(_))));

        let refusal = parse_completion(
            r#"{"choices":[{"message":{"content":null,"refusal":"cannot help"}}]}"#,
        );
        assert_eq!(
            refusal,
            Err(GatewayError::InvalidResponse("model refused: cannot help".to_string()))
        );

        let not_json = parse_completion(r#"{"choices":[{"message":{"content":"hello"}}]}"#);
        assert!(matches!(not_json, Err(GatewayError::InvalidResponse(_))));

        assert!(parse_completion("<html>").is_err());
    }

    #[test]
    fn test_from_config_without_key() {
        let config = FileProviderConfig {
            api_key_env: "MINDAT_QUERY_TEST_SURELY_UNSET_KEY".to_string(),
            ..Default::default()
        };
        let result = OpenAiGateway::from_config(&config);
        assert!(matches!(result, Err(GatewayError::MissingApiKey(_))));
    }

    #[test]
    fn test_from_config_with_key() {
        let config = FileProviderConfig {
            api_key: Some("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            timeout_seconds: Some(10),
            ..Default::default()
        };
        let gateway = OpenAiGateway::from_config(&config).unwrap();
        assert_eq!(gateway.model(), "gpt-4o-mini");
    }
}
