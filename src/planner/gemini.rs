//! Google Gemini `generateContent` client.

use crate::planner::client::{ModelClient, ModelError};
use crate::planner::prompt::{PromptRequest, DEFAULT_TEMPERATURE};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Client for the Gemini REST API.
///
/// The API key is optional so the app can start without one; every call
/// then fails with [`ModelError::MissingApiKey`].
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(&self, request: &PromptRequest) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema,
                "temperature": self.temperature
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: &PromptRequest) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;
        debug!(model = %self.model, "generate: sending request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), %message, "generate: API error");
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        debug!(text_len = text.len(), "generate: response received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::prompt::response_schema;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(Some("key".to_string()))
            .with_base_url("http://localhost:1234/")
            .with_model("gemini-test");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_request_body_declares_json_output() {
        let client = GeminiClient::new(Some("key".to_string())).with_temperature(0.2);
        let body = client.request_body(&PromptRequest {
            prompt: "plan my week".to_string(),
            schema: response_schema(),
        });
        assert_eq!(body["contents"][0]["parts"][0]["text"], "plan my week");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], response_schema());
        let temperature = body["generationConfig"]["temperature"]
            .as_f64()
            .expect("temperature");
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let client = GeminiClient::new(Some("   ".to_string()));
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        )
        .expect("deserialize");
        assert_eq!(parsed.text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{}}"#).expect("deserialize");
        assert_eq!(parsed.text(), "");
    }
}
