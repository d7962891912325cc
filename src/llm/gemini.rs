//! Google Gemini API client implementation
//!
//! This module implements the LlmClient trait for the Generative Language
//! REST API (`models/{model}:generateContent`). One request per call, no
//! streaming and no retries.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::{ApiKey, LlmConfig};
use crate::llm::LlmError;
use crate::llm::client::LlmClient;

/// Generative Language API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model to use
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Seconds reported when a 429 carries no usable retry-after header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub model: String,
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Create a new config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

impl From<&LlmConfig> for GeminiConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        }
    }
}

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: ApiKey,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client from an already resolved credential
    pub fn new(api_key: ApiKey, config: GeminiConfig) -> Result<Self, LlmError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Endpoint for a model's generateContent method
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    /// Build the request body for a single-turn prompt
    fn build_request(&self, prompt: &str) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        })
    }

    /// Send a request to the Gemini API
    async fn send_request(&self, model: &str, body: Value) -> Result<Value, LlmError> {
        let url = self.endpoint(model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), retry_after.as_deref(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Map a non-2xx response to an LlmError
fn error_from_status(status: u16, retry_after: Option<&str>, body: &str) -> LlmError {
    if status == 429 {
        let secs = retry_after
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return LlmError::RateLimited {
            retry_after: std::time::Duration::from_secs(secs),
        };
    }

    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        });

    LlmError::ApiError { status, message }
}

/// Extract the generated text from a generateContent response
fn parse_response(body: &Value) -> Result<String, LlmError> {
    if !body.is_object() {
        return Err(LlmError::InvalidResponse(format!("expected a JSON object, got {}", json_type(body))));
    }

    let Some(candidate) = body["candidates"].as_array().and_then(|c| c.first()) else {
        if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
            return Err(LlmError::Blocked(reason.to_string()));
        }
        return Err(LlmError::EmptyResponse);
    };

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect::<String>())
        .unwrap_or_default();

    if text.is_empty() {
        return match candidate["finishReason"].as_str() {
            Some(reason) if reason != "STOP" => Err(LlmError::Blocked(reason.to_string())),
            _ => Err(LlmError::EmptyResponse),
        };
    }

    Ok(text)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let body = self.build_request(prompt);
        let response = self.send_request(model, body).await?;
        parse_response(&response)
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("api_base", &self.config.api_base)
            .finish()
    }
}
