//! Gemini text generation (Google Generative Language API).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::{self, TubesumConfig};
use crate::error::ModelError;

/// Something that turns a prompt into text.
#[allow(async_fn_in_trait)]
pub trait TextModel {
    /// Generate a single response. `search` enables web-search grounding.
    async fn generate(&self, prompt: &str, search: bool) -> Result<String, ModelError>;
}

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Build from the loaded config plus the environment.
    ///
    /// Environment variables:
    /// - `GEMINI_API_KEY` or `API_KEY` (required)
    /// - `GEMINI_BASE_URL` (optional)
    pub fn from_env(config: &TubesumConfig) -> anyhow::Result<Self> {
        let api_key = config::api_key_from_env().ok_or(ModelError::MissingApiKey)?;
        let base_url = config::resolve_api_base_url(config)?;
        Ok(Self {
            api_key,
            base_url,
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }
}

impl TextModel for GeminiClient {
    async fn generate(&self, prompt: &str, search: bool) -> Result<String, ModelError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        tracing::debug!(model = %self.config.model, search, "sending generateContent request");

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&build_request(prompt, search))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        response_text(body)
    }
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers
}

fn build_request(prompt: &str, search: bool) -> Value {
    let mut request = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }]
    });
    if search {
        request["tools"] = json!([{ "googleSearch": {} }]);
    }
    request
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenate the text parts of the first candidate. No candidates yields
/// an empty string; callers decide what empty means.
fn response_text(body: Value) -> Result<String, ModelError> {
    let parsed: GenerateResponse =
        serde_json::from_value(body).map_err(|e| ModelError::Decode(e.to_string()))?;
    Ok(parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_search() {
        let req = build_request("hi", false);
        assert_eq!(req["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(req["contents"][0]["role"], "user");
        assert!(req.get("tools").is_none());
    }

    #[test]
    fn test_request_with_search() {
        let req = build_request("hi", true);
        assert_eq!(req["tools"][0]["googleSearch"], json!({}));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "## Sum" }, { "text": "mary" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(response_text(body).unwrap(), "## Summary");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        assert_eq!(response_text(json!({})).unwrap(), "");
        assert_eq!(response_text(json!({ "candidates": [{}] })).unwrap(), "");
    }

    #[test]
    fn test_malformed_response_is_decode_error() {
        let err = response_text(json!({ "candidates": "nope" })).unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn test_headers_carry_key() {
        let headers = build_headers("secret");
        assert_eq!(headers["x-goog-api-key"], "secret");
    }
}
