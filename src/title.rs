//! Video title lookup.
//!
//! The oEmbed proxy is tried first because it is fast and exact; the
//! generative model is only asked when that fails.

use std::time::Duration;

use serde::Deserialize;

use crate::error::LookupError;
use crate::gemini::TextModel;
use crate::video;

/// Marker the model is told to answer with when the id does not exist.
const INVALID_MARKER: &str = "INVALID_VIDEO";

/// Client for a noembed-compatible oEmbed endpoint.
pub struct OembedClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl OembedClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Look up the title of `canonical_url`. `Ok(None)` when the endpoint
    /// answered but had no title for it.
    pub async fn title(&self, canonical_url: &str) -> anyhow::Result<Option<String>> {
        let endpoint = format!("{}/embed", self.base_url);
        let body: serde_json::Value = self
            .http
            .get(&endpoint)
            .query(&[("url", canonical_url)])
            .send()
            .await?
            .json()
            .await?;
        Ok(title_from_oembed(body))
    }
}

fn title_from_oembed(body: serde_json::Value) -> Option<String> {
    let parsed: OembedResponse = serde_json::from_value(body).ok()?;
    if parsed.error.is_some() {
        return None;
    }
    parsed.title.filter(|t| !t.trim().is_empty())
}

/// Prompt asking the model for the exact title of `video_id`.
pub fn title_prompt(video_id: &str) -> String {
    format!(
        "Search for the YouTube video with ID \"{video_id}\". What is its exact title? \
         Return ONLY the title as a plain string. Do not add quotes or any other text. \
         If no such video exists, answer {INVALID_MARKER}."
    )
}

/// Clean a model answer into a title.
fn title_from_model(answer: &str) -> Result<String, LookupError> {
    let text = answer.trim();
    if text.is_empty() || text.contains(INVALID_MARKER) {
        return Err(LookupError::NotFound);
    }
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    Ok(text.to_string())
}

/// Fetch the title of the video at `url`, trying oEmbed first and the model
/// second.
pub async fn fetch_title(
    url: &str,
    oembed: &OembedClient,
    model: &impl TextModel,
) -> Result<String, LookupError> {
    let video_id = video::extract_id(url).ok_or(LookupError::InvalidUrl)?;
    let canonical = video::canonical_url(&video_id);

    match oembed.title(&canonical).await {
        Ok(Some(title)) => return Ok(title),
        Ok(None) => tracing::warn!(%video_id, "oEmbed returned no title, falling back to model"),
        Err(e) => tracing::warn!(%video_id, error = %e, "oEmbed lookup failed, falling back to model"),
    }

    title_via_model(&video_id, model).await
}

/// Ask the model for the title of `video_id`.
pub async fn title_via_model(video_id: &str, model: &impl TextModel) -> Result<String, LookupError> {
    let answer = model.generate(&title_prompt(video_id), true).await.map_err(|e| {
        tracing::error!(error = %e, "title lookup via model failed");
        LookupError::from(e)
    })?;
    title_from_model(&answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use serde_json::json;

    struct FixedModel(&'static str);

    impl TextModel for FixedModel {
        async fn generate(&self, _prompt: &str, _search: bool) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingModel;

    impl TextModel for FailingModel {
        async fn generate(&self, _prompt: &str, _search: bool) -> Result<String, ModelError> {
            Err(ModelError::MissingApiKey)
        }
    }

    #[test]
    fn test_oembed_title() {
        let body = json!({ "title": "Never Gonna Give You Up", "author_name": "Rick Astley" });
        assert_eq!(title_from_oembed(body).as_deref(), Some("Never Gonna Give You Up"));
    }

    #[test]
    fn test_oembed_error_means_no_title() {
        let body = json!({ "title": "x", "error": "404 Not Found" });
        assert_eq!(title_from_oembed(body), None);
        assert_eq!(title_from_oembed(json!({})), None);
    }

    #[test]
    fn test_model_answer_strips_quotes() {
        assert_eq!(title_from_model("  \"My Talk\"\n").unwrap(), "My Talk");
        assert_eq!(title_from_model("Plain").unwrap(), "Plain");
    }

    #[test]
    fn test_model_answer_invalid() {
        assert!(matches!(title_from_model("INVALID_VIDEO"), Err(LookupError::NotFound)));
        assert!(matches!(title_from_model("   "), Err(LookupError::NotFound)));
    }

    #[test]
    fn test_prompt_names_the_id() {
        assert!(title_prompt("dQw4w9WgXcQ").contains("\"dQw4w9WgXcQ\""));
    }

    #[tokio::test]
    async fn test_title_via_model() {
        let title = title_via_model("dQw4w9WgXcQ", &FixedModel("\"Song\"")).await.unwrap();
        assert_eq!(title, "Song");
    }

    #[tokio::test]
    async fn test_title_via_model_error() {
        let err = title_via_model("dQw4w9WgXcQ", &FailingModel).await.unwrap_err();
        assert!(matches!(err, LookupError::Model(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_short_circuits() {
        let oembed = OembedClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let err = fetch_title("https://example.com/video", &oembed, &FixedModel("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::InvalidUrl));
    }
}
