use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tubesum.json";

/// Top-level tubesum.json schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TubesumConfig {
    /// Generative model used for summaries and the title fallback.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// oEmbed proxy used for the primary title lookup.
    #[serde(default = "default_oembed_base_url")]
    pub oembed_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TubesumConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            oembed_base_url: default_oembed_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_oembed_base_url() -> String {
    "https://noembed.com".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

/// Load config from `path`, or from `tubesum.json` in the working directory.
///
/// A missing default file yields defaults; an explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<TubesumConfig> {
    let (config_path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (Path::new(CONFIG_FILE).to_path_buf(), false),
    };

    if !explicit && !config_path.exists() {
        return Ok(TubesumConfig::default());
    }

    let raw = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: TubesumConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    Ok(config)
}

/// Resolve the model API base URL: `GEMINI_BASE_URL` wins over the config file.
pub fn resolve_api_base_url(config: &TubesumConfig) -> Result<String> {
    let env_url = std::env::var("GEMINI_BASE_URL").ok();
    pick_base_url(env_url.as_deref(), &config.api_base_url)
}

fn pick_base_url(env_url: Option<&str>, config_url: &str) -> Result<String> {
    let chosen = env_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(config_url.trim());
    url::Url::parse(chosen).with_context(|| format!("Invalid model base URL: {chosen}"))?;
    Ok(chosen.trim_end_matches('/').to_string())
}

/// Read the model API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
pub fn api_key_from_env() -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "model": "gemini-2.5-pro",
            "apiBaseUrl": "http://localhost:8080/v1beta",
            "oembedBaseUrl": "http://localhost:9090",
            "timeoutSecs": 5
        }"#;

        let config: TubesumConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.oembed_base_url, "http://localhost:9090");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_defaults() {
        let config: TubesumConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.oembed_base_url, "https://noembed.com");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let missing = std::env::temp_dir().join("tubesum-no-such-config.json");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_env_url_wins_and_is_trimmed() {
        let url = pick_base_url(Some(" http://proxy.local/v1/ "), "https://example.com").unwrap();
        assert_eq!(url, "http://proxy.local/v1");
    }

    #[test]
    fn test_blank_env_url_falls_back() {
        let url = pick_base_url(Some("  "), "https://example.com/v1beta").unwrap();
        assert_eq!(url, "https://example.com/v1beta");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(pick_base_url(None, "not a url").is_err());
    }
}
