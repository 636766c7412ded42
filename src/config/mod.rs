use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::{chat::PanelText, inference::ClientConfig};

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the inference service
    pub base_url: String,

    /// Path of the question route on the service
    pub query_path: String,

    /// Upper bound for a single request, in seconds
    pub request_timeout_secs: u64,

    /// Redraw interval of the interactive UI, in milliseconds
    pub tick_rate_ms: u64,

    /// Heading shown at the top of the panel
    pub title: String,

    /// Disclaimer shown under the heading
    pub disclaimer: String,

    /// Text shown in the empty input box
    pub input_placeholder: String,

    /// Bot text shown before the first answer
    pub response_placeholder: String,

    /// Bot text shown when a question could not be answered
    pub error_message: String,
}

impl Default for Config {
    fn default() -> Self {
        let client = ClientConfig::default();
        let text = PanelText::default();
        Self {
            base_url: client.base_url,
            query_path: client.query_path,
            request_timeout_secs: client.timeout.as_secs(),
            tick_rate_ms: 100,
            title: text.title,
            disclaimer: text.disclaimer,
            input_placeholder: text.input_placeholder,
            response_placeholder: text.response_placeholder,
            error_message: text.error_message,
        }
    }
}

impl Config {
    /// Build the configuration from defaults, a config file, and the environment
    ///
    /// An explicit `path` must exist; otherwise the usual locations are
    /// searched and a missing file is not an error.
    pub async fn init(path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => match Self::find_config_file() {
                Some(found) => Self::load_file(&found).await?,
                None => Self::default(),
            },
        };

        config.load_from_env();
        Ok(config)
    }

    /// Candidate config file locations, most specific first
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("./.medibot.json"),
            PathBuf::from("./medibot.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("medibot").join("medibot.json"));
        }

        paths
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load a JSON config file; missing keys keep their defaults
    pub async fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from `MEDIBOT_*` environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("MEDIBOT_BASE_URL") {
            self.base_url = url;
        }

        if let Some(path) = lookup("MEDIBOT_QUERY_PATH") {
            self.query_path = path;
        }

        if let Some(timeout) = lookup("MEDIBOT_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = timeout;
        }

        if let Some(tick) = lookup("MEDIBOT_TICK_RATE_MS").and_then(|v| v.parse().ok()) {
            self.tick_rate_ms = tick;
        }

        if let Some(title) = lookup("MEDIBOT_TITLE") {
            self.title = title;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url '{}'", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "base_url must use http or https (got '{}')",
                url.scheme()
            ));
        }

        if !self.query_path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "query_path must start with '/' (got '{}')",
                self.query_path
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be greater than 0"));
        }

        if self.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("tick_rate_ms must be greater than 0"));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            query_path: self.query_path.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn panel_text(&self) -> PanelText {
        PanelText {
            title: self.title.clone(),
            disclaimer: self.disclaimer.clone(),
            input_placeholder: self.input_placeholder.clone(),
            response_placeholder: self.response_placeholder.clone(),
            error_message: self.error_message.clone(),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.query_path, "/query");
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_url": "http://medibot.local:8080", "title": "Clinic Bot" }}"#).unwrap();

        let config = Config::init(Some(file.path())).await.unwrap();
        assert_eq!(config.base_url, "http://medibot.local:8080");
        assert_eq!(config.title, "Clinic Bot");
        assert_eq!(config.query_path, "/query");
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[tokio::test]
    async fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::init(Some(&dir.path().join("nope.json"))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(Config::load_file(file.path()).await.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("MEDIBOT_BASE_URL", "https://bot.example.org"),
            ("MEDIBOT_TIMEOUT", "15"),
            ("MEDIBOT_TICK_RATE_MS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url, "https://bot.example.org");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.query_path = "query".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_and_panel_text() {
        let mut config = Config::default();
        config.request_timeout_secs = 9;
        config.response_placeholder = "Ask away".to_string();

        assert_eq!(config.client_config().timeout, Duration::from_secs(9));
        assert_eq!(config.panel_text().response_placeholder, "Ask away");
    }
}
