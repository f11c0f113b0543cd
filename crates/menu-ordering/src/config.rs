//! Backend connection settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    EmptyBaseUrl,
    #[error("API base URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. `https://admin.example.com/api`
    pub base_url: String,
    /// Bearer token, sent as `Authorization` when present
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout (native targets only; browsers apply their own)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() { None } else { Some(token) };
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ApiConfig::new(" https://example.com/api/ ");
        assert_eq!(config.base_url, "https://example.com/api");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert_eq!(ApiConfig::new("").validate(), Err(ConfigError::EmptyBaseUrl));
        assert!(matches!(
            ApiConfig::new("ftp://example.com").validate(),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        assert_eq!(ApiConfig::default().with_token("  ").token, None);
        assert_eq!(
            ApiConfig::default().with_token("abc").token.as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"base_url":"http://x"}"#).unwrap();
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.token, None);
    }
}
