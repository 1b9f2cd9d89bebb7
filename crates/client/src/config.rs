//! Client configuration (base URL, API prefix, request timeout).

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "EVENTHUB_API_URL";
/// Local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Prefix shared by every REST endpoint (the health probe excepted).
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_prefix: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Validate `base_url` and build a config with the default `/api` prefix.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        let raw = base_url.as_ref().trim();
        let parsed = Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{raw}: expected an http(s) base URL"
            )));
        }

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            api_prefix: API_PREFIX.to_string(),
            timeout: None,
        })
    }

    /// Read [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => {
                tracing::warn!("{BASE_URL_ENV} not set; using local default {DEFAULT_BASE_URL}");
                Self::new(DEFAULT_BASE_URL)
            }
        }
    }

    /// Per-request timeout. Unset means the transport default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// `{base_url}{api_prefix}`.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url, self.api_prefix)
    }

    /// Unprefixed health probe.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: API_PREFIX.to_string(),
            timeout: None,
        }
    }
}
