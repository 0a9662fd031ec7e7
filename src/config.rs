//! Client configuration: base URL, credentials and retry bounds.
//!
//! Built once at startup and treated as immutable afterwards; the client
//! holds it by value and no process-wide mutable state exists.

use crate::error::ApiResult;
use crate::retry::RetryPolicy;
use crate::validation::validate_api_key;

/// Placeholder host used when no API URL is configured.
pub const DEFAULT_API_URL: &str = "https://api.example.com";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "LEXMINT_API_URL";

/// Environment variable supplying the API key.
pub const API_KEY_ENV: &str = "LEXMINT_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub retry: RetryPolicy,
}

impl ApiConfig {
    pub fn new(base_url: Option<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Checks the API key format before any request is issued.
    pub fn validate(&self) -> ApiResult<()> {
        validate_api_key(&self.api_key)
    }
}
