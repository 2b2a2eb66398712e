//! Music service configuration.

use secrecy::{ExposeSecret, SecretString};

use crate::error::TracksError;
use crate::execution::http::client::validate_base_url;
use crate::types::HttpConfig;

/// Music service client configuration
#[derive(Debug, Clone)]
pub struct SunoConfig {
    /// Bearer credential. Never printed by `Debug`.
    pub api_key: SecretString,
    pub base_url: String,
    pub http: HttpConfig,
}

impl SunoConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.sunoapi.com/api/v1";
    /// Environment variable consulted when no key is injected.
    pub const API_KEY_ENV: &'static str = "SUNO_API_KEY";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TracksError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(TracksError::ConfigurationError(format!(
                "Music service API key is missing; set {} or pass it explicitly",
                Self::API_KEY_ENV
            )));
        }
        validate_base_url("Music service", &self.base_url)
    }
}
