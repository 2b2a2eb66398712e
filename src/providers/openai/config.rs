//! Text-generation service configuration.

use secrecy::{ExposeSecret, SecretString};

use crate::error::TracksError;
use crate::execution::http::client::validate_base_url;
use crate::types::HttpConfig;

/// OpenAI-compatible chat completions configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: SecretString,
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    pub http: HttpConfig,
}

impl OpenAiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    pub const API_KEY_ENV: &'static str = "OPENAI_KEY";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            http: HttpConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn validate(&self) -> Result<(), TracksError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(TracksError::ConfigurationError(format!(
                "Text generation API key is missing; set {} or pass it explicitly",
                Self::API_KEY_ENV
            )));
        }
        if self.model.trim().is_empty() {
            return Err(TracksError::ConfigurationError(
                "Text generation model cannot be empty".to_string(),
            ));
        }
        validate_base_url("Text generation", &self.base_url)
    }
}
