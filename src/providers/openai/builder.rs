//! Text-generation client builder

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::OpenAiClient;
use super::config::OpenAiConfig;
use crate::error::TracksError;
use crate::types::HttpConfig;

/// Builder for [`OpenAiClient`]. Falls back to `OPENAI_KEY` when no key is set.
#[derive(Debug)]
pub struct OpenAiBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    model: Option<String>,
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
    env_fallback: bool,
}

impl Default for OpenAiBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            http_config: HttpConfig::default(),
            http_client: None,
            env_fallback: true,
        }
    }
}

impl OpenAiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http_config.user_agent = Some(user_agent.into());
        self
    }

    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn env_fallback(mut self, enabled: bool) -> Self {
        self.env_fallback = enabled;
        self
    }

    pub fn build(self) -> Result<OpenAiClient, TracksError> {
        let mut api_key = self
            .api_key
            .filter(|k| !k.expose_secret().trim().is_empty());
        if api_key.is_none()
            && self.env_fallback
            && let Ok(key) = std::env::var(OpenAiConfig::API_KEY_ENV)
        {
            api_key = Some(SecretString::from(key));
        }

        let config = OpenAiConfig {
            api_key: api_key.unwrap_or_else(|| SecretString::from(String::new())),
            base_url: self
                .base_url
                .unwrap_or_else(|| OpenAiConfig::DEFAULT_BASE_URL.to_string()),
            model: self
                .model
                .unwrap_or_else(|| OpenAiConfig::DEFAULT_MODEL.to_string()),
            http: self.http_config,
        };

        match self.http_client {
            Some(http) => OpenAiClient::with_http_client(config, http),
            None => OpenAiClient::new(config),
        }
    }
}
