//! Music service client builder

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::SunoClient;
use super::config::SunoConfig;
use crate::error::TracksError;
use crate::types::HttpConfig;

/// Builder for [`SunoClient`].
///
/// ```rust,no_run
/// use tracksmartin::providers::suno::SunoClient;
///
/// let client = SunoClient::builder()
///     .api_key("your-api-key")
///     .timeout(std::time::Duration::from_secs(60))
///     .build()?;
/// # Ok::<(), tracksmartin::TracksError>(())
/// ```
#[derive(Debug)]
pub struct SunoBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
    env_fallback: bool,
}

impl Default for SunoBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            http_config: HttpConfig::default(),
            http_client: None,
            env_fallback: true,
        }
    }
}

impl SunoBuilder {
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

    /// Use a preconfigured HTTP client instead of building one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Whether to read `SUNO_API_KEY` when no key was injected (default: true).
    pub fn env_fallback(mut self, enabled: bool) -> Self {
        self.env_fallback = enabled;
        self
    }

    /// Build the client. Fails with `ConfigurationError` before any network I/O.
    pub fn build(self) -> Result<SunoClient, TracksError> {
        // Priority: injected key > environment variable
        let mut api_key = self
            .api_key
            .filter(|k| !k.expose_secret().trim().is_empty());
        if api_key.is_none()
            && self.env_fallback
            && let Ok(key) = std::env::var(SunoConfig::API_KEY_ENV)
        {
            api_key = Some(SecretString::from(key));
        }

        let config = SunoConfig {
            api_key: api_key.unwrap_or_else(|| SecretString::from(String::new())),
            base_url: self
                .base_url
                .unwrap_or_else(|| SunoConfig::DEFAULT_BASE_URL.to_string()),
            http: self.http_config,
        };

        match self.http_client {
            Some(http) => SunoClient::with_http_client(config, http),
            None => SunoClient::new(config),
        }
    }
}
