//! HTTP client builder utilities
//!
//! Both remote clients build their `reqwest::Client` here so timeouts, user agent
//! and default headers are applied consistently.

use crate::error::TracksError;
use crate::types::HttpConfig;

/// Build an HTTP client from [`HttpConfig`].
pub fn build_http_client_from_config(config: &HttpConfig) -> Result<reqwest::Client, TracksError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if !config.headers.is_empty() {
        let mut headers = reqwest::header::HeaderMap::new();
        for (k, v) in &config.headers {
            let name = reqwest::header::HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
                TracksError::ConfigurationError(format!("Invalid header name '{k}': {e}"))
            })?;
            let value = reqwest::header::HeaderValue::from_str(v).map_err(|e| {
                TracksError::ConfigurationError(format!("Invalid header value for '{k}': {e}"))
            })?;
            headers.insert(name, value);
        }
        builder = builder.default_headers(headers);
    }

    builder
        .build()
        .map_err(|e| TracksError::HttpError(format!("Failed to create HTTP client: {e}")))
}

/// Reject empty or non-HTTP base URLs.
pub(crate) fn validate_base_url(service: &str, base_url: &str) -> Result<(), TracksError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(TracksError::ConfigurationError(format!(
            "{service} base URL cannot be empty"
        )));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(TracksError::ConfigurationError(format!(
            "{service} base URL must start with http:// or https:// (got '{trimmed}')"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_http_client_default() {
        let config = HttpConfig::default();
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_timeouts_and_agent() {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2))
            .with_user_agent("test-agent/1.0");
        assert!(build_http_client_from_config(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_with_invalid_header_name() {
        let config = HttpConfig::default().with_header("Invalid Header Name", "value");
        let err = build_http_client_from_config(&config).unwrap_err();
        assert!(matches!(err, TracksError::ConfigurationError(_)));
    }
}
