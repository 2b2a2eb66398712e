//! Client construction and configuration failures.

use std::time::Duration;

use tracksmartin::TracksError;
use tracksmartin::providers::{OpenAiClient, OpenAiConfig, SunoClient, SunoConfig};

#[test]
fn test_missing_keys_are_configuration_errors() {
    let err = SunoClient::builder().env_fallback(false).build().unwrap_err();
    assert!(matches!(err, TracksError::ConfigurationError(_)), "{err:?}");
    assert!(err.is_user_error());
    assert!(err.to_string().contains(SunoConfig::API_KEY_ENV));

    let err = OpenAiClient::builder()
        .api_key("   ")
        .env_fallback(false)
        .build()
        .unwrap_err();
    assert!(matches!(err, TracksError::ConfigurationError(_)), "{err:?}");
    assert!(err.to_string().contains(OpenAiConfig::API_KEY_ENV));
}

#[test]
fn test_base_url_must_be_http() {
    for bad in ["", "ftp://files.example", "not a url"] {
        let err = SunoClient::builder()
            .api_key("key")
            .base_url(bad)
            .env_fallback(false)
            .build()
            .unwrap_err();
        assert!(matches!(err, TracksError::ConfigurationError(_)), "{bad}: {err:?}");
    }
}

#[test]
fn test_builders_apply_settings() {
    let client = SunoClient::builder()
        .api_key("key")
        .base_url("http://localhost:9000/api/v1/")
        .timeout(Duration::from_secs(5))
        .env_fallback(false)
        .build()
        .unwrap();
    assert_eq!(client.config().base_url, "http://localhost:9000/api/v1/");
    assert_eq!(client.config().http.timeout, Some(Duration::from_secs(5)));

    let client = OpenAiClient::builder()
        .api_key("key")
        .model("gpt-4o")
        .env_fallback(false)
        .build()
        .unwrap();
    assert_eq!(client.model(), "gpt-4o");
}

#[test]
fn test_client_debug_output_hides_key() {
    let client = SunoClient::new(SunoConfig::new("super-secret-key")).unwrap();
    assert!(!format!("{client:?}").contains("super-secret-key"));
    assert!(!format!("{:?}", client.config()).contains("super-secret-key"));
}
