//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

use super::builder::OpenAiBuilder;
use super::config::OpenAiConfig;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::error::{Result, TracksError};
use crate::execution::http::{build_http_client_from_config, read_json};
use crate::observability::ProviderTracer;
use crate::traits::CompletionCapability;
use crate::types::CompletionRequest;

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Text-generation client.
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http: reqwest::Client,
    tracer: ProviderTracer,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenAiClient {
    pub fn builder() -> OpenAiBuilder {
        OpenAiBuilder::new()
    }

    pub fn new(config: OpenAiConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http_client_from_config(&config.http)?;
        Ok(Self::with_validated(config, http))
    }

    pub fn with_http_client(config: OpenAiConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_validated(config, http))
    }

    fn with_validated(config: OpenAiConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            tracer: ProviderTracer::new("openai"),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut auth =
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key.expose_secret()))
                .map_err(|e| {
                    TracksError::ConfigurationError(format!("Invalid text generation API key: {e}"))
                })?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }
}

#[async_trait]
impl CompletionCapability for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let body = ChatCompletionRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = format!(
            "{}/{CHAT_COMPLETIONS_PATH}",
            self.config.base_url.trim_end_matches('/')
        );
        let headers = self.headers()?;
        let started = self.tracer.trace_request_start("POST", CHAT_COMPLETIONS_PATH);
        self.tracer.trace_request_details(&headers, None);

        let response = match self.http.post(url).headers(headers).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = TracksError::from(e);
                self.tracer
                    .trace_request_error(CHAT_COMPLETIONS_PATH, &error, started);
                return Err(error);
            }
        };
        let status = response.status().as_u16();
        let value = match read_json(response).await {
            Ok(value) => value,
            Err(error) => {
                self.tracer
                    .trace_request_error(CHAT_COMPLETIONS_PATH, &error, started);
                return Err(error);
            }
        };
        self.tracer
            .trace_request_complete(CHAT_COMPLETIONS_PATH, status, started);

        let parsed: ChatCompletionResponse = serde_json::from_value(value).map_err(|e| {
            TracksError::protocol(format!("Unexpected chat completion response: {e}"))
        })?;
        parsed
            .first_text()
            .ok_or_else(|| TracksError::protocol("Chat completion returned no content"))
    }
}
