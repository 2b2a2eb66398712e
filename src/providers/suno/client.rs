//! Music service client
//!
//! Submits jobs, queries task and clip status, and resolves WAV/MIDI asset
//! URLs. Every call validates its inputs before touching the network.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use super::builder::SunoBuilder;
use super::config::SunoConfig;
use crate::error::{Result, TracksError};
use crate::execution::http::{build_http_client_from_config, read_json};
use crate::jobs::{
    AddVocalRequest, ConcatRequest, CoverRequest, CreateRequest, ExtendRequest, JobRequest,
    PersonaMusicRequest, PersonaRequest, RemasterRequest, StemsRequest, SubmitReceipt, TaskHandle,
    UploadRequest,
};
use crate::observability::ProviderTracer;
use crate::traits::TaskStatusCapability;
use crate::types::PollEnvelope;

/// Client for the music-generation service.
#[derive(Clone)]
pub struct SunoClient {
    config: SunoConfig,
    http: reqwest::Client,
    tracer: ProviderTracer,
}

impl std::fmt::Debug for SunoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SunoClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl SunoClient {
    pub fn builder() -> SunoBuilder {
        SunoBuilder::new()
    }

    pub fn new(config: SunoConfig) -> Result<Self> {
        config.validate()?;
        let http = build_http_client_from_config(&config.http)?;
        Ok(Self::assemble(config, http))
    }

    pub fn with_http_client(config: SunoConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, http))
    }

    fn assemble(config: SunoConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            tracer: ProviderTracer::new("suno"),
        }
    }

    pub fn config(&self) -> &SunoConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key.expose_secret()))
                .map_err(|e| {
                    TracksError::ConfigurationError(format!("Invalid music service API key: {e}"))
                })?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let headers = self.auth_headers()?;
        let started = self.tracer.trace_request_start(method.as_str(), path);
        self.tracer.trace_request_details(&headers, body);

        let mut request = self.http.request(method, self.url(path)).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let parsed = read_json(response).await;
                if parsed.is_ok() {
                    self.tracer.trace_request_complete(path, status, started);
                }
                parsed
            }
            Err(e) => Err(TracksError::from(e)),
        };
        if let Err(error) = &outcome {
            self.tracer.trace_request_error(path, error, started);
        }
        outcome
    }

    /// Validate and submit any job.
    ///
    /// Validation failures are returned without any request being sent. A
    /// success reply that lacks the kind's identifier is a `ProtocolError`.
    pub async fn submit(&self, job: impl Into<JobRequest>) -> Result<SubmitReceipt> {
        let job = job.into();
        job.validate()?;
        let payload = job.payload()?;

        let response = self.send(Method::POST, job.endpoint(), Some(&payload)).await?;
        let receipt = job.receipt_from(&response)?;
        self.tracer.trace_submission(job.kind().as_str(), receipt.id());
        Ok(receipt)
    }

    async fn submit_task(&self, job: impl Into<JobRequest>) -> Result<TaskHandle> {
        self.submit(job).await?.into_task()
    }

    pub async fn create(&self, request: CreateRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn extend(&self, request: ExtendRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn concat(&self, request: ConcatRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn cover(&self, request: CoverRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn stems(&self, request: StemsRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn persona_music(&self, request: PersonaMusicRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn remaster(&self, request: RemasterRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    pub async fn add_vocal(&self, request: AddVocalRequest) -> Result<TaskHandle> {
        self.submit_task(request).await
    }

    /// Create a persona; returns its id.
    pub async fn create_persona(&self, request: PersonaRequest) -> Result<String> {
        Ok(self.submit(request).await?.id().to_string())
    }

    /// Register hosted audio; returns the new clip id.
    pub async fn upload(&self, request: UploadRequest) -> Result<String> {
        Ok(self.submit(request).await?.id().to_string())
    }

    /// One status query for a task.
    pub async fn get_task(&self, task_id: &str) -> Result<PollEnvelope> {
        let path = format!("suno/task/{}", encoded_id("task_id", task_id)?);
        let response = self.send(Method::GET, &path, None).await?;
        Ok(PollEnvelope::from_value(&response))
    }

    /// One status query for a clip.
    pub async fn get_clip(&self, clip_id: &str) -> Result<PollEnvelope> {
        let path = format!("suno/clip/{}", encoded_id("clip_id", clip_id)?);
        let response = self.send(Method::GET, &path, None).await?;
        Ok(PollEnvelope::from_value(&response))
    }

    /// Remaining credits, as reported upstream.
    pub async fn get_credits(&self) -> Result<Value> {
        self.send(Method::GET, "get-credits", None).await
    }

    /// URL of the WAV rendition of a clip.
    pub async fn get_wav(&self, clip_id: &str) -> Result<String> {
        self.asset_url("suno/wav", "wav_url", clip_id).await
    }

    /// URL of the MIDI transcription of a clip.
    pub async fn get_midi(&self, clip_id: &str) -> Result<String> {
        self.asset_url("suno/midi", "midi_url", clip_id).await
    }

    async fn asset_url(&self, path: &str, field: &str, clip_id: &str) -> Result<String> {
        encoded_id("clip_id", clip_id)?;
        let body = json!({ "clip_id": clip_id.trim() });
        let response = self.send(Method::POST, path, Some(&body)).await?;
        asset_url_from(&response, field)
    }
}

fn encoded_id(name: &str, id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(TracksError::validation(format!("{name} must not be blank")));
    }
    Ok(urlencoding::encode(id).into_owned())
}

// `{"message": "success", "data": {<field>: url}}`; any other message is an API error.
fn asset_url_from(response: &Value, field: &str) -> Result<String> {
    let message = response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if message != "success" {
        let code = response
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(200);
        let message = if message.is_empty() {
            crate::error::truncate_body(&response.to_string())
        } else {
            message.to_string()
        };
        return Err(TracksError::ApiError {
            code,
            message,
            details: Some(response.clone()),
        });
    }

    response
        .get("data")
        .and_then(|d| d.get(field))
        .and_then(Value::as_str)
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| TracksError::protocol(format!("No {field} in asset response")))
}

#[async_trait]
impl TaskStatusCapability for SunoClient {
    async fn task_status(&self, task_id: &str) -> Result<PollEnvelope> {
        self.get_task(task_id).await
    }
}
