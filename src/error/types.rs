//! Core error types.

use std::time::Duration;

use thiserror::Error;

/// Maximum number of characters of an upstream response body kept in errors.
pub const MAX_ERROR_BODY_CHARS: usize = 500;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TracksError>;

/// Every failure the lyric and music clients can surface.
#[derive(Error, Debug)]
pub enum TracksError {
    /// Missing or malformed credentials/configuration. Raised before any network I/O.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request parameters rejected locally. Raised before any network I/O.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Upstream replied successfully but violated its response contract.
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Upstream reported the job as failed.
    #[error("Generation failed with state: {state} (task {task_id})")]
    JobFailed { task_id: String, state: String },

    /// The polling budget ran out before the job reached a terminal state.
    #[error(
        "Polling timed out after {secs} seconds ({attempts} attempts, task {task_id})",
        secs = .elapsed.as_secs()
    )]
    PollTimeout {
        task_id: String,
        attempts: u32,
        elapsed: Duration,
    },

    /// The caller aborted an in-flight wait.
    #[error("Polling cancelled for task {task_id}")]
    Cancelled { task_id: String },

    /// The caller aborted a request that is not tied to a task.
    #[error("Operation cancelled")]
    Interrupted,

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success HTTP status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Asset retrieval failure.
    #[error("Download failed for {url}: {message}")]
    DownloadError { url: String, message: String },

    /// Any failure of the text-generation collaborator.
    #[error("Failed to generate lyrics: {source}")]
    GenerationError {
        #[source]
        source: Box<TracksError>,
    },

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl TracksError {
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Build an `ApiError` from a raw response body, keeping JSON bodies as details
    /// and truncating the message for diagnostics.
    pub fn from_response_body(code: u16, body: &str) -> Self {
        let details = serde_json::from_str::<serde_json::Value>(body).ok();
        let message = details
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| truncate_body(body));
        Self::ApiError {
            code,
            message,
            details,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError(message.into())
    }

    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DownloadError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Wrap a collaborator failure as a `GenerationError`, leaving existing ones intact.
    pub fn generation(cause: TracksError) -> Self {
        match cause {
            already @ Self::GenerationError { .. } => already,
            other => Self::GenerationError {
                source: Box::new(other),
            },
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::GenerationError { source } => source.status_code(),
            _ => None,
        }
    }

    /// Whether repeating the same call might succeed.
    ///
    /// A timed-out poll is retryable: the task may still complete and can be
    /// polled again with a fresh budget.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::PollTimeout { .. } => true,
            Self::ApiError { code, .. } => *code == 429 || *code >= 500,
            Self::GenerationError { source } => source.is_retryable(),
            _ => false,
        }
    }

    /// Whether the caller aborted the operation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::Interrupted)
    }

    /// Errors caused by caller input rather than by a remote service.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError(_) | Self::ValidationError(_)
        )
    }
}

/// Truncate a response body to [`MAX_ERROR_BODY_CHARS`] characters.
pub fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    out.push_str("...");
    out
}

fn extract_message(value: &serde_json::Value) -> Option<String> {
    let candidate = value
        .get("message")
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .or_else(|| value.get("error"))
        .or_else(|| value.get("detail"))?;
    candidate.as_str().map(truncate_body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_limits_length() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS + 20);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 3);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("  short  "), "short");
    }

    #[test]
    fn test_from_response_body_prefers_json_message() {
        let err = TracksError::from_response_body(402, r#"{"message":"insufficient credits"}"#);
        match err {
            TracksError::ApiError {
                code,
                message,
                details,
            } => {
                assert_eq!(code, 402);
                assert_eq!(message, "insufficient credits");
                assert!(details.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = TracksError::from_response_body(502, "<html>Bad gateway</html>");
        assert_eq!(err.status_code(), Some(502));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_generation_wrapping_keeps_cause() {
        let err = TracksError::generation(TracksError::HttpError("connection reset".into()));
        assert!(err.to_string().contains("connection reset"));
        assert!(err.is_retryable());

        let twice = TracksError::generation(err);
        match twice {
            TracksError::GenerationError { source } => {
                assert!(matches!(*source, TracksError::HttpError(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classification() {
        assert!(TracksError::validation("bad").is_user_error());
        assert!(TracksError::ConfigurationError("missing".into()).is_user_error());
        assert!(!TracksError::protocol("no task_id").is_retryable());

        let timeout = TracksError::PollTimeout {
            task_id: "t".into(),
            attempts: 20,
            elapsed: Duration::from_secs(300),
        };
        assert!(timeout.is_retryable());
        assert!(timeout.to_string().contains("300 seconds"));

        let failed = TracksError::JobFailed {
            task_id: "t".into(),
            state: "error".into(),
        };
        assert!(!failed.is_retryable());
    }

    #[test]
    fn test_cancellation_messages() {
        let polling = TracksError::Cancelled {
            task_id: "t-1".into(),
        };
        assert_eq!(polling.to_string(), "Polling cancelled for task t-1");
        assert!(polling.is_cancelled());

        assert_eq!(TracksError::Interrupted.to_string(), "Operation cancelled");
        assert!(TracksError::Interrupted.is_cancelled());
        assert!(!TracksError::Interrupted.is_retryable());
        assert!(!TracksError::HttpError("reset".into()).is_cancelled());
    }
}
