//! Request tracing and secret masking

use std::time::Instant;

use tracing::{debug, info, warn};

/// Mask a credential-like value so it can be logged.
///
/// Bearer tokens and long keys keep a short prefix and suffix; short values are
/// fully hidden.
pub fn mask_sensitive_value(value: &str) -> String {
    if let Some(token) = value.strip_prefix("Bearer ") {
        return format!("Bearer {}", mask_token(token));
    }
    mask_token(value)
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let keep = if chars.len() > 16 { 4 } else { 2 };
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{head}...{tail}")
}

/// Render headers for debug logs, masking anything that looks like a credential.
pub fn format_headers_for_logging(headers: &reqwest::header::HeaderMap) -> String {
    let mut rendered: Vec<String> = headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<invalid>");
            let lowered = name.as_str().to_ascii_lowercase();
            let shown = if lowered.contains("authorization")
                || lowered.contains("key")
                || lowered.contains("token")
            {
                mask_sensitive_value(value)
            } else {
                value.to_string()
            };
            format!("{}: {shown}", name.as_str())
        })
        .collect();
    rendered.sort();
    rendered.join(", ")
}

/// Per-provider request tracer.
#[derive(Debug, Clone)]
pub struct ProviderTracer {
    provider: &'static str,
}

impl ProviderTracer {
    pub fn new(provider: &'static str) -> Self {
        Self { provider }
    }

    pub fn trace_request_start(&self, method: &str, path: &str) -> Instant {
        debug!(provider = self.provider, method, path, "Request started");
        Instant::now()
    }

    pub fn trace_request_details(
        &self,
        headers: &reqwest::header::HeaderMap,
        body: Option<&serde_json::Value>,
    ) {
        debug!(
            provider = self.provider,
            request_headers = %format_headers_for_logging(headers),
            request_body = %body.map(|b| b.to_string()).unwrap_or_default(),
            "Request details"
        );
    }

    pub fn trace_request_complete(&self, path: &str, status: u16, started: Instant) {
        debug!(
            provider = self.provider,
            path,
            status,
            duration_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
    }

    pub fn trace_request_error(&self, path: &str, error: &crate::error::TracksError, started: Instant) {
        warn!(
            provider = self.provider,
            path,
            error = %error,
            duration_ms = started.elapsed().as_millis() as u64,
            "Request failed"
        );
    }

    pub fn trace_submission(&self, kind: &str, receipt: &str) {
        info!(provider = self.provider, kind, receipt, "Job submitted");
    }
}
