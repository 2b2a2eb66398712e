use serde_json::Value;

use crate::error::TracksError;

/// Read a JSON reply, turning non-success statuses into `ApiError` with a
/// truncated body. A success status with an unparseable body is a protocol
/// violation.
pub async fn read_json(response: reqwest::Response) -> Result<Value, TracksError> {
    let status = response.status();
    let url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| TracksError::HttpError(format!("Failed to read response body: {e}")))?;

    if !status.is_success() {
        tracing::debug!(%url, status = status.as_u16(), "Upstream returned an error status");
        return Err(TracksError::from_response_body(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        TracksError::protocol(format!("Response from {} is not valid JSON: {e}", url.path()))
    })
}
