//! Clip records and status envelopes returned by the music service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Lifecycle state of a clip as reported upstream.
///
/// Unknown labels are kept in [`ClipState::Other`] so new upstream vocabulary
/// keeps the poller waiting instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClipState {
    Queued,
    Submitted,
    Processing,
    Streaming,
    Succeeded,
    Error,
    Failed,
    #[default]
    Unknown,
    Other(String),
}

impl ClipState {
    pub fn as_str(&self) -> &str {
        match self {
            ClipState::Queued => "queued",
            ClipState::Submitted => "submitted",
            ClipState::Processing => "processing",
            ClipState::Streaming => "streaming",
            ClipState::Succeeded => "succeeded",
            ClipState::Error => "error",
            ClipState::Failed => "failed",
            ClipState::Unknown => "unknown",
            ClipState::Other(label) => label,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ClipState::Succeeded)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ClipState::Error | ClipState::Failed)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }
}

impl From<String> for ClipState {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "queued" => ClipState::Queued,
            "submitted" => ClipState::Submitted,
            "processing" => ClipState::Processing,
            "streaming" => ClipState::Streaming,
            "succeeded" => ClipState::Succeeded,
            "error" => ClipState::Error,
            "failed" => ClipState::Failed,
            "" => ClipState::Unknown,
            _ => ClipState::Other(value),
        }
    }
}

impl From<ClipState> for String {
    fn from(state: ClipState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for ClipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One produced artifact (track, stem, cover...) and its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClipResult {
    pub clip_id: String,
    pub title: String,
    pub state: ClipState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    /// Upstream fields this crate does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ClipResult {
    /// Read one raw status entry, field by field.
    ///
    /// Never fails: a field of an unexpected type degrades to its empty value
    /// instead of rejecting the whole clip. Non-object input yields a default
    /// clip.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };
        let mut extra = fields.clone();
        let mut take = |key: &str| extra.remove(key).unwrap_or(Value::Null);

        let clip_id = text(&take("clip_id")).unwrap_or_default();
        let title = text(&take("title")).unwrap_or_default();
        let state = match take("state") {
            Value::String(label) => ClipState::from(label),
            _ => ClipState::Unknown,
        };
        let audio_url = text(&take("audio_url"));
        let video_url = text(&take("video_url"));
        let image_url = text(&take("image_url"));
        let duration = seconds(&take("duration"));
        let tags = tag_list(&take("tags"));
        let (model_version, mv) = (take("model_version"), take("mv"));
        let model_version = text(&model_version).or_else(|| text(&mv));

        Self {
            clip_id,
            title,
            state,
            audio_url,
            video_url,
            image_url,
            duration,
            tags,
            model_version,
            extra,
        }
    }

    /// Title when present, otherwise the clip id.
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.clip_id
        } else {
            &self.title
        }
    }
}

impl<'de> Deserialize<'de> for ClipResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

// Ids and urls occasionally arrive as numbers.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Durations arrive as numbers or numeric strings depending on the endpoint.
fn seconds(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn tag_list(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let tags: Vec<String> = items.iter().filter_map(text).collect();
            (!tags.is_empty()).then(|| tags.join(", "))
        }
        other => text(other),
    }
}

/// Normalized reply of the status endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEnvelope {
    /// `{"type": "not_ready"}`: the task record is not visible yet.
    NotReady,
    /// Any reply without a usable clip list (other code, missing/empty data).
    Pending { code: Option<i64> },
    /// `{"code": 200, "data": [...]}` with at least one clip.
    Clips(Vec<ClipResult>),
}

impl PollEnvelope {
    /// Classify a raw status reply. Never fails: unusable shapes become `Pending`.
    pub fn from_value(value: &Value) -> Self {
        if value.get("type").and_then(Value::as_str) == Some("not_ready") {
            return PollEnvelope::NotReady;
        }

        let code = value.get("code").and_then(Value::as_i64);
        if code != Some(200) {
            return PollEnvelope::Pending { code };
        }

        let Some(entries) = value.get("data").and_then(Value::as_array) else {
            return PollEnvelope::Pending { code };
        };
        // The first entry's state decides, so it must at least be an object.
        if !entries.first().is_some_and(Value::is_object) {
            return PollEnvelope::Pending { code };
        }

        let clips = entries
            .iter()
            .filter(|entry| {
                let usable = entry.is_object();
                if !usable {
                    tracing::warn!(entry = %entry, "Skipping non-object clip entry in status reply");
                }
                usable
            })
            .map(ClipResult::from_value)
            .collect();
        PollEnvelope::Clips(clips)
    }

    pub fn clips(&self) -> &[ClipResult] {
        match self {
            PollEnvelope::Clips(clips) => clips,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clip_state_vocabulary() {
        assert_eq!(ClipState::from("succeeded".to_string()), ClipState::Succeeded);
        assert_eq!(ClipState::from("ERROR".to_string()), ClipState::Error);
        assert_eq!(
            ClipState::from("rendering".to_string()),
            ClipState::Other("rendering".into())
        );
        assert!(ClipState::Failed.is_terminal());
        assert!(!ClipState::Processing.is_terminal());
        assert!(!ClipState::Other("x".into()).is_terminal());
    }

    #[test]
    fn test_clip_result_tolerates_sparse_and_odd_fields() {
        let clip: ClipResult = serde_json::from_value(json!({
            "clip_id": "abc",
            "title": null,
            "state": "succeeded",
            "duration": "184.5",
            "mv": "chirp-v5",
            "lyrics": "[Verse]"
        }))
        .unwrap();

        assert_eq!(clip.clip_id, "abc");
        assert_eq!(clip.title, "");
        assert_eq!(clip.display_name(), "abc");
        assert_eq!(clip.duration, Some(184.5));
        assert_eq!(clip.model_version.as_deref(), Some("chirp-v5"));
        assert_eq!(clip.extra.get("lyrics"), Some(&json!("[Verse]")));
    }

    #[test]
    fn test_odd_fields_never_hide_the_first_state() {
        let first_state = |entry: Value| {
            let envelope = PollEnvelope::from_value(&json!({"code": 200, "data": [entry]}));
            envelope.clips().first().map(|clip| clip.state.clone())
        };

        assert_eq!(
            first_state(json!({"clip_id": 123, "state": "error"})),
            Some(ClipState::Error)
        );
        assert_eq!(
            first_state(json!({
                "clip_id": "X",
                "state": "succeeded",
                "mv": "chirp-v5",
                "model_version": "chirp-v5"
            })),
            Some(ClipState::Succeeded)
        );
        assert_eq!(
            first_state(json!({"state": "failed", "tags": ["a", "b"]})),
            Some(ClipState::Failed)
        );
        assert_eq!(
            first_state(json!({"state": "succeeded", "duration": {"secs": 3}, "audio_url": null})),
            Some(ClipState::Succeeded)
        );
    }

    #[test]
    fn test_lenient_fields_are_normalized() {
        let clip = ClipResult::from_value(&json!({
            "clip_id": 123,
            "state": 7,
            "tags": ["dream pop", "lo-fi"],
            "mv": "chirp-v4"
        }));
        assert_eq!(clip.clip_id, "123");
        assert_eq!(clip.state, ClipState::Unknown);
        assert_eq!(clip.tags.as_deref(), Some("dream pop, lo-fi"));
        assert_eq!(clip.model_version.as_deref(), Some("chirp-v4"));
        assert!(clip.extra.is_empty());
    }

    #[test]
    fn test_envelope_shapes() {
        assert_eq!(
            PollEnvelope::from_value(&json!({"type": "not_ready"})),
            PollEnvelope::NotReady
        );
        assert_eq!(
            PollEnvelope::from_value(&json!({"code": 202, "data": []})),
            PollEnvelope::Pending { code: Some(202) }
        );
        assert_eq!(
            PollEnvelope::from_value(&json!({"code": 200, "data": []})),
            PollEnvelope::Pending { code: Some(200) }
        );
        assert_eq!(
            PollEnvelope::from_value(&json!({"code": 200})),
            PollEnvelope::Pending { code: Some(200) }
        );
        assert_eq!(
            PollEnvelope::from_value(&json!({"code": 200, "data": {"state": "queued"}})),
            PollEnvelope::Pending { code: Some(200) }
        );
        assert_eq!(
            PollEnvelope::from_value(&json!({"code": 200, "data": ["garbage"]})),
            PollEnvelope::Pending { code: Some(200) }
        );
        assert_eq!(
            PollEnvelope::from_value(&json!({"code": 200, "data": [{"state": "queued"}, "garbage"]}))
                .clips()
                .len(),
            1
        );

        let envelope = PollEnvelope::from_value(&json!({
            "code": 200,
            "data": [{"clip_id": "a", "state": "queued"}, {"clip_id": "b", "state": "queued"}]
        }));
        assert_eq!(envelope.clips().len(), 2);
        assert_eq!(envelope.clips()[0].state, ClipState::Queued);
    }
}
