//! Job Submission
//!
//! A closed set of job kinds, each validated locally and mapped to one
//! endpoint of the music service. Submitting any of them yields a
//! [`SubmitReceipt`]: a task to poll, a persona id or a clip id.

pub mod model;
pub mod requests;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{Result, TracksError};

pub use model::{ModelVersion, VocalGender};
pub use requests::{
    AddVocalRequest, ConcatRequest, CoverRequest, CreateRequest, ExtendRequest,
    PersonaMusicRequest, PersonaRequest, RemasterRequest, StemsRequest, UploadRequest,
};

/// Job kind, used for endpoint selection and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Create,
    Extend,
    Concat,
    Cover,
    Stems,
    Persona,
    PersonaMusic,
    Remaster,
    AddVocal,
    Upload,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Create => "create",
            JobKind::Extend => "extend",
            JobKind::Concat => "concat",
            JobKind::Cover => "cover",
            JobKind::Stems => "stems",
            JobKind::Persona => "persona",
            JobKind::PersonaMusic => "persona-music",
            JobKind::Remaster => "remaster",
            JobKind::AddVocal => "add-vocal",
            JobKind::Upload => "upload",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submittable job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobRequest {
    Create(CreateRequest),
    Extend(ExtendRequest),
    Concat(ConcatRequest),
    Cover(CoverRequest),
    Stems(StemsRequest),
    Persona(PersonaRequest),
    PersonaMusic(PersonaMusicRequest),
    Remaster(RemasterRequest),
    AddVocal(AddVocalRequest),
    Upload(UploadRequest),
}

impl JobRequest {
    pub fn kind(&self) -> JobKind {
        match self {
            JobRequest::Create(_) => JobKind::Create,
            JobRequest::Extend(_) => JobKind::Extend,
            JobRequest::Concat(_) => JobKind::Concat,
            JobRequest::Cover(_) => JobKind::Cover,
            JobRequest::Stems(_) => JobKind::Stems,
            JobRequest::Persona(_) => JobKind::Persona,
            JobRequest::PersonaMusic(_) => JobKind::PersonaMusic,
            JobRequest::Remaster(_) => JobKind::Remaster,
            JobRequest::AddVocal(_) => JobKind::AddVocal,
            JobRequest::Upload(_) => JobKind::Upload,
        }
    }

    /// Check every parameter invariant. Fails with `ValidationError`.
    pub fn validate(&self) -> Result<()> {
        let outcome = match self {
            JobRequest::Create(r) => r.validate(),
            JobRequest::Extend(r) => r.validate(),
            JobRequest::Concat(r) => r.validate(),
            JobRequest::Cover(r) => r.validate(),
            JobRequest::Stems(r) => r.validate(),
            JobRequest::Persona(r) => r.validate(),
            JobRequest::PersonaMusic(r) => r.validate(),
            JobRequest::Remaster(r) => r.validate(),
            JobRequest::AddVocal(r) => r.validate(),
            JobRequest::Upload(r) => r.validate(),
        };
        outcome.map_err(|e| TracksError::validation(format!("{} request: {e}", self.kind())))
    }

    /// Path relative to the service base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            JobRequest::Create(_) => "suno/create",
            JobRequest::Extend(_) => "suno/extend",
            JobRequest::Concat(_) => "suno/concat",
            JobRequest::Cover(_) => "suno/cover",
            JobRequest::Stems(r) if r.full => "suno/stems/full",
            JobRequest::Stems(_) => "suno/stems/basic",
            JobRequest::Persona(_) => "suno/persona",
            JobRequest::PersonaMusic(_) => "suno/persona/music",
            JobRequest::Remaster(_) => "suno/remaster",
            JobRequest::AddVocal(_) => "suno/add-vocal",
            JobRequest::Upload(_) => "suno/upload",
        }
    }

    /// JSON body sent to [`endpoint`](Self::endpoint).
    pub fn payload(&self) -> Result<Value> {
        Ok(match self {
            JobRequest::Create(r) => r.payload(),
            JobRequest::Extend(r) => serde_json::to_value(r)?,
            JobRequest::Concat(r) => serde_json::to_value(r)?,
            JobRequest::Cover(r) => serde_json::to_value(r)?,
            JobRequest::Stems(r) => serde_json::to_value(r)?,
            JobRequest::Persona(r) => serde_json::to_value(r)?,
            JobRequest::PersonaMusic(r) => serde_json::to_value(r)?,
            JobRequest::Remaster(r) => serde_json::to_value(r)?,
            JobRequest::AddVocal(r) => serde_json::to_value(r)?,
            JobRequest::Upload(r) => serde_json::to_value(r)?,
        })
    }

    /// Interpret a successful reply according to this job's receipt contract.
    pub fn receipt_from(&self, response: &Value) -> Result<SubmitReceipt> {
        let field = match self.kind() {
            JobKind::Persona => "persona_id",
            JobKind::Upload => "clip_id",
            _ => "task_id",
        };

        let id = identifier(response, field).ok_or_else(|| {
            TracksError::protocol(format!(
                "No {field} in {} response: {}",
                self.kind(),
                crate::error::truncate_body(&response.to_string())
            ))
        })?;

        Ok(match self.kind() {
            JobKind::Persona => SubmitReceipt::Persona { persona_id: id },
            JobKind::Upload => SubmitReceipt::Clip { clip_id: id },
            _ => SubmitReceipt::Task(TaskHandle { task_id: id }),
        })
    }
}

// Identifier at the top level, or nested under `data` for services that wrap replies.
fn identifier(response: &Value, field: &str) -> Option<String> {
    response
        .get(field)
        .or_else(|| response.get("data").and_then(|d| d.get(field)))
        .and_then(|v| match v {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}

macro_rules! impl_from_request {
    ($($request:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$request> for JobRequest {
                fn from(request: $request) -> Self {
                    JobRequest::$variant(request)
                }
            }
        )*
    };
}

impl_from_request! {
    CreateRequest => Create,
    ExtendRequest => Extend,
    ConcatRequest => Concat,
    CoverRequest => Cover,
    StemsRequest => Stems,
    PersonaRequest => Persona,
    PersonaMusicRequest => PersonaMusic,
    RemasterRequest => Remaster,
    AddVocalRequest => AddVocal,
    UploadRequest => Upload,
}

/// Handle of an asynchronous job, the key for polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

/// What a successful submission returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReceipt {
    Task(TaskHandle),
    Persona { persona_id: String },
    Clip { clip_id: String },
}

impl SubmitReceipt {
    /// The task handle for pollable jobs.
    pub fn task(&self) -> Option<&TaskHandle> {
        match self {
            SubmitReceipt::Task(handle) => Some(handle),
            _ => None,
        }
    }

    /// The identifier carried by this receipt, whatever its kind.
    pub fn id(&self) -> &str {
        match self {
            SubmitReceipt::Task(handle) => &handle.task_id,
            SubmitReceipt::Persona { persona_id } => persona_id,
            SubmitReceipt::Clip { clip_id } => clip_id,
        }
    }

    /// Expect a task handle; other receipts are a protocol violation.
    pub fn into_task(self) -> Result<TaskHandle> {
        match self {
            SubmitReceipt::Task(handle) => Ok(handle),
            other => Err(TracksError::protocol(format!(
                "expected a task id, got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoints() {
        assert_eq!(
            JobRequest::from(StemsRequest::basic("c")).endpoint(),
            "suno/stems/basic"
        );
        assert_eq!(
            JobRequest::from(StemsRequest::full("c")).endpoint(),
            "suno/stems/full"
        );
        assert_eq!(
            JobRequest::from(PersonaMusicRequest::new("p", "x")).endpoint(),
            "suno/persona/music"
        );
        assert_eq!(
            JobRequest::from(AddVocalRequest::new("c", "x", 0.0, 1.0)).endpoint(),
            "suno/add-vocal"
        );
    }

    #[test]
    fn test_payload_wire_names() {
        let extend = JobRequest::from(
            ExtendRequest::new("clip-1", "more words", 42.0).with_model(ModelVersion::ChirpV4),
        )
        .payload()
        .unwrap();
        assert_eq!(
            extend,
            json!({"clip_id": "clip-1", "prompt": "more words", "continue_at": 42.0, "mv": "chirp-v4"})
        );

        let concat = JobRequest::from(ConcatRequest::new(["a", "b"]))
            .payload()
            .unwrap();
        assert_eq!(concat, json!({"clip_ids": ["a", "b"]}));

        let stems = JobRequest::from(StemsRequest::full("c")).payload().unwrap();
        assert_eq!(stems, json!({"clip_id": "c"}));

        let vocal = JobRequest::from(
            AddVocalRequest::new("c", "sing", 1.0, 9.5).with_vocal_gender(VocalGender::Female),
        )
        .payload()
        .unwrap();
        assert_eq!(vocal["vocal_gender"], json!("f"));
        assert_eq!(vocal["mv"], json!("chirp-v5"));
        assert!(vocal.get("audio_weight").is_none());
    }

    #[test]
    fn test_validation_error_names_kind() {
        let err = JobRequest::from(CreateRequest::custom("x").with_style_weight(1.5))
            .validate()
            .unwrap_err();
        assert!(matches!(err, TracksError::ValidationError(_)));
        assert!(err.to_string().contains("create request"));
    }

    #[test]
    fn test_receipts() {
        let create = JobRequest::from(CreateRequest::custom("x"));
        assert_eq!(
            create.receipt_from(&json!({"task_id": "t-1"})).unwrap(),
            SubmitReceipt::Task(TaskHandle {
                task_id: "t-1".into()
            })
        );
        assert_eq!(
            create
                .receipt_from(&json!({"code": 200, "data": {"task_id": "t-2"}}))
                .unwrap()
                .id(),
            "t-2"
        );
        assert!(matches!(
            create.receipt_from(&json!({"message": "ok"})),
            Err(TracksError::ProtocolError(_))
        ));
        assert!(matches!(
            create.receipt_from(&json!({"task_id": ""})),
            Err(TracksError::ProtocolError(_))
        ));

        let persona = JobRequest::from(PersonaRequest::new("n", "d", ["a"]));
        let receipt = persona.receipt_from(&json!({"persona_id": "p-9"})).unwrap();
        assert_eq!(receipt.id(), "p-9");
        assert!(receipt.task().is_none());
        assert!(receipt.into_task().is_err());

        let upload = JobRequest::from(UploadRequest::new("https://x.test/a.mp3"));
        assert_eq!(
            upload.receipt_from(&json!({"clip_id": "c-3"})).unwrap(),
            SubmitReceipt::Clip {
                clip_id: "c-3".into()
            }
        );
    }
}
