//! Per-kind job parameters.
//!
//! Each request is validated with `validator` before a payload is built, so
//! rejected parameters never reach the network.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError};

use super::model::{ModelVersion, VocalGender, join};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be blank")));
    }
    Ok(())
}

fn no_blank_ids(ids: &[String]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(
            ValidationError::new("blank_id").with_message(Cow::from("clip ids must not be blank"))
        );
    }
    Ok(())
}

fn finite(fields: &[(&'static str, Option<f64>)]) -> Result<(), ValidationError> {
    for (name, value) in fields {
        if let Some(v) = value
            && !v.is_finite()
        {
            return Err(ValidationError::new("non_finite")
                .with_message(Cow::from(format!("{name} must be a finite number"))));
        }
    }
    Ok(())
}

fn enhancement_model(model: ModelVersion) -> Result<(), ValidationError> {
    if ModelVersion::ENHANCEMENT.contains(&model) {
        return Ok(());
    }
    Err(
        ValidationError::new("unsupported_model").with_message(Cow::from(format!(
            "model {model} is not supported here (expected one of: {})",
            join(ModelVersion::ENHANCEMENT)
        ))),
    )
}

/// Song creation, either from custom lyrics or from a free-text description.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_create"))]
pub struct CreateRequest {
    /// Lyrics in custom mode, description otherwise.
    #[validate(custom(function = "not_blank"))]
    pub prompt: String,
    pub custom_mode: bool,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub negative_tags: Option<String>,
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0.0 and 1.0"))]
    pub style_weight: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0.0 and 1.0"))]
    pub weirdness_constraint: Option<f64>,
    pub make_instrumental: bool,
    pub model: ModelVersion,
}

fn validate_create(request: &CreateRequest) -> Result<(), ValidationError> {
    finite(&[
        ("style_weight", request.style_weight),
        ("weirdness_constraint", request.weirdness_constraint),
    ])
}

impl CreateRequest {
    /// Custom mode: `lyrics` are sung as written.
    pub fn custom(lyrics: impl Into<String>) -> Self {
        Self {
            prompt: lyrics.into(),
            custom_mode: true,
            title: None,
            tags: None,
            negative_tags: None,
            style_weight: None,
            weirdness_constraint: None,
            make_instrumental: false,
            model: ModelVersion::default(),
        }
    }

    /// Description mode: the service writes lyrics and style from `description`.
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            custom_mode: false,
            ..Self::custom(description)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_negative_tags(mut self, tags: impl Into<String>) -> Self {
        self.negative_tags = Some(tags.into());
        self
    }

    pub fn with_style_weight(mut self, weight: f64) -> Self {
        self.style_weight = Some(weight);
        self
    }

    pub fn with_weirdness_constraint(mut self, weirdness: f64) -> Self {
        self.weirdness_constraint = Some(weirdness);
        self
    }

    pub fn instrumental(mut self, instrumental: bool) -> Self {
        self.make_instrumental = instrumental;
        self
    }

    pub fn with_model(mut self, model: ModelVersion) -> Self {
        self.model = model;
        self
    }

    pub(crate) fn payload(&self) -> Value {
        let mut body = Map::new();
        body.insert("custom_mode".into(), json!(self.custom_mode));
        if !self.custom_mode {
            body.insert("gpt_description_prompt".into(), json!(self.prompt));
            body.insert("make_instrumental".into(), json!(self.make_instrumental));
            body.insert("mv".into(), json!(self.model));
            return Value::Object(body);
        }

        body.insert("prompt".into(), json!(self.prompt));
        body.insert("make_instrumental".into(), json!(self.make_instrumental));
        body.insert("mv".into(), json!(self.model));
        insert_text(&mut body, "title", &self.title);
        insert_text(&mut body, "tags", &self.tags);
        insert_text(&mut body, "negative_tags", &self.negative_tags);
        if let Some(weight) = self.style_weight {
            body.insert("style_weight".into(), json!(weight));
        }
        if let Some(weirdness) = self.weirdness_constraint {
            body.insert("weirdness_constraint".into(), json!(weirdness));
        }
        Value::Object(body)
    }
}

// Blank optional text is omitted rather than sent as "".
fn insert_text(body: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(text) = value.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        body.insert(key.to_string(), json!(text));
    }
}

/// Continue an existing clip from `continue_at` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_extend"))]
pub struct ExtendRequest {
    #[validate(custom(function = "not_blank"))]
    pub clip_id: String,
    /// Lyrics for the continuation; empty lets the service continue instrumentally.
    pub prompt: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub continue_at: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "mv", skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelVersion>,
}

fn validate_extend(request: &ExtendRequest) -> Result<(), ValidationError> {
    finite(&[("continue_at", Some(request.continue_at))])
}

impl ExtendRequest {
    pub fn new(clip_id: impl Into<String>, prompt: impl Into<String>, continue_at: f64) -> Self {
        Self {
            clip_id: clip_id.into(),
            prompt: prompt.into(),
            continue_at,
            tags: None,
            title: None,
            model: None,
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_model(mut self, model: ModelVersion) -> Self {
        self.model = Some(model);
        self
    }
}

/// Join clips end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ConcatRequest {
    #[validate(
        length(min = 1, message = "at least one clip id is required"),
        custom(function = "no_blank_ids")
    )]
    pub clip_ids: Vec<String>,
}

impl ConcatRequest {
    pub fn new<I, S>(clip_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clip_ids: clip_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Re-record a clip with new lyrics and/or style.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CoverRequest {
    #[validate(custom(function = "not_blank"))]
    pub clip_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "mv", skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelVersion>,
}

impl CoverRequest {
    pub fn new(clip_id: impl Into<String>) -> Self {
        Self {
            clip_id: clip_id.into(),
            prompt: None,
            tags: None,
            title: None,
            model: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_model(mut self, model: ModelVersion) -> Self {
        self.model = Some(model);
        self
    }
}

/// Stem separation. Basic splits vocals from instrumentals; full splits
/// vocals, bass, drums and the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct StemsRequest {
    #[validate(custom(function = "not_blank"))]
    pub clip_id: String,
    #[serde(skip)]
    pub full: bool,
}

impl StemsRequest {
    pub fn basic(clip_id: impl Into<String>) -> Self {
        Self {
            clip_id: clip_id.into(),
            full: false,
        }
    }

    pub fn full(clip_id: impl Into<String>) -> Self {
        Self {
            clip_id: clip_id.into(),
            full: true,
        }
    }
}

/// Create a reusable vocal persona from sample clips.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct PersonaRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub description: String,
    #[validate(
        length(min = 1, message = "at least one sample clip id is required"),
        custom(function = "no_blank_ids")
    )]
    pub sample_clip_ids: Vec<String>,
}

impl PersonaRequest {
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            sample_clip_ids: samples.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create a song sung by an existing persona.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct PersonaMusicRequest {
    #[validate(custom(function = "not_blank"))]
    pub persona_id: String,
    #[validate(custom(function = "not_blank"))]
    pub prompt: String,
    #[serde(rename = "mv")]
    pub model: ModelVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl PersonaMusicRequest {
    pub fn new(persona_id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            prompt: prompt.into(),
            model: ModelVersion::default(),
            title: None,
            tags: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_model(mut self, model: ModelVersion) -> Self {
        self.model = model;
        self
    }
}

/// Re-render a clip with a newer model.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_remaster"))]
pub struct RemasterRequest {
    #[validate(custom(function = "not_blank"))]
    pub clip_id: String,
    #[serde(rename = "mv")]
    pub model: ModelVersion,
}

fn validate_remaster(request: &RemasterRequest) -> Result<(), ValidationError> {
    enhancement_model(request.model)
}

impl RemasterRequest {
    pub fn new(clip_id: impl Into<String>) -> Self {
        Self {
            clip_id: clip_id.into(),
            model: ModelVersion::default(),
        }
    }

    pub fn with_model(mut self, model: ModelVersion) -> Self {
        self.model = model;
        self
    }
}

/// Add sung vocals to a time window of an instrumental clip.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_add_vocal"))]
pub struct AddVocalRequest {
    #[validate(custom(function = "not_blank"))]
    pub clip_id: String,
    #[validate(custom(function = "not_blank"))]
    pub prompt: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub start_time: f64,
    pub end_time: f64,
    #[serde(rename = "mv")]
    pub model: ModelVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocal_gender: Option<VocalGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0.0 and 1.0"))]
    pub style_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0.0 and 1.0"))]
    pub weirdness_constraint: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0.0 and 1.0"))]
    pub audio_weight: Option<f64>,
}

fn validate_add_vocal(request: &AddVocalRequest) -> Result<(), ValidationError> {
    finite(&[
        ("start_time", Some(request.start_time)),
        ("end_time", Some(request.end_time)),
        ("style_weight", request.style_weight),
        ("weirdness_constraint", request.weirdness_constraint),
        ("audio_weight", request.audio_weight),
    ])?;
    if request.end_time <= request.start_time {
        return Err(ValidationError::new("time_window")
            .with_message(Cow::from("end_time must be greater than start_time")));
    }
    enhancement_model(request.model)
}

impl AddVocalRequest {
    pub fn new(
        clip_id: impl Into<String>,
        prompt: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            clip_id: clip_id.into(),
            prompt: prompt.into(),
            start_time,
            end_time,
            model: ModelVersion::default(),
            tags: None,
            title: None,
            negative_tags: None,
            vocal_gender: None,
            style_weight: None,
            weirdness_constraint: None,
            audio_weight: None,
        }
    }

    pub fn with_model(mut self, model: ModelVersion) -> Self {
        self.model = model;
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_negative_tags(mut self, tags: impl Into<String>) -> Self {
        self.negative_tags = Some(tags.into());
        self
    }

    pub fn with_vocal_gender(mut self, gender: VocalGender) -> Self {
        self.vocal_gender = Some(gender);
        self
    }

    pub fn with_style_weight(mut self, weight: f64) -> Self {
        self.style_weight = Some(weight);
        self
    }

    pub fn with_weirdness_constraint(mut self, weirdness: f64) -> Self {
        self.weirdness_constraint = Some(weirdness);
        self
    }

    pub fn with_audio_weight(mut self, weight: f64) -> Self {
        self.audio_weight = Some(weight);
        self
    }
}

/// Register externally hosted audio as a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct UploadRequest {
    #[validate(
        custom(function = "not_blank"),
        url(message = "must be an absolute URL")
    )]
    pub url: String,
}

impl UploadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
