//! Model versions and vocal options accepted by the music service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TracksError;

/// Music model version, sent on the wire as `mv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelVersion {
    #[serde(rename = "chirp-v3-5")]
    ChirpV3_5,
    #[serde(rename = "chirp-v4")]
    ChirpV4,
    #[serde(rename = "chirp-v4-5")]
    ChirpV4_5,
    #[default]
    #[serde(rename = "chirp-v5")]
    ChirpV5,
}

impl ModelVersion {
    /// Models accepted by create, extend, cover and persona-music jobs.
    pub const GENERATION: &'static [ModelVersion] = &[
        ModelVersion::ChirpV3_5,
        ModelVersion::ChirpV4,
        ModelVersion::ChirpV4_5,
        ModelVersion::ChirpV5,
    ];

    /// Models accepted by remaster and add-vocal jobs.
    pub const ENHANCEMENT: &'static [ModelVersion] =
        &[ModelVersion::ChirpV4_5, ModelVersion::ChirpV5];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelVersion::ChirpV3_5 => "chirp-v3-5",
            ModelVersion::ChirpV4 => "chirp-v4",
            ModelVersion::ChirpV4_5 => "chirp-v4-5",
            ModelVersion::ChirpV5 => "chirp-v5",
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVersion {
    type Err = TracksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::GENERATION
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                TracksError::validation(format!(
                    "unknown model version '{}' (expected one of: {})",
                    s.trim(),
                    join(Self::GENERATION)
                ))
            })
    }
}

pub(crate) fn join(models: &[ModelVersion]) -> String {
    models
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Vocal gender hint for add-vocal jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VocalGender {
    #[serde(rename = "f")]
    Female,
    #[serde(rename = "m")]
    Male,
}

impl VocalGender {
    pub fn as_str(self) -> &'static str {
        match self {
            VocalGender::Female => "f",
            VocalGender::Male => "m",
        }
    }
}

impl FromStr for VocalGender {
    type Err = TracksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" => Ok(VocalGender::Female),
            "m" => Ok(VocalGender::Male),
            other => Err(TracksError::validation(format!(
                "vocal_gender must be 'f' or 'm' (got '{other}')"
            ))),
        }
    }
}
