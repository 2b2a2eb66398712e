//! Type Conversions for TracksError
//!
//! This module contains From trait implementations for converting
//! common error types into TracksError.

use super::types::TracksError;

impl From<reqwest::Error> for TracksError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::api_error(status.as_u16(), err.to_string());
        }
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for TracksError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for TracksError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for TracksError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: TracksError = json_err.into();
        assert!(matches!(err, TracksError::JsonError(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TracksError = io_err.into();
        assert!(matches!(err, TracksError::IoError(_)));
    }
}
