//! Error Handling Module
//!
//! This module provides the single error type shared by every component:
//! - Core error type (`TracksError`) and its classification helpers
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use tracksmartin::error::TracksError;
//!
//! let error = TracksError::api_error(404, "Not found");
//! assert_eq!(error.status_code(), Some(404));
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
