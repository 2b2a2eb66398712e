//! Execution layer: HTTP client construction and response handling.

pub mod http;
