//! HTTP helpers

pub mod client;
pub mod response;

pub use client::build_http_client_from_config;
pub use response::read_json;
