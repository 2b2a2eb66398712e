//! Shared data types.

pub mod clip;
pub mod completion;
pub mod http;

pub use clip::{ClipResult, ClipState, PollEnvelope};
pub use completion::CompletionRequest;
pub use http::HttpConfig;
