//! Completion capability trait

use crate::error::TracksError;
use crate::types::CompletionRequest;
use async_trait::async_trait;

/// Free-text generation from a system/user instruction pair.
#[async_trait]
pub trait CompletionCapability: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, TracksError>;
}
