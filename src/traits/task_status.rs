//! Task status capability trait

use crate::error::TracksError;
use crate::types::PollEnvelope;
use async_trait::async_trait;

/// Source of job status replies for the polling engine.
///
/// Task status querying is the only upstream call the poller makes:
/// 1. A job is submitted elsewhere and yields a task id
/// 2. The poller calls [`TaskStatusCapability::task_status`] once per attempt
/// 3. Transport errors propagate to the poller unchanged
#[async_trait]
pub trait TaskStatusCapability: Send + Sync {
    async fn task_status(&self, task_id: &str) -> Result<PollEnvelope, TracksError>;
}
