//! Sleeping primitive used between poll attempts.

use std::time::Duration;

use async_trait::async_trait;

/// Waits between poll attempts. Swappable so tests can count sleeps
/// without real waiting.
#[async_trait]
pub trait PollTimer: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real timer backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl PollTimer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
