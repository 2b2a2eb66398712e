//! Cancellation utilities
//!
//! Provides first-class cancellation handles for long-running waits such as
//! task polling.

use std::future::Future;
use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Any wait observing this handle stops at its next
    /// suspension point and reports no partial result.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Drive `future` to completion unless cancellation is requested first.
    ///
    /// Returns `None` when cancelled.
    pub async fn run_until_cancelled<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = future => Some(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancelled_handle_short_circuits_future() {
        let handle = CancelHandle::new();
        handle.cancel();
        assert!(handle.is_cancelled());

        let out = handle
            .run_until_cancelled(tokio::time::sleep(Duration::from_secs(3600)))
            .await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn live_handle_lets_future_finish() {
        let handle = CancelHandle::new();
        let out = handle.run_until_cancelled(async { 7 }).await;
        assert_eq!(out, Some(7));

        let clone = handle.clone();
        clone.cancel();
        assert!(handle.is_cancelled());
    }
}
