//! Polling Engine
//!
//! Waits for a submitted job to finish by querying its status at a fixed
//! interval:
//!
//! 1. Sleep `interval` before every attempt, the first one included
//! 2. Query the status source once
//! 3. `not_ready` or a reply without clips keeps waiting
//! 4. Otherwise the first clip's state decides: succeeded returns every clip,
//!    error/failed aborts with [`TracksError::JobFailed`]
//! 5. After `max_attempts` attempts the wait fails with
//!    [`TracksError::PollTimeout`]
//!
//! Transport errors from the status source are returned immediately.

mod timer;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Result, TracksError};
use crate::traits::TaskStatusCapability;
use crate::types::{ClipResult, ClipState, PollEnvelope};
use crate::utils::CancelHandle;

pub use timer::{PollTimer, TokioTimer};

/// Attempt budget and spacing for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

impl PollOptions {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
    pub const STEMS_MAX_ATTEMPTS: u32 = 30;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(15);

    pub fn new() -> Self {
        Self::default()
    }

    /// Stem separation takes longer than generation.
    pub fn for_stems() -> Self {
        Self::default().with_max_attempts(Self::STEMS_MAX_ATTEMPTS)
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Total waiting time when every attempt is used.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }
}

/// What one attempt saw.
#[derive(Debug, Clone, PartialEq)]
pub enum PollObservation {
    NotReady,
    Pending { code: Option<i64> },
    InProgress { state: ClipState, clips: usize },
    Succeeded { clips: usize },
    Failed { state: ClipState },
}

impl fmt::Display for PollObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollObservation::NotReady => f.write_str("not ready"),
            PollObservation::Pending { code: Some(code) } => write!(f, "pending (code {code})"),
            PollObservation::Pending { code: None } => f.write_str("pending"),
            PollObservation::InProgress { state, .. } => write!(f, "{state}"),
            PollObservation::Succeeded { clips } => write!(f, "succeeded ({clips} clips)"),
            PollObservation::Failed { state } => write!(f, "failed ({state})"),
        }
    }
}

/// Progress report handed to the observer after every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PollProgress {
    pub task_id: String,
    pub attempt: u32,
    pub max_attempts: u32,
    pub observation: PollObservation,
}

type ProgressObserver = Arc<dyn Fn(&PollProgress) + Send + Sync>;

/// Fixed-interval poller.
#[derive(Clone)]
pub struct TaskPoller {
    options: PollOptions,
    timer: Arc<dyn PollTimer>,
    cancel: Option<CancelHandle>,
    observer: Option<ProgressObserver>,
}

impl fmt::Debug for TaskPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskPoller")
            .field("options", &self.options)
            .field("cancellable", &self.cancel.is_some())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl Default for TaskPoller {
    fn default() -> Self {
        Self::new(PollOptions::default())
    }
}

impl TaskPoller {
    pub fn new(options: PollOptions) -> Self {
        Self {
            options,
            timer: Arc::new(TokioTimer),
            cancel: None,
            observer: None,
        }
    }

    pub fn options(&self) -> PollOptions {
        self.options
    }

    pub fn with_timer(mut self, timer: Arc<dyn PollTimer>) -> Self {
        self.timer = timer;
        self
    }

    pub fn with_cancel(mut self, handle: CancelHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&PollProgress) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Wait for `task_id` to reach a terminal state and return its clips.
    pub async fn poll(
        &self,
        source: &dyn TaskStatusCapability,
        task_id: &str,
    ) -> Result<Vec<ClipResult>> {
        let PollOptions {
            max_attempts,
            interval,
        } = self.options;

        info!(
            task_id,
            max_attempts,
            interval_secs = interval.as_secs_f64(),
            "Waiting for task"
        );

        for attempt in 1..=max_attempts {
            self.sleep(task_id, interval).await?;

            let envelope = source.task_status(task_id).await?;
            let (observation, outcome) = interpret(task_id, envelope);

            info!(task_id, attempt, max_attempts, status = %observation, "Poll attempt");
            if let Some(observer) = &self.observer {
                observer(&PollProgress {
                    task_id: task_id.to_string(),
                    attempt,
                    max_attempts,
                    observation,
                });
            }

            if let Some(outcome) = outcome {
                return outcome;
            }
        }

        let elapsed = self.options.budget();
        warn!(
            task_id,
            attempts = max_attempts,
            elapsed_secs = elapsed.as_secs(),
            "Task did not finish within the polling budget"
        );
        Err(TracksError::PollTimeout {
            task_id: task_id.to_string(),
            attempts: max_attempts,
            elapsed,
        })
    }

    async fn sleep(&self, task_id: &str, interval: Duration) -> Result<()> {
        let Some(cancel) = &self.cancel else {
            self.timer.sleep(interval).await;
            return Ok(());
        };

        let cancelled = || {
            debug!(task_id, "Poll cancelled");
            TracksError::Cancelled {
                task_id: task_id.to_string(),
            }
        };
        if cancel.is_cancelled() {
            return Err(cancelled());
        }
        cancel
            .run_until_cancelled(self.timer.sleep(interval))
            .await
            .ok_or_else(cancelled)
    }
}

// Terminal outcome when the first clip's state settles the wait.
fn interpret(
    task_id: &str,
    envelope: PollEnvelope,
) -> (PollObservation, Option<Result<Vec<ClipResult>>>) {
    match envelope {
        PollEnvelope::NotReady => (PollObservation::NotReady, None),
        PollEnvelope::Pending { code } => (PollObservation::Pending { code }, None),
        PollEnvelope::Clips(clips) => {
            let Some(first) = clips.first() else {
                return (PollObservation::Pending { code: Some(200) }, None);
            };
            let state = first.state.clone();
            if state.is_success() {
                let observation = PollObservation::Succeeded { clips: clips.len() };
                (observation, Some(Ok(clips)))
            } else if state.is_failure() {
                let error = TracksError::JobFailed {
                    task_id: task_id.to_string(),
                    state: state.to_string(),
                };
                (PollObservation::Failed { state }, Some(Err(error)))
            } else {
                let observation = PollObservation::InProgress {
                    state,
                    clips: clips.len(),
                };
                (observation, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tracing_test::traced_test;

    struct NoWait;

    #[async_trait]
    impl PollTimer for NoWait {
        async fn sleep(&self, _duration: Duration) {}
    }

    struct AlwaysQueued;

    #[async_trait]
    impl TaskStatusCapability for AlwaysQueued {
        async fn task_status(&self, task_id: &str) -> Result<PollEnvelope> {
            Ok(PollEnvelope::Clips(vec![ClipResult {
                clip_id: format!("{task_id}-clip"),
                state: ClipState::Queued,
                ..Default::default()
            }]))
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_attempts_and_timeout_are_logged() {
        let poller = TaskPoller::new(PollOptions::new().with_max_attempts(2))
            .with_timer(Arc::new(NoWait));

        let err = poller.poll(&AlwaysQueued, "logged-task").await.unwrap_err();

        assert!(matches!(err, TracksError::PollTimeout { attempts: 2, .. }));
        assert!(logs_contain("Poll attempt"));
        assert!(logs_contain("logged-task"));
        assert!(logs_contain("status=queued"));
        assert!(logs_contain("polling budget"));
    }

    #[test]
    fn test_defaults() {
        let options = PollOptions::default();
        assert_eq!(options.max_attempts, 20);
        assert_eq!(options.interval, Duration::from_secs(15));
        assert_eq!(options.budget(), Duration::from_secs(300));
        assert_eq!(PollOptions::for_stems().max_attempts, 30);
    }

    #[test]
    fn test_interpret_first_clip_decides() {
        let clip = |state: &str| ClipResult {
            clip_id: "c".into(),
            state: ClipState::from(state.to_string()),
            ..Default::default()
        };

        let (observation, outcome) =
            interpret("t", PollEnvelope::Clips(vec![clip("succeeded"), clip("queued")]));
        assert_eq!(observation, PollObservation::Succeeded { clips: 2 });
        assert_eq!(outcome.unwrap().unwrap().len(), 2);

        let (_, outcome) =
            interpret("t", PollEnvelope::Clips(vec![clip("streaming"), clip("succeeded")]));
        assert!(outcome.is_none());

        let (observation, outcome) = interpret("t", PollEnvelope::Clips(vec![clip("failed")]));
        assert_eq!(
            observation,
            PollObservation::Failed {
                state: ClipState::Failed
            }
        );
        assert!(matches!(
            outcome,
            Some(Err(TracksError::JobFailed { ref state, .. })) if state == "failed"
        ));

        let (observation, outcome) = interpret("t", PollEnvelope::NotReady);
        assert_eq!(observation.to_string(), "not ready");
        assert!(outcome.is_none());
    }
}
