//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracksmartin::polling::PollTimer;
use tracksmartin::providers::{OpenAiClient, SunoClient};
use tracksmartin::traits::TaskStatusCapability;
use tracksmartin::types::{ClipResult, ClipState, PollEnvelope};
use tracksmartin::{Result, TracksError};

pub const TEST_KEY: &str = "test-api-key";

/// Status source that replays canned replies, then reports "pending" forever.
pub struct ScriptedStatus {
    replies: Mutex<VecDeque<Result<PollEnvelope>>>,
    calls: AtomicU32,
}

impl ScriptedStatus {
    pub fn new(replies: Vec<Result<PollEnvelope>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskStatusCapability for ScriptedStatus {
    async fn task_status(&self, _task_id: &str) -> std::result::Result<PollEnvelope, TracksError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PollEnvelope::Pending { code: None }))
    }
}

/// Timer that returns immediately and remembers every requested sleep.
#[derive(Default)]
pub struct RecordingTimer {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingTimer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl PollTimer for RecordingTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Timer that never wakes up.
pub struct StalledTimer;

#[async_trait]
impl PollTimer for StalledTimer {
    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await;
    }
}

pub fn clip(id: &str, state: &str) -> ClipResult {
    ClipResult {
        clip_id: id.to_string(),
        title: format!("Song {id}"),
        state: ClipState::from(state.to_string()),
        audio_url: Some(format!("https://cdn.example/{id}.mp3")),
        ..Default::default()
    }
}

pub fn clips(states: &[&str]) -> PollEnvelope {
    PollEnvelope::Clips(
        states
            .iter()
            .enumerate()
            .map(|(i, state)| clip(&format!("clip-{i}"), state))
            .collect(),
    )
}

pub fn suno_client(base_url: &str) -> SunoClient {
    SunoClient::builder()
        .api_key(TEST_KEY)
        .base_url(base_url)
        .env_fallback(false)
        .build()
        .expect("valid test client")
}

pub fn openai_client(base_url: &str) -> OpenAiClient {
    OpenAiClient::builder()
        .api_key(TEST_KEY)
        .base_url(base_url)
        .env_fallback(false)
        .build()
        .expect("valid test client")
}
