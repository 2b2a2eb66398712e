//! # TracksMartin
//!
//! Genre-aware lyric generation and music job orchestration.
//!
//! The crate wraps two remote services: an OpenAI-compatible text generator
//! that writes lyrics from genre templates, and a music-generation service
//! that accepts composition jobs. Submitted jobs are awaited with a
//! fixed-interval polling engine and finished assets are streamed to disk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracksmartin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TracksError> {
//!     let writer = LyricsGenerator::new(Arc::new(OpenAiClient::builder().build()?));
//!     let song = writer
//!         .generate(&LyricsRequest::new("late night drive", "synthwave"))
//!         .await?;
//!
//!     let music = SunoClient::builder().build()?;
//!     let task = music
//!         .create(
//!             CreateRequest::custom(song.lyrics)
//!                 .with_title(song.title)
//!                 .with_tags(song.tags),
//!         )
//!         .await?;
//!
//!     let clips = TaskPoller::default().poll(&music, &task.task_id).await?;
//!     for clip in clips {
//!         println!("{} -> {:?}", clip.display_name(), clip.audio_url);
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod assets;
pub mod error;
pub mod execution;
pub mod genres;
pub mod jobs;
pub mod lyrics;
pub mod observability;
pub mod polling;
pub mod providers;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{Result, TracksError};

/// Common imports
pub mod prelude {
    pub use crate::assets::{AssetDownloader, clip_file_name, sanitize_name};
    pub use crate::error::{Result, TracksError};
    pub use crate::genres::{self, GenreTemplate};
    pub use crate::jobs::{
        AddVocalRequest, ConcatRequest, CoverRequest, CreateRequest, ExtendRequest, JobKind,
        JobRequest, ModelVersion, PersonaMusicRequest, PersonaRequest, RemasterRequest,
        StemsRequest, SubmitReceipt, TaskHandle, UploadRequest, VocalGender,
    };
    pub use crate::lyrics::{GeneratedLyrics, LyricsGenerator, LyricsRequest, SongLength};
    pub use crate::polling::{PollOptions, PollProgress, PollTimer, TaskPoller};
    pub use crate::providers::{OpenAiClient, OpenAiConfig, SunoClient, SunoConfig};
    pub use crate::traits::{CompletionCapability, TaskStatusCapability};
    pub use crate::types::{ClipResult, ClipState, CompletionRequest, HttpConfig, PollEnvelope};
    pub use crate::utils::CancelHandle;
}
