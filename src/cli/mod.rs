//! Command-line interface definitions and shared command context.

mod commands;
mod output;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;

use tracksmartin::assets::AssetDownloader;
use tracksmartin::jobs::{ModelVersion, VocalGender};
use tracksmartin::lyrics::{LyricsGenerator, SongLength};
use tracksmartin::observability::{OutputFormat, SubscriberConfig, init_subscriber};
use tracksmartin::polling::{PollOptions, TaskPoller};
use tracksmartin::providers::{OpenAiClient, OpenAiConfig, SunoClient, SunoConfig};
use tracksmartin::types::HttpConfig;
use tracksmartin::utils::CancelHandle;
use tracksmartin::TracksError;

/// TracksMartin: hits on demand.
///
/// Genre-aware lyric generation and AI music production from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tracksmartin", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Music service API key
    #[arg(long, env = "SUNO_API_KEY", hide_env_values = true, global = true)]
    pub suno_api_key: Option<String>,

    /// Music service base URL
    #[arg(long, env = "SUNO_API_BASE_URL", default_value = SunoConfig::DEFAULT_BASE_URL, global = true)]
    pub suno_base_url: String,

    /// Text generation API key
    #[arg(long, env = "OPENAI_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    /// Text generation base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = OpenAiConfig::DEFAULT_BASE_URL, global = true)]
    pub openai_base_url: String,

    /// Model used to write lyrics
    #[arg(long, default_value = OpenAiConfig::DEFAULT_MODEL, global = true)]
    pub lyrics_model: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Per-download timeout in seconds
    #[arg(long, default_value_t = 300, global = true)]
    pub download_timeout: u64,

    /// Seconds between status checks while waiting
    #[arg(long, default_value_t = 15, global = true)]
    pub poll_interval: u64,

    /// Status checks before giving up (default: 20, stems: 30)
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Directory for the daily log file
    #[arg(long, env = "TRACKSMARTIN_LOG_DIR", default_value = "logs", global = true)]
    pub log_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TRACKSMARTIN_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Do not write a log file
    #[arg(long, global = true)]
    pub no_log_file: bool,

    /// Emit console logs as JSON (with --verbose)
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new song, from your lyrics, AI-written lyrics or a description
    Create(CreateArgs),
    /// Write lyrics only
    Lyrics(LyricsArgs),
    /// Show the status of a task
    Get {
        task_id: String,
        #[command(flatten)]
        download: DownloadArgs,
    },
    /// Wait for an existing task to finish
    Wait {
        task_id: String,
        #[command(flatten)]
        download: DownloadArgs,
    },
    /// Continue an existing clip
    Extend(ExtendArgs),
    /// Join clips into one song
    Concat {
        /// Clip ids in playback order
        #[arg(required = true, num_args = 1..)]
        clip_ids: Vec<String>,
        #[command(flatten)]
        follow: FollowArgs,
    },
    /// Create a cover version of a clip
    Cover(CoverArgs),
    /// Separate a clip into stems
    Stems {
        clip_id: String,
        /// Vocals, bass, drums and other instead of vocals/instrumental
        #[arg(long)]
        full: bool,
        #[command(flatten)]
        follow: FollowArgs,
    },
    /// Re-render a clip with a newer model
    Remaster {
        clip_id: String,
        /// chirp-v4-5 or chirp-v5
        #[arg(long, default_value = "chirp-v5")]
        model: ModelVersion,
        #[command(flatten)]
        follow: FollowArgs,
    },
    /// Add vocals to part of an instrumental clip
    AddVocal(AddVocalArgs),
    /// Create a reusable vocal persona from sample clips
    Persona {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Clips whose vocals define the persona
        #[arg(required = true, num_args = 1..)]
        sample_clip_ids: Vec<String>,
    },
    /// Create a song sung by a persona
    PersonaMusic(PersonaMusicArgs),
    /// Register hosted audio as a clip
    Upload { url: String },
    /// Get the WAV rendition of a clip
    Wav(AssetArgs),
    /// Get the MIDI transcription of a clip
    Midi(AssetArgs),
    /// Show remaining API credits
    Credits,
    /// List supported genres or describe one
    Genres {
        #[arg(short, long)]
        genre: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(short, long)]
    pub title: Option<String>,
    /// Lyrics, with [Verse]/[Chorus] section markers
    #[arg(short, long, conflicts_with = "prompt_file")]
    pub prompt: Option<String>,
    /// Read lyrics from a file
    #[arg(short = 'f', long)]
    pub prompt_file: Option<PathBuf>,
    /// Describe the song instead of providing lyrics
    #[arg(long, conflicts_with_all = ["prompt", "prompt_file", "auto_lyrics"])]
    pub description: Option<String>,
    #[arg(short, long)]
    pub genre: Option<String>,
    /// Write the lyrics with AI
    #[arg(long, requires_all = ["theme", "genre"], conflicts_with_all = ["prompt", "prompt_file"])]
    pub auto_lyrics: bool,
    #[arg(long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub mood: Option<String>,
    #[arg(long, default_value = "medium")]
    pub length: SongLength,
    /// Style tags, e.g. "future pop, energetic, 120 bpm"
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub negative_tags: Option<String>,
    /// Style adherence, 0.0 to 1.0
    #[arg(long)]
    pub style_weight: Option<f64>,
    /// Creative freedom, 0.0 to 1.0
    #[arg(long)]
    pub weirdness: Option<f64>,
    #[arg(short, long, default_value = "chirp-v5")]
    pub model: ModelVersion,
    #[arg(long)]
    pub instrumental: bool,
    #[command(flatten)]
    pub follow: FollowArgs,
}

#[derive(Debug, Args)]
pub struct LyricsArgs {
    #[arg(long)]
    pub theme: String,
    #[arg(short, long)]
    pub genre: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(long)]
    pub mood: Option<String>,
    #[arg(long, default_value = "medium")]
    pub length: SongLength,
    /// Extra instructions for the writer
    #[arg(long)]
    pub notes: Option<String>,
    /// Rework the first draft, e.g. "make the chorus catchier"
    #[arg(long)]
    pub refine: Option<String>,
    /// Save the lyrics to a timestamped text file
    #[arg(long)]
    pub save: bool,
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExtendArgs {
    pub clip_id: String,
    /// Lyrics for the extension
    #[arg(short, long, default_value = "")]
    pub lyrics: String,
    /// Seconds into the clip to continue from
    #[arg(long, default_value_t = 0.0)]
    pub continue_at: f64,
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub model: Option<ModelVersion>,
    #[command(flatten)]
    pub follow: FollowArgs,
}

#[derive(Debug, Args)]
pub struct CoverArgs {
    pub clip_id: String,
    /// New lyrics
    #[arg(short, long)]
    pub prompt: Option<String>,
    /// New style tags
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub model: Option<ModelVersion>,
    #[command(flatten)]
    pub follow: FollowArgs,
}

#[derive(Debug, Args)]
pub struct AddVocalArgs {
    pub clip_id: String,
    /// Lyrics to sing
    #[arg(short, long)]
    pub prompt: String,
    #[arg(long)]
    pub start_time: f64,
    #[arg(long)]
    pub end_time: f64,
    #[arg(short, long, default_value = "chirp-v5")]
    pub model: ModelVersion,
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(long)]
    pub negative_tags: Option<String>,
    /// f or m
    #[arg(long)]
    pub vocal_gender: Option<VocalGender>,
    #[arg(long)]
    pub style_weight: Option<f64>,
    #[arg(long)]
    pub weirdness: Option<f64>,
    #[arg(long)]
    pub audio_weight: Option<f64>,
    #[command(flatten)]
    pub follow: FollowArgs,
}

#[derive(Debug, Args)]
pub struct PersonaMusicArgs {
    pub persona_id: String,
    #[arg(short, long)]
    pub prompt: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(short, long, default_value = "chirp-v5")]
    pub model: ModelVersion,
    #[command(flatten)]
    pub follow: FollowArgs,
}

#[derive(Debug, Args)]
pub struct AssetArgs {
    pub clip_id: String,
    #[arg(long)]
    pub download: bool,
    /// Output file (default: <clip_id>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Wait and download switches for job-submitting commands.
#[derive(Debug, Clone, Args)]
pub struct FollowArgs {
    /// Wait for the job to finish
    #[arg(long, overrides_with = "no_wait")]
    pub wait: bool,
    #[arg(long, overrides_with = "wait")]
    pub no_wait: bool,
    /// Download results once finished
    #[arg(long, overrides_with = "no_download")]
    pub download: bool,
    #[arg(long, overrides_with = "download")]
    pub no_download: bool,
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl FollowArgs {
    /// Effective (wait, download) given the command's default for waiting.
    pub fn resolve(&self, wait_by_default: bool) -> (bool, bool) {
        let wait = if self.wait {
            true
        } else if self.no_wait {
            false
        } else {
            wait_by_default
        };
        (wait, wait && !self.no_download)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    /// Download finished clips
    #[arg(long)]
    pub download: bool,
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Load `KEY=value` lines from a `.env` file into the process environment.
///
/// Without a path the file is looked up in the working directory and its
/// parents. Variables that are already set keep their value, and a missing
/// file is not an error.
pub fn load_env_file(path: Option<&Path>) -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Start logging as configured on the command line.
pub fn init_logging(global: &GlobalArgs) -> Result<Option<WorkerGuard>> {
    let mut builder = SubscriberConfig::builder()
        .log_level_str(&global.log_level)?
        .enable_console(global.verbose)
        .output_format(if global.log_json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        });
    builder = if global.no_log_file {
        builder.without_log_file()
    } else {
        builder.log_dir(global.log_dir.clone())
    };
    Ok(init_subscriber(builder.build())?)
}

/// Shared state for one command invocation.
pub struct App {
    global: GlobalArgs,
    cancel: CancelHandle,
}

impl App {
    pub fn new(global: GlobalArgs, cancel: CancelHandle) -> Self {
        Self { global, cancel }
    }

    fn http_config(&self, timeout_secs: u64) -> HttpConfig {
        HttpConfig::default().with_timeout(Duration::from_secs(timeout_secs))
    }

    pub fn suno(&self) -> Result<SunoClient> {
        let mut builder = SunoClient::builder()
            .base_url(self.global.suno_base_url.clone())
            .http_config(self.http_config(self.global.timeout));
        if let Some(key) = &self.global.suno_api_key {
            builder = builder.api_key(key.clone());
        }
        builder
            .build()
            .context("Cannot set up the music service client")
    }

    pub fn lyrics(&self) -> Result<LyricsGenerator> {
        let mut builder = OpenAiClient::builder()
            .base_url(self.global.openai_base_url.clone())
            .model(self.global.lyrics_model.clone())
            .http_config(self.http_config(self.global.timeout));
        if let Some(key) = &self.global.openai_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .context("Cannot set up the lyrics writer")?;
        Ok(LyricsGenerator::new(Arc::new(client)))
    }

    pub fn downloader(&self) -> Result<AssetDownloader> {
        Ok(AssetDownloader::from_config(
            &self.http_config(self.global.download_timeout),
        )?)
    }

    pub fn poll_options(&self, default_attempts: u32) -> PollOptions {
        PollOptions::new()
            .with_max_attempts(self.global.max_attempts.unwrap_or(default_attempts))
            .with_interval(Duration::from_secs(self.global.poll_interval))
    }

    pub fn poller(&self, options: PollOptions) -> TaskPoller {
        TaskPoller::new(options).with_cancel(self.cancel.clone())
    }

    /// Run `future` unless Ctrl-C arrives first.
    pub async fn guarded<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = tracksmartin::Result<T>>,
    {
        match self.cancel.run_until_cancelled(future).await {
            Some(outcome) => Ok(outcome?),
            None => Err(TracksError::Interrupted.into()),
        }
    }
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, cancel: CancelHandle) -> Result<()> {
    let app = App::new(cli.global, cancel);
    match cli.command {
        Command::Create(args) => commands::create(&app, args).await,
        Command::Lyrics(args) => commands::lyrics(&app, args).await,
        Command::Get { task_id, download } => commands::get(&app, &task_id, download).await,
        Command::Wait { task_id, download } => commands::wait(&app, &task_id, download).await,
        Command::Extend(args) => commands::extend(&app, args).await,
        Command::Concat { clip_ids, follow } => commands::concat(&app, clip_ids, follow).await,
        Command::Cover(args) => commands::cover(&app, args).await,
        Command::Stems {
            clip_id,
            full,
            follow,
        } => commands::stems(&app, clip_id, full, follow).await,
        Command::Remaster {
            clip_id,
            model,
            follow,
        } => commands::remaster(&app, clip_id, model, follow).await,
        Command::AddVocal(args) => commands::add_vocal(&app, args).await,
        Command::Persona {
            name,
            description,
            sample_clip_ids,
        } => commands::persona(&app, name, description, sample_clip_ids).await,
        Command::PersonaMusic(args) => commands::persona_music(&app, args).await,
        Command::Upload { url } => commands::upload(&app, url).await,
        Command::Wav(args) => commands::asset(&app, args, commands::AssetKind::Wav).await,
        Command::Midi(args) => commands::asset(&app, args, commands::AssetKind::Midi).await,
        Command::Credits => commands::credits(&app).await,
        Command::Genres { genre } => {
            commands::genres(genre.as_deref());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_follow_defaults() {
        let cli = Cli::try_parse_from(["tracksmartin", "stems", "clip-1", "--full"]).unwrap();
        match cli.command {
            Command::Stems { full, follow, .. } => {
                assert!(full);
                assert_eq!(follow.resolve(true), (true, true));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["tracksmartin", "concat", "a", "b", "--no-download"]).unwrap();
        match cli.command {
            Command::Concat { clip_ids, follow } => {
                assert_eq!(clip_ids, ["a", "b"]);
                assert_eq!(follow.resolve(false), (false, false));
                assert_eq!(follow.resolve(true), (true, false));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_extend_lyrics_default_to_empty() {
        let cli = Cli::try_parse_from(["tracksmartin", "extend", "clip-1", "--continue-at", "12.5"])
            .unwrap();
        match cli.command {
            Command::Extend(args) => {
                assert_eq!(args.clip_id, "clip-1");
                assert_eq!(args.lyrics, "");
                assert_eq!(args.continue_at, 12.5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_env_file_fills_missing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "TRACKSMARTIN_ENV_FILE_CHECK=from-file\n").unwrap();

        let loaded = load_env_file(Some(&path)).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(
            std::env::var("TRACKSMARTIN_ENV_FILE_CHECK").as_deref(),
            Ok("from-file")
        );

        let missing = dir.path().join("absent.env");
        assert_eq!(load_env_file(Some(&missing)).unwrap(), None);
    }

    #[tokio::test]
    async fn test_guarded_reports_interruption_without_task() {
        let cli = Cli::try_parse_from(["tracksmartin", "get", "task-1", "--no-log-file"]).unwrap();
        let cancel = CancelHandle::new();
        let app = App::new(cli.global, cancel.clone());

        let value = app.guarded(async { Ok::<_, TracksError>(7) }).await.unwrap();
        assert_eq!(value, 7);

        cancel.cancel();
        let err = app
            .guarded(std::future::pending::<tracksmartin::Result<()>>())
            .await
            .unwrap_err();
        let err = err.downcast_ref::<TracksError>().unwrap();
        assert!(matches!(err, TracksError::Interrupted));
        assert_eq!(err.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_create_argument_rules() {
        assert!(
            Cli::try_parse_from(["tracksmartin", "create", "--auto-lyrics", "--genre", "pop"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "tracksmartin",
                "create",
                "--description",
                "sunny pop",
                "--prompt",
                "words"
            ])
            .is_err()
        );
        let cli = Cli::try_parse_from([
            "tracksmartin",
            "create",
            "--auto-lyrics",
            "--theme",
            "rain",
            "--genre",
            "blues",
            "--length",
            "short",
            "--model",
            "chirp-v4",
        ])
        .unwrap();
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.length, SongLength::Short);
                assert_eq!(args.model, ModelVersion::ChirpV4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
