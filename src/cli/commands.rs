//! Command handlers.

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;
use tracing::info;

use tracksmartin::assets::{clip_file_name, sanitize_name};
use tracksmartin::genres;
use tracksmartin::jobs::{
    AddVocalRequest, ConcatRequest, CoverRequest, CreateRequest, ExtendRequest, ModelVersion,
    PersonaMusicRequest, PersonaRequest, RemasterRequest, StemsRequest, TaskHandle, UploadRequest,
};
use tracksmartin::lyrics::{GeneratedLyrics, LyricsRequest};
use tracksmartin::polling::{PollOptions, PollProgress};
use tracksmartin::types::{ClipResult, PollEnvelope};

use super::output::{self, field, heading, notice, success};
use super::{
    AddVocalArgs, App, AssetArgs, CoverArgs, CreateArgs, DownloadArgs, ExtendArgs, FollowArgs,
    LyricsArgs, PersonaMusicArgs,
};

pub async fn create(app: &App, args: CreateArgs) -> Result<()> {
    let CreateArgs {
        title,
        prompt,
        prompt_file,
        description,
        genre,
        auto_lyrics,
        theme,
        mood,
        length,
        tags,
        negative_tags,
        style_weight,
        weirdness,
        model,
        instrumental,
        follow,
    } = args;

    let mut request = if let Some(description) = description {
        heading("Creating song from description");
        field("Description", &description);
        CreateRequest::from_description(description)
    } else {
        let (lyrics, title, tags) = if auto_lyrics {
            let theme = theme.context("--auto-lyrics needs --theme")?;
            let genre_name = genre.clone().context("--auto-lyrics needs --genre")?;
            let mut lyrics_request = LyricsRequest::new(theme, genre_name).with_length(length);
            if let Some(title) = &title {
                lyrics_request = lyrics_request.with_title(title.clone());
            }
            if let Some(mood) = mood {
                lyrics_request = lyrics_request.with_mood(mood);
            }
            let generated = write_lyrics(app, &lyrics_request).await?;
            heading("Generated lyrics");
            println!("{}", output::preview(&generated.lyrics));
            (
                generated.lyrics,
                title.unwrap_or(generated.title),
                tags.or(Some(generated.tags)),
            )
        } else {
            let lyrics = match (prompt, prompt_file) {
                (Some(prompt), _) => prompt,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Cannot read lyrics from {}", path.display()))?,
                (None, None) => bail!(
                    "Provide lyrics with --prompt or --prompt-file, or use --auto-lyrics or --description"
                ),
            };
            let title = title.context("--title is required when providing lyrics")?;
            (lyrics, title, tags)
        };

        let tags = tags.or_else(|| genre.as_deref().map(genres::default_tags));
        heading("Creating song");
        field("Title", &title);
        if let Some(tags) = &tags {
            field("Tags", tags);
        }
        let mut request = CreateRequest::custom(lyrics).with_title(title);
        if let Some(tags) = tags {
            request = request.with_tags(tags);
        }
        if let Some(negative) = negative_tags {
            request = request.with_negative_tags(negative);
        }
        if let Some(weight) = style_weight {
            request = request.with_style_weight(weight);
        }
        if let Some(weirdness) = weirdness {
            request = request.with_weirdness_constraint(weirdness);
        }
        request
    };
    request = request.instrumental(instrumental).with_model(model);
    field("Model", model);

    let suno = app.suno()?;
    let task = submit(app, "Submitting song", suno.create(request)).await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &follow, true).await
}

pub async fn lyrics(app: &App, args: LyricsArgs) -> Result<()> {
    let mut request = LyricsRequest::new(args.theme, args.genre.clone()).with_length(args.length);
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(mood) = args.mood {
        request = request.with_mood(mood);
    }
    if let Some(notes) = args.notes {
        request = request.with_extra_instructions(notes);
    }

    let mut generated = write_lyrics(app, &request).await?;
    if let Some(refinement) = args.refine {
        let writer = app.lyrics()?;
        let bar = output::spinner("Refining lyrics");
        let refined = app
            .guarded(writer.refine(&generated.lyrics, &refinement, &args.genre))
            .await;
        bar.finish_and_clear();
        generated.lyrics = refined?;
    }

    heading(&generated.title);
    field("Tags", &generated.tags);
    println!("\n{}", generated.lyrics);

    if args.save {
        tokio::fs::create_dir_all(&args.output_dir)
            .await
            .with_context(|| format!("Cannot create {}", args.output_dir.display()))?;
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = args
            .output_dir
            .join(format!("{}_{stamp}.txt", sanitize_name(&generated.title)));
        let contents = format!(
            "Title: {}\nGenre: {}\nTags: {}\n\n{}\n",
            generated.title, generated.genre, generated.tags, generated.lyrics
        );
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("Cannot write {}", path.display()))?;
        success(&format!("Saved to {}", path.display()));
    }
    Ok(())
}

pub async fn get(app: &App, task_id: &str, download: DownloadArgs) -> Result<()> {
    let suno = app.suno()?;
    let envelope = app.guarded(suno.get_task(task_id)).await?;
    match envelope {
        PollEnvelope::NotReady => notice("Task is not ready yet"),
        PollEnvelope::Pending { code } => match code {
            Some(code) => notice(&format!("No clips available yet (code {code})")),
            None => notice("No clips available yet"),
        },
        PollEnvelope::Clips(clips) => {
            heading(&format!("Task {task_id}"));
            output::print_clips(&clips);
            if download.download {
                let finished: Vec<ClipResult> = clips
                    .into_iter()
                    .filter(|clip| clip.state.is_success())
                    .collect();
                if finished.is_empty() {
                    notice("No finished clips to download");
                } else {
                    download_clips(app, &finished, &download.output_dir, "mp3").await?;
                }
            }
        }
    }
    Ok(())
}

pub async fn wait(app: &App, task_id: &str, download: DownloadArgs) -> Result<()> {
    let task = TaskHandle {
        task_id: task_id.to_string(),
    };
    let clips = poll(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS).await?;
    if download.download {
        download_clips(app, &clips, &download.output_dir, "mp3").await?;
    }
    Ok(())
}

pub async fn extend(app: &App, args: ExtendArgs) -> Result<()> {
    let mut request = ExtendRequest::new(args.clip_id, args.lyrics, args.continue_at);
    if let Some(tags) = args.tags {
        request = request.with_tags(tags);
    }
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(model) = args.model {
        request = request.with_model(model);
    }

    let suno = app.suno()?;
    let task = submit(app, "Submitting extension", suno.extend(request)).await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &args.follow, false).await
}

pub async fn concat(app: &App, clip_ids: Vec<String>, follow: FollowArgs) -> Result<()> {
    let suno = app.suno()?;
    let task = submit(
        app,
        "Submitting concatenation",
        suno.concat(ConcatRequest::new(clip_ids)),
    )
    .await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &follow, false).await
}

pub async fn cover(app: &App, args: CoverArgs) -> Result<()> {
    let mut request = CoverRequest::new(args.clip_id);
    if let Some(prompt) = args.prompt {
        request = request.with_prompt(prompt);
    }
    if let Some(tags) = args.tags {
        request = request.with_tags(tags);
    }
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(model) = args.model {
        request = request.with_model(model);
    }

    let suno = app.suno()?;
    let task = submit(app, "Submitting cover", suno.cover(request)).await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &args.follow, false).await
}

pub async fn stems(app: &App, clip_id: String, full: bool, follow: FollowArgs) -> Result<()> {
    let request = if full {
        StemsRequest::full(clip_id)
    } else {
        StemsRequest::basic(clip_id)
    };
    let suno = app.suno()?;
    let task = submit(app, "Submitting stem separation", suno.stems(request)).await?;
    follow_task(app, &task, PollOptions::STEMS_MAX_ATTEMPTS, &follow, true).await
}

pub async fn remaster(
    app: &App,
    clip_id: String,
    model: ModelVersion,
    follow: FollowArgs,
) -> Result<()> {
    let suno = app.suno()?;
    let request = RemasterRequest::new(clip_id).with_model(model);
    let task = submit(app, "Submitting remaster", suno.remaster(request)).await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &follow, false).await
}

pub async fn add_vocal(app: &App, args: AddVocalArgs) -> Result<()> {
    let mut request =
        AddVocalRequest::new(args.clip_id, args.prompt, args.start_time, args.end_time)
            .with_model(args.model);
    if let Some(tags) = args.tags {
        request = request.with_tags(tags);
    }
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(negative) = args.negative_tags {
        request = request.with_negative_tags(negative);
    }
    if let Some(gender) = args.vocal_gender {
        request = request.with_vocal_gender(gender);
    }
    if let Some(weight) = args.style_weight {
        request = request.with_style_weight(weight);
    }
    if let Some(weirdness) = args.weirdness {
        request = request.with_weirdness_constraint(weirdness);
    }
    if let Some(weight) = args.audio_weight {
        request = request.with_audio_weight(weight);
    }

    let suno = app.suno()?;
    let task = submit(app, "Submitting vocals", suno.add_vocal(request)).await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &args.follow, false).await
}

pub async fn persona(
    app: &App,
    name: String,
    description: String,
    sample_clip_ids: Vec<String>,
) -> Result<()> {
    let suno = app.suno()?;
    let request = PersonaRequest::new(name, description, sample_clip_ids);
    let bar = output::spinner("Creating persona");
    let outcome = app.guarded(suno.create_persona(request)).await;
    bar.finish_and_clear();
    let persona_id = outcome?;
    success(&format!("Persona created: {}", persona_id.bright_white()));
    println!(
        "Use it with: {}",
        format!("tracksmartin persona-music {persona_id} --prompt <lyrics>").dimmed()
    );
    Ok(())
}

pub async fn persona_music(app: &App, args: PersonaMusicArgs) -> Result<()> {
    let mut request = PersonaMusicRequest::new(args.persona_id, args.prompt).with_model(args.model);
    if let Some(title) = args.title {
        request = request.with_title(title);
    }
    if let Some(tags) = args.tags {
        request = request.with_tags(tags);
    }

    let suno = app.suno()?;
    let task = submit(app, "Submitting persona song", suno.persona_music(request)).await?;
    follow_task(app, &task, PollOptions::DEFAULT_MAX_ATTEMPTS, &args.follow, false).await
}

pub async fn upload(app: &App, url: String) -> Result<()> {
    let suno = app.suno()?;
    let bar = output::spinner("Uploading audio");
    let outcome = app.guarded(suno.upload(UploadRequest::new(url))).await;
    bar.finish_and_clear();
    let clip_id = outcome?;
    success(&format!("Uploaded as clip {}", clip_id.bright_white()));
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum AssetKind {
    Wav,
    Midi,
}

impl AssetKind {
    fn label(self) -> &'static str {
        match self {
            AssetKind::Wav => "WAV",
            AssetKind::Midi => "MIDI",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            AssetKind::Wav => "wav",
            AssetKind::Midi => "mid",
        }
    }
}

pub async fn asset(app: &App, args: AssetArgs, kind: AssetKind) -> Result<()> {
    let suno = app.suno()?;
    let bar = output::spinner(format!("Requesting {} for {}", kind.label(), args.clip_id));
    let outcome = match kind {
        AssetKind::Wav => app.guarded(suno.get_wav(&args.clip_id)).await,
        AssetKind::Midi => app.guarded(suno.get_midi(&args.clip_id)).await,
    };
    bar.finish_and_clear();
    let url = outcome?;
    success(&format!("{} ready", kind.label()));
    field("URL", url.bright_blue());

    if args.download {
        let path = args
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", args.clip_id, kind.extension())));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
        let downloader = app.downloader()?;
        let bar = output::spinner(format!("Downloading {}", path.display()));
        let outcome = app.guarded(downloader.fetch(&url, &path)).await;
        bar.finish_and_clear();
        let bytes = outcome?;
        success(&format!("Saved {} ({bytes} bytes)", path.display()));
    }
    Ok(())
}

pub async fn credits(app: &App) -> Result<()> {
    let suno = app.suno()?;
    let credits = app.guarded(suno.get_credits()).await?;
    heading("Credits");
    println!("{}", serde_json::to_string_pretty(&credits)?);
    Ok(())
}

pub fn genres(genre: Option<&str>) {
    match genre {
        Some(name) => match genres::describe(name) {
            Some(description) => {
                let mut lines = description.lines();
                if let Some(title) = lines.next() {
                    heading(title);
                }
                for line in lines {
                    println!("{line}");
                }
                field("Tags", genres::default_tags(name));
            }
            None => {
                notice(&format!("Genre '{name}' not found in templates"));
                println!("Lyrics can still be written for it with a generic template.");
            }
        },
        None => {
            heading("Supported genres");
            for (index, name) in genres::supported_genres().into_iter().enumerate() {
                println!("  {:>2}. {}", index + 1, name);
            }
            println!(
                "\n{}",
                "Use 'tracksmartin genres --genre <name>' for details".dimmed()
            );
        }
    }
}

async fn write_lyrics(app: &App, request: &LyricsRequest) -> Result<GeneratedLyrics> {
    let writer = app.lyrics()?;
    let bar = output::spinner("Writing lyrics");
    let outcome = app.guarded(writer.generate(request)).await;
    bar.finish_and_clear();
    let generated = outcome?;
    success(&format!("Lyrics written: {}", generated.title.bright_white()));
    Ok(generated)
}

async fn submit<F>(app: &App, message: &str, future: F) -> Result<TaskHandle>
where
    F: Future<Output = tracksmartin::Result<TaskHandle>>,
{
    let bar = output::spinner(message.to_string());
    let outcome = app.guarded(future).await;
    bar.finish_and_clear();
    let task = outcome?;
    success(&format!("Task submitted: {}", task.task_id.bright_white()));
    Ok(task)
}

async fn poll(app: &App, task: &TaskHandle, default_attempts: u32) -> Result<Vec<ClipResult>> {
    let options = app.poll_options(default_attempts);
    let bar = output::spinner(format!(
        "Waiting for {} (up to {}s)",
        task.task_id,
        options.budget().as_secs()
    ));
    let observed = bar.clone();
    let poller = app
        .poller(options)
        .with_observer(move |progress: &PollProgress| {
            observed.set_message(output::progress_message(progress));
        });

    let suno = app.suno()?;
    let outcome = poller.poll(&suno, &task.task_id).await;
    bar.finish_and_clear();
    let clips = outcome?;
    success(&format!("Task {} finished", task.task_id));
    output::print_clips(&clips);
    Ok(clips)
}

async fn follow_task(
    app: &App,
    task: &TaskHandle,
    default_attempts: u32,
    follow: &FollowArgs,
    wait_by_default: bool,
) -> Result<()> {
    let (wait, download) = follow.resolve(wait_by_default);
    if !wait {
        println!(
            "Check progress with: {}",
            format!("tracksmartin wait {}", task.task_id).dimmed()
        );
        return Ok(());
    }

    let clips = poll(app, task, default_attempts).await?;
    if download {
        download_clips(app, &clips, &follow.output_dir, "mp3").await?;
    }
    Ok(())
}

async fn download_clips(
    app: &App,
    clips: &[ClipResult],
    directory: &Path,
    extension: &str,
) -> Result<()> {
    tokio::fs::create_dir_all(directory)
        .await
        .with_context(|| format!("Cannot create {}", directory.display()))?;
    let downloader = app.downloader()?;

    let total = clips.len();
    for (index, clip) in clips.iter().enumerate() {
        let Some(url) = clip.audio_url.as_deref() else {
            notice(&format!("{} has no audio URL, skipping", clip.display_name()));
            continue;
        };
        let name = clip_file_name(clip, index, total, extension);
        let bar = output::spinner(format!("Downloading {name}"));
        let outcome = app
            .guarded(downloader.fetch_into(url, directory, &name))
            .await;
        bar.finish_and_clear();
        let path = outcome?;
        info!(clip_id = %clip.clip_id, path = %path.display(), "Saved clip");
        success(&format!("Saved {}", path.display()));
    }
    Ok(())
}
