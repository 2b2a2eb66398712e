//! Terminal rendering helpers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use tracksmartin::polling::{PollObservation, PollProgress};
use tracksmartin::types::{ClipResult, ClipState};

const PREVIEW_CHARS: usize = 500;

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
    );
    bar.set_message(message.into());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Spinner message for one poll attempt.
pub fn progress_message(progress: &PollProgress) -> String {
    let status = match &progress.observation {
        PollObservation::NotReady => "task not visible yet".to_string(),
        PollObservation::Pending { .. } => "waiting for clips".to_string(),
        other => other.to_string(),
    };
    format!(
        "Attempt {}/{}: {}",
        progress.attempt, progress.max_attempts, status
    )
}

pub fn heading(text: &str) {
    println!("\n{}", text.bright_cyan().bold());
}

pub fn success(text: &str) {
    println!("{} {}", "✓".bright_green(), text);
}

pub fn notice(text: &str) {
    println!("{} {}", "!".bright_yellow(), text.yellow());
}

pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<12} {}", format!("{label}:").dimmed(), value);
}

/// First characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

fn colored_state(state: &ClipState) -> String {
    let label = state.as_str();
    if state.is_success() {
        label.bright_green().to_string()
    } else if state.is_failure() {
        label.bright_red().to_string()
    } else {
        label.yellow().to_string()
    }
}

pub fn print_clips(clips: &[ClipResult]) {
    for (index, clip) in clips.iter().enumerate() {
        println!(
            "\n{} {}",
            format!("Clip {}:", index + 1).bold(),
            clip.display_name().bright_white()
        );
        field("ID", &clip.clip_id);
        field("State", colored_state(&clip.state));
        if let Some(duration) = clip.duration {
            field("Duration", format!("{duration:.1}s"));
        }
        if let Some(tags) = clip.tags.as_deref().filter(|t| !t.is_empty()) {
            field("Tags", tags);
        }
        if let Some(url) = &clip.audio_url {
            field("Audio", url.bright_blue());
        }
        if let Some(url) = &clip.video_url {
            field("Video", url.bright_blue());
        }
        if let Some(url) = &clip.image_url {
            field("Image", url.bright_blue());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        let text = "é".repeat(PREVIEW_CHARS + 5);
        let cut = preview(&text);
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_progress_message() {
        let progress = PollProgress {
            task_id: "t".into(),
            attempt: 3,
            max_attempts: 20,
            observation: PollObservation::InProgress {
                state: ClipState::Streaming,
                clips: 2,
            },
        };
        assert_eq!(progress_message(&progress), "Attempt 3/20: streaming");
    }
}
