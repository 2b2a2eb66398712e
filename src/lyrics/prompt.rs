//! Prompt assembly for lyric generation and refinement.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::TracksError;
use crate::genres::GenreTemplate;

/// Target song length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SongLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SongLength {
    pub fn guide(self) -> &'static str {
        match self {
            SongLength::Short => "2 verses, 1 chorus (repeated), around 1.5-2 minutes",
            SongLength::Medium => "2-3 verses, chorus, and optional bridge, around 3 minutes",
            SongLength::Long => "3-4 verses, chorus, bridge, and outro, around 4+ minutes",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SongLength::Short => "short",
            SongLength::Medium => "medium",
            SongLength::Long => "long",
        }
    }
}

impl FromStr for SongLength {
    type Err = TracksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SongLength::Short),
            "medium" => Ok(SongLength::Medium),
            "long" => Ok(SongLength::Long),
            other => Err(TracksError::validation(format!(
                "length must be one of short, medium, long (got '{other}')"
            ))),
        }
    }
}

impl std::fmt::Display for SongLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for one lyric generation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LyricsRequest {
    pub theme: String,
    pub genre: String,
    pub title: Option<String>,
    pub mood: Option<String>,
    pub length: SongLength,
    pub extra_instructions: Option<String>,
}

impl LyricsRequest {
    pub fn new(theme: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            genre: genre.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    pub fn with_length(mut self, length: SongLength) -> Self {
        self.length = length;
        self
    }

    pub fn with_extra_instructions(mut self, notes: impl Into<String>) -> Self {
        self.extra_instructions = Some(notes.into());
        self
    }
}

/// System and user instructions for one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build the songwriting prompt pair. Pure string assembly.
pub fn build_prompts(request: &LyricsRequest, template: &GenreTemplate) -> PromptPair {
    let genre = request.genre.trim();

    let mut system = String::new();
    let _ = writeln!(
        system,
        "You are an expert songwriter and lyricist specializing in {genre} music."
    );
    let _ = writeln!(
        system,
        "You know the authentic conventions, structures, and emotional language of {genre}."
    );
    system.push_str("\nGENRE CHARACTERISTICS:\n");
    for characteristic in template.characteristics.iter() {
        let _ = writeln!(system, "- {characteristic}");
    }
    let _ = write!(
        system,
        "\nTYPICAL STRUCTURE:\n{}\n\nSTYLE NOTES:\n{}\n\n",
        template.structure, template.style_notes
    );
    let _ = write!(
        system,
        "Write authentic, professional-quality {genre} lyrics that sit naturally in the genre.\n\
         Mark song sections with bracketed labels: [Verse 1], [Chorus], [Bridge], [Verse 2], etc.\n\
         Keep the lyrics genuine and true to the spirit of {genre}."
    );

    let mut user = String::new();
    let _ = write!(
        user,
        "Write {genre} song lyrics about: {}\n\nRequirements:\n- Length: {}\n- Genre: {genre}",
        request.theme.trim(),
        request.length.guide()
    );
    match non_blank(&request.title) {
        Some(title) => {
            let _ = write!(user, "\n- Use this title: '{title}'");
        }
        None => user.push_str("\n- Create an appropriate title"),
    }
    if let Some(mood) = non_blank(&request.mood) {
        let _ = write!(user, "\n- Mood/Tone: {mood}");
    }
    if let Some(notes) = non_blank(&request.extra_instructions) {
        let _ = write!(user, "\n- Additional notes: {notes}");
    }
    let _ = write!(
        user,
        "\n\nFormat your response as:\n\
         TITLE: [song title]\n\
         TAGS: [3-5 style tags for the music generator, specific about tempo, mood, instrumentation]\n\
         \n\
         [Intro]\n\
         (if applicable)\n\
         \n\
         [Verse 1]\n\
         (lyrics)\n\
         \n\
         [Chorus]\n\
         (lyrics)\n\
         \n\
         ... etc.\n\
         \n\
         Make it authentic {genre}, not generic. The lyrics should clearly belong to this genre."
    );

    PromptPair { system, user }
}

/// Build the prompt pair for reworking existing lyrics.
pub fn build_refine_prompts(
    original_lyrics: &str,
    refinement_request: &str,
    genre: &str,
    template: &GenreTemplate,
) -> PromptPair {
    let genre = genre.trim();
    let system = format!(
        "You are an expert {genre} songwriter.\n\
         Refine lyrics while keeping authentic {genre} style and conventions.\n\n{}",
        template.style_notes
    );
    let user = format!(
        "Original lyrics:\n{}\n\nRefinement request: {}\n\n\
         Provide the refined lyrics with the same structure notation ([Verse], [Chorus], etc.).",
        original_lyrics.trim(),
        refinement_request.trim()
    );
    PromptPair { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genres;

    #[test]
    fn test_song_length_parsing() {
        assert_eq!("SHORT".parse::<SongLength>().unwrap(), SongLength::Short);
        assert_eq!(" long ".parse::<SongLength>().unwrap(), SongLength::Long);
        assert!(matches!(
            "epic".parse::<SongLength>(),
            Err(TracksError::ValidationError(_))
        ));
        assert_eq!(SongLength::default(), SongLength::Medium);
    }

    #[test]
    fn test_build_prompts_embeds_template_and_options() {
        let template = genres::lookup("blues");
        let request = LyricsRequest::new("a long drive home", "blues")
            .with_mood("weary")
            .with_length(SongLength::Short)
            .with_extra_instructions("mention the river");

        let prompts = build_prompts(&request, &template);

        assert!(prompts.system.contains("specializing in blues music"));
        for characteristic in template.characteristics.iter() {
            assert!(prompts.system.contains(&format!("- {characteristic}")));
        }
        assert!(prompts.system.contains(template.structure.as_ref()));
        assert!(prompts.system.contains(template.style_notes.as_ref()));

        assert!(prompts.user.starts_with("Write blues song lyrics about: a long drive home"));
        assert!(prompts.user.contains(SongLength::Short.guide()));
        assert!(prompts.user.contains("- Create an appropriate title"));
        assert!(prompts.user.contains("- Mood/Tone: weary"));
        assert!(prompts.user.contains("- Additional notes: mention the river"));
        assert!(prompts.user.contains("TITLE: [song title]"));
    }

    #[test]
    fn test_build_prompts_is_deterministic_and_uses_title() {
        let template = genres::lookup("pop");
        let request = LyricsRequest::new("summer", "pop").with_title("Golden Hour");

        let first = build_prompts(&request, &template);
        let second = build_prompts(&request, &template);
        assert_eq!(first, second);
        assert!(first.user.contains("- Use this title: 'Golden Hour'"));
        assert!(!first.user.contains("Mood/Tone"));
    }

    #[test]
    fn test_build_refine_prompts() {
        let template = genres::lookup("folk");
        let prompts =
            build_refine_prompts("[Verse]\nold words", "add a bridge", "folk", &template);
        assert!(prompts.system.contains("expert folk songwriter"));
        assert!(prompts.system.ends_with(template.style_notes.as_ref()));
        assert!(prompts.user.contains("old words"));
        assert!(prompts.user.contains("Refinement request: add a bridge"));
    }
}
