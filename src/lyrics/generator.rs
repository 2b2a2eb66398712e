use std::sync::Arc;

use tracing::info;

use super::parse::{parse_reply, title_case};
use super::prompt::{LyricsRequest, build_prompts, build_refine_prompts};
use crate::error::{Result, TracksError};
use crate::genres;
use crate::traits::CompletionCapability;
use crate::types::CompletionRequest;

/// Sampling temperature for new lyrics.
pub const GENERATION_TEMPERATURE: f32 = 0.8;
/// Sampling temperature for refinements.
pub const REFINE_TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 1500;

/// Lyrics with the metadata needed to submit a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLyrics {
    pub title: String,
    pub tags: String,
    pub lyrics: String,
    pub genre: String,
}

/// Genre-aware lyric writer on top of any [`CompletionCapability`].
#[derive(Clone)]
pub struct LyricsGenerator {
    completion: Arc<dyn CompletionCapability>,
    model: Option<String>,
}

impl std::fmt::Debug for LyricsGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LyricsGenerator")
            .field("model", &self.model)
            .finish()
    }
}

impl LyricsGenerator {
    pub fn new(completion: Arc<dyn CompletionCapability>) -> Self {
        Self {
            completion,
            model: None,
        }
    }

    /// Override the completion client's default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn completion_request(&self, system: String, user: String, temperature: f32) -> CompletionRequest {
        let request = CompletionRequest::new(system, user)
            .with_temperature(temperature)
            .with_max_tokens(MAX_OUTPUT_TOKENS);
        match &self.model {
            Some(model) => request.with_model(model.clone()),
            None => request,
        }
    }

    /// Write lyrics for `request`. Any failure is a `GenerationError`.
    pub async fn generate(&self, request: &LyricsRequest) -> Result<GeneratedLyrics> {
        let genre = request.genre.trim();
        if request.theme.trim().is_empty() {
            return Err(TracksError::generation(TracksError::validation(
                "theme must not be blank",
            )));
        }
        if genre.is_empty() {
            return Err(TracksError::generation(TracksError::validation(
                "genre must not be blank",
            )));
        }

        let template = genres::lookup(genre);
        let prompts = build_prompts(request, &template);
        info!(genre, length = %request.length, "Generating lyrics");

        let reply = self
            .completion
            .complete(self.completion_request(
                prompts.system,
                prompts.user,
                GENERATION_TEMPERATURE,
            ))
            .await
            .map_err(TracksError::generation)?;

        let parsed = parse_reply(&reply);
        if parsed.lyrics.is_empty() {
            return Err(TracksError::generation(TracksError::protocol(
                "reply contained no lyrics",
            )));
        }

        let title = parsed
            .title
            .or_else(|| {
                request
                    .title
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("Untitled {} Song", title_case(genre)));
        let tags = parsed.tags.unwrap_or_else(|| format!("{genre}, original"));

        info!(title = %title, "Lyrics generated");
        Ok(GeneratedLyrics {
            title,
            tags,
            lyrics: parsed.lyrics,
            genre: genre.to_string(),
        })
    }

    /// Rework `original_lyrics` according to `refinement_request`.
    pub async fn refine(
        &self,
        original_lyrics: &str,
        refinement_request: &str,
        genre: &str,
    ) -> Result<String> {
        if original_lyrics.trim().is_empty() {
            return Err(TracksError::generation(TracksError::validation(
                "lyrics to refine must not be blank",
            )));
        }
        let template = genres::lookup(genre);
        let prompts = build_refine_prompts(original_lyrics, refinement_request, genre, &template);
        info!(genre = genre.trim(), "Refining lyrics");

        let reply = self
            .completion
            .complete(self.completion_request(prompts.system, prompts.user, REFINE_TEMPERATURE))
            .await
            .map_err(TracksError::generation)?;

        let refined = reply.trim();
        if refined.is_empty() {
            return Err(TracksError::generation(TracksError::protocol(
                "refinement reply was empty",
            )));
        }
        Ok(refined.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Scripted {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl Scripted {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionCapability for Scripted {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request);
            self.reply
                .clone()
                .map_err(|message| TracksError::api_error(500, message))
        }
    }

    #[tokio::test]
    async fn test_generate_uses_parsed_fields() {
        let backend = Scripted::ok("TITLE: Dust Road\nTAGS: country, slow\n[Verse 1]\nOld truck");
        let generator = LyricsGenerator::new(backend.clone()).with_model("gpt-test");

        let result = generator
            .generate(&LyricsRequest::new("leaving town", "country"))
            .await
            .unwrap();
        assert_eq!(result.title, "Dust Road");
        assert_eq!(result.tags, "country, slow");
        assert_eq!(result.lyrics, "[Verse 1]\nOld truck");

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].temperature, GENERATION_TEMPERATURE);
        assert_eq!(seen[0].max_tokens, MAX_OUTPUT_TOKENS);
        assert_eq!(seen[0].model.as_deref(), Some("gpt-test"));
        assert!(seen[0].system.contains("country"));
    }

    #[tokio::test]
    async fn test_generate_fallbacks() {
        let generator = LyricsGenerator::new(Scripted::ok("[Verse]\nwords"));

        let result = generator
            .generate(&LyricsRequest::new("anything", "hip-hop"))
            .await
            .unwrap();
        assert_eq!(result.title, "Untitled Hip-Hop Song");
        assert_eq!(result.tags, "hip-hop, original");

        let titled = generator
            .generate(&LyricsRequest::new("anything", "pop").with_title("Mine"))
            .await
            .unwrap();
        assert_eq!(titled.title, "Mine");
    }

    #[tokio::test]
    async fn test_failures_are_generation_errors() {
        let generator = LyricsGenerator::new(Scripted::failing("upstream down"));
        let err = generator
            .generate(&LyricsRequest::new("x", "pop"))
            .await
            .unwrap_err();
        match err {
            TracksError::GenerationError { source } => {
                assert_eq!(source.status_code(), Some(500));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let empty = LyricsGenerator::new(Scripted::ok("TITLE: Only A Title"));
        assert!(matches!(
            empty.generate(&LyricsRequest::new("x", "pop")).await,
            Err(TracksError::GenerationError { .. })
        ));
    }

    #[tokio::test]
    async fn test_refine() {
        let backend = Scripted::ok("  [Verse]\nbetter words  ");
        let generator = LyricsGenerator::new(backend.clone());
        let refined = generator
            .refine("[Verse]\nwords", "make it better", "folk")
            .await
            .unwrap();
        assert_eq!(refined, "[Verse]\nbetter words");
        assert_eq!(
            backend.seen.lock().unwrap()[0].temperature,
            REFINE_TEMPERATURE
        );
    }
}
