//! Prompt Builder
//!
//! Turns a theme and genre into a songwriting prompt, sends it to a text
//! generation backend and parses the reply into title, style tags and lyrics.

mod generator;
pub mod parse;
pub mod prompt;

pub use generator::{
    GENERATION_TEMPERATURE, GeneratedLyrics, LyricsGenerator, MAX_OUTPUT_TOKENS,
    REFINE_TEMPERATURE,
};
pub use parse::{ParsedReply, parse_reply};
pub use prompt::{LyricsRequest, PromptPair, SongLength, build_prompts, build_refine_prompts};
