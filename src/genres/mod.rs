//! Genre Catalog
//!
//! Read-only lookup of song structure, lyrical characteristics and style notes
//! per genre. Lookups never fail: unknown genres get a generic template that
//! still names the requested genre.

mod templates;

use std::borrow::Cow;

use serde::Serialize;

use templates::{ALIASES, FALLBACK_CHARACTERISTICS, FALLBACK_STRUCTURE, GENRES, GenreEntry};

/// Prompting metadata for one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreTemplate {
    pub structure: Cow<'static, str>,
    pub characteristics: Cow<'static, [&'static str]>,
    pub style_notes: Cow<'static, str>,
}

impl GenreTemplate {
    fn from_entry(entry: &'static GenreEntry) -> Self {
        Self {
            structure: Cow::Borrowed(entry.structure),
            characteristics: Cow::Borrowed(entry.characteristics),
            style_notes: Cow::Borrowed(entry.style_notes),
        }
    }

    fn fallback(genre: &str) -> Self {
        Self {
            structure: Cow::Borrowed(FALLBACK_STRUCTURE),
            characteristics: Cow::Borrowed(FALLBACK_CHARACTERISTICS),
            style_notes: Cow::Owned(format!(
                "Write authentic {genre} lyrics following the genre's conventions and characteristics."
            )),
        }
    }
}

/// Lowercase, trim and resolve aliases to a canonical genre key.
pub fn normalize(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(lowered)
}

fn entry(name: &str) -> Option<&'static GenreEntry> {
    let key = normalize(name);
    GENRES.iter().find(|g| g.name == key)
}

/// Template for `name`, or the generic fallback when the genre is unknown.
pub fn lookup(name: &str) -> GenreTemplate {
    match entry(name) {
        Some(found) => GenreTemplate::from_entry(found),
        None => GenreTemplate::fallback(name),
    }
}

/// Whether `name` (after alias resolution) has a dedicated template.
pub fn is_supported(name: &str) -> bool {
    entry(name).is_some()
}

/// Canonical genre names, sorted.
pub fn supported_genres() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = GENRES.iter().map(|g| g.name).collect();
    names.sort_unstable();
    names
}

/// Human-readable description for a catalog genre.
pub fn describe(name: &str) -> Option<String> {
    entry(name).map(|g| {
        format!(
            "{}\n{}\n\nStructure: {}",
            name.trim().to_uppercase(),
            g.style_notes,
            g.structure
        )
    })
}

/// Style tags used when a genre is given without explicit tags.
pub fn default_tags(name: &str) -> String {
    entry(name)
        .map(|g| g.default_tags.to_string())
        .unwrap_or_else(|| name.trim().to_string())
}
