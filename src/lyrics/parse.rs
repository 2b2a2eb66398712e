//! Reply parsing for generated lyrics.

/// Fields pulled out of a generation reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedReply {
    pub title: Option<String>,
    pub tags: Option<String>,
    pub lyrics: String,
}

/// Split a reply into its `TITLE:` line, `TAGS:` line and lyrics.
///
/// Every other line is kept verbatim and the joined lyrics are trimmed. Empty
/// title or tag values count as absent.
pub fn parse_reply(reply: &str) -> ParsedReply {
    let mut parsed = ParsedReply::default();
    let mut lyrics = Vec::new();

    for line in reply.trim().lines() {
        if let Some(title) = line.strip_prefix("TITLE:") {
            parsed.title = non_empty(title);
        } else if let Some(tags) = line.strip_prefix("TAGS:") {
            parsed.tags = non_empty(tags);
        } else {
            lyrics.push(line);
        }
    }

    parsed.lyrics = lyrics.join("\n").trim().to_string();
    parsed
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Capitalize the first letter of every alphabetic run, lowercasing the rest
/// (`"hip-hop"` becomes `"Hip-Hop"`).
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let reply = "TITLE: Neon Rain\nTAGS: synthwave, 100 bpm, dreamy\n\n[Verse 1]\nCity lights\n\n[Chorus]\nNeon rain\n";
        let parsed = parse_reply(reply);
        assert_eq!(parsed.title.as_deref(), Some("Neon Rain"));
        assert_eq!(parsed.tags.as_deref(), Some("synthwave, 100 bpm, dreamy"));
        assert_eq!(parsed.lyrics, "[Verse 1]\nCity lights\n\n[Chorus]\nNeon rain");
    }

    #[test]
    fn test_parse_without_markers() {
        let parsed = parse_reply("  [Verse]\nJust words  ");
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.tags, None);
        assert_eq!(parsed.lyrics, "[Verse]\nJust words");
    }

    #[test]
    fn test_empty_marker_values_are_absent() {
        let parsed = parse_reply("TITLE:   \nTAGS:\nla la");
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.tags, None);
        assert_eq!(parsed.lyrics, "la la");
    }

    #[test]
    fn test_markers_must_start_the_line() {
        let parsed = parse_reply("[Verse]\n  TITLE: indented\nwords");
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.lyrics, "[Verse]\n  TITLE: indented\nwords");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hip-hop"), "Hip-Hop");
        assert_eq!(title_case("r&b"), "R&B");
        assert_eq!(title_case("sea SHANTY"), "Sea Shanty");
    }
}
