//! Locating the audio stream URL inside inline script text.
//!
//! Article pages do not reference their MP3 in markup; the player is
//! configured from an inline script containing a literal such as
//! `mp3: "https://files.21voa.com/audio/x.mp3"`. Finding it is a textual
//! heuristic that breaks if the site restructures its player payload, so it
//! sits behind [`AudioUrlStrategy`] and can be swapped without touching the
//! scraper.

use once_cell::sync::Lazy;
use regex::Regex;

/// Finds an audio URL in the text of a single script block.
pub trait AudioUrlStrategy: Send + Sync + std::fmt::Debug {
    /// Return the first audio URL found in `script`, if any.
    fn find_in_script(&self, script: &str) -> Option<String>;
}

static MP3_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"mp3\s*:\s*"(https?://[^"]+\.mp3)""#).expect("static mp3 regex is valid")
});

/// Matches `mp3 : "<http(s) URL ending in .mp3>"` key/value literals.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mp3LiteralStrategy;

impl AudioUrlStrategy for Mp3LiteralStrategy {
    fn find_in_script(&self, script: &str) -> Option<String> {
        MP3_LITERAL_RE
            .captures(script)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
