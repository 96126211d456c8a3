//! Data models passed between the pipeline and its callers.
//!
//! This module defines the values the scraper hands back:
//! - [`LinkMap`]: ordered name → absolute URL mapping, aliased as
//!   [`CategoryMap`] and [`ArticleMap`]
//! - [`ArticleDetails`]: body text and audio URL of one article, each optional
//!
//! All URLs stored here are absolute; relative links are resolved before they
//! are inserted.

use serde::Serialize;

/// An ordered mapping from display name to absolute URL.
///
/// Insertion order is preserved so listings render in the order the site
/// shows them. Keys are unique and the first occurrence wins: inserting a
/// name that is already present leaves the existing entry untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkMap {
    entries: Vec<LinkEntry>,
}

/// One name/URL pair inside a [`LinkMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub name: String,
    pub url: String,
}

/// Category display name → category listing URL.
pub type CategoryMap = LinkMap;

/// Article title → article page URL, for one (category, page) query.
pub type ArticleMap = LinkMap;

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `name` is already present. Returns whether it was inserted.
    pub fn insert_first(&mut self, name: impl Into<String>, url: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push(LinkEntry {
            name,
            url: url.into(),
        });
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.url.as_str())
    }

    /// Case-insensitive lookup, used when matching user-typed names.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.get(name).or_else(|| {
            let wanted = name.to_lowercase();
            self.entries
                .iter()
                .find(|e| e.name.to_lowercase() == wanted)
                .map(|e| e.url.as_str())
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, url)` pairs in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.url.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl<'a> IntoIterator for &'a LinkMap {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Text and audio reference extracted from one article page.
///
/// Either field may be `None` when the page was fetched but the expected
/// markup was missing. That is a partial extraction, not an error: callers
/// use [`ArticleDetails::is_complete`] to decide whether the article can be
/// downloaded in full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleDetails {
    /// Plain-text body, entity-decoded and trimmed.
    pub content: Option<String>,
    /// Absolute URL of the article's MP3.
    pub audio_url: Option<String>,
}

impl ArticleDetails {
    /// Both a non-empty body and a non-empty audio URL are present.
    pub fn is_complete(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.content) && present(&self.audio_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_first_keeps_first_occurrence() {
        let mut map = LinkMap::new();
        assert!(map.insert_first("News", "https://x/news.html"));
        assert!(!map.insert_first("News", "https://x/other.html"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("News"), Some("https://x/news.html"));
    }

    #[test]
    fn test_iteration_preserves_encounter_order() {
        let mut map = LinkMap::new();
        map.insert_first("Zeta", "https://x/z.html");
        map.insert_first("Alpha", "https://x/a.html");
        map.insert_first("Mid", "https://x/m.html");
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);

        let mut urls = Vec::new();
        for entry in &map {
            urls.push(entry.url.as_str());
        }
        assert_eq!(urls, vec!["https://x/z.html", "https://x/a.html", "https://x/m.html"]);
    }

    #[test]
    fn test_get_ignore_case_prefers_exact() {
        let mut map = LinkMap::new();
        map.insert_first("science", "https://x/lower.html");
        map.insert_first("Science", "https://x/upper.html");
        assert_eq!(map.get_ignore_case("Science"), Some("https://x/upper.html"));
        assert_eq!(map.get_ignore_case("SCIENCE"), Some("https://x/lower.html"));
        assert_eq!(map.get_ignore_case("Health"), None);
    }

    #[test]
    fn test_link_map_serializes_as_list() {
        let mut map = LinkMap::new();
        map.insert_first("A", "https://x/a.html");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"[{"name":"A","url":"https://x/a.html"}]"#);
    }

    #[test]
    fn test_article_details_completeness() {
        let full = ArticleDetails {
            content: Some("Body".to_string()),
            audio_url: Some("https://x/a.mp3".to_string()),
        };
        assert!(full.is_complete());

        let empty_text = ArticleDetails {
            content: Some(String::new()),
            ..full.clone()
        };
        assert!(!empty_text.is_complete());

        let no_audio = ArticleDetails {
            audio_url: None,
            ..full
        };
        assert!(!no_audio.is_complete());
        assert!(!ArticleDetails::default().is_complete());
    }
}
