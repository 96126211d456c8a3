//! 21voa.com scraper.
//!
//! The site is browsed in three steps, each one HTTP request:
//!
//! 1. **Categories**: the homepage's left navigation (`div#lefter`) lists
//!    every section as `<ul><li><a href="/special_english/....html">`.
//! 2. **Listing**: each category page has a `div.list` of article links.
//!    Page 1 is the category URL itself; page N lives at `<stem>_N.html`.
//! 3. **Article**: the body sits in `div.content`; the MP3 is referenced from
//!    an inline player script rather than from markup.
//!
//! Link filtering keeps only anchors with visible text and an `href` that
//! contains `.html`; the navigation also carries javascript/UI anchors that
//! are not content links. Duplicates keep the first occurrence.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::audio::{AudioUrlStrategy, Mp3LiteralStrategy};
use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::http::PageFetcher;
use crate::models::{ArticleDetails, ArticleMap, CategoryMap, LinkMap};
use crate::utils::truncate_for_log;

static CATEGORY_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#lefter > ul > li > a").expect("static selector is valid")
});
static ARTICLE_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div[class='list'] > ul > li > a").expect("static selector is valid")
});
static CONTENT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class='content']").expect("static selector is valid"));
static SCRIPT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("static selector is valid"));

/// Category discovery, article listing and article extraction for one origin.
///
/// Holds no per-call state, so one instance can serve concurrent calls.
#[derive(Debug)]
pub struct VoaScraper {
    fetcher: PageFetcher,
    base: Url,
    audio: Box<dyn AudioUrlStrategy>,
}

impl VoaScraper {
    /// Create a scraper for the configured origin using the default
    /// `mp3: "..."` audio heuristic.
    ///
    /// # Errors
    ///
    /// [`ScraperError::InvalidUrl`] if `config.base_url` does not parse.
    pub fn new(fetcher: PageFetcher, config: &ScraperConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|_| ScraperError::invalid_url(config.base_url.clone()))?;
        Ok(Self {
            fetcher,
            base,
            audio: Box::new(Mp3LiteralStrategy),
        })
    }

    /// Replace the audio URL heuristic.
    pub fn with_audio_strategy(mut self, strategy: impl AudioUrlStrategy + 'static) -> Self {
        self.audio = Box::new(strategy);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetch the homepage and return category name → listing URL.
    ///
    /// # Returns
    ///
    /// Categories in page order, first occurrence winning on duplicate
    /// names. An absent navigation block yields an empty map, not an error.
    ///
    /// # Errors
    ///
    /// [`ScraperError::Network`] or [`ScraperError::HttpStatus`] when the
    /// homepage cannot be fetched.
    #[instrument(level = "info", skip_all, fields(base = %self.base))]
    pub async fn discover_categories(&self) -> Result<CategoryMap> {
        let document = self.fetcher.fetch_html(self.base.as_str()).await?;
        let categories = parse_categories(&document, &self.base);

        info!(count = categories.len(), "Discovered categories");
        debug!(names = ?categories.names().collect::<Vec<_>>(), "Category names");
        Ok(categories)
    }

    /// Fetch one listing page of a category and return title → article URL.
    ///
    /// # Arguments
    ///
    /// * `category_url` - Absolute listing URL from [`Self::discover_categories`]
    /// * `page` - 1-based page number; see [`page_url`] for the URL scheme
    ///
    /// # Returns
    ///
    /// Articles in page order. A page without a listing block yields an
    /// empty map, while a missing page is an [`ScraperError::HttpStatus`].
    #[instrument(level = "info", skip(self), fields(url))]
    pub async fn list_articles(&self, category_url: &str, page: u32) -> Result<ArticleMap> {
        let url = page_url(category_url, page);
        tracing::Span::current().record("url", url.as_str());

        let document = self.fetcher.fetch_html(&url).await?;
        let articles = parse_article_list(&document, &self.base);

        info!(count = articles.len(), "Indexed article URLs");
        Ok(articles)
    }

    /// Fetch an article page and extract its body text and audio URL.
    ///
    /// # Arguments
    ///
    /// * `article_url` - Absolute article page URL
    ///
    /// # Returns
    ///
    /// Only a failed page fetch is an error. Missing content or audio comes
    /// back as `None` in the corresponding field.
    #[instrument(level = "info", skip(self))]
    pub async fn extract_details(&self, article_url: &str) -> Result<ArticleDetails> {
        let document = self.fetcher.fetch_html(article_url).await?;
        let details = parse_article_details(&document, self.audio.as_ref());

        if details.content.is_none() {
            warn!("Article has no content block");
        }
        if details.audio_url.is_none() {
            warn!("Article has no audio reference");
        }
        info!(
            content_bytes = details.content.as_ref().map_or(0, String::len),
            audio = details.audio_url.as_deref().unwrap_or("-"),
            "Parsed article"
        );
        if let Some(content) = &details.content {
            debug!(preview = %truncate_for_log(content, 120), "Article text");
        }
        Ok(details)
    }
}

/// Build the URL of listing page `page` for a category.
///
/// # Arguments
///
/// * `category_url` - Listing URL of the category's first page
/// * `page` - 1-based page number
///
/// # Returns
///
/// The category URL verbatim for page 1 (and 0). Later pages strip a
/// trailing `.html` and append `_<page>.html`, e.g. `.../cat.html` →
/// `.../cat_3.html`.
pub fn page_url(category_url: &str, page: u32) -> String {
    if page <= 1 {
        return category_url.to_string();
    }
    let stem = category_url.strip_suffix(".html").unwrap_or(category_url);
    format!("{stem}_{page}.html")
}

/// Extract the category map from a homepage document.
pub fn parse_categories(document: &Html, base: &Url) -> CategoryMap {
    collect_links(document, &CATEGORY_LINK_SELECTOR, base)
}

/// Extract the article map from a category listing document.
pub fn parse_article_list(document: &Html, base: &Url) -> ArticleMap {
    collect_links(document, &ARTICLE_LINK_SELECTOR, base)
}

/// Extract body text and audio URL from an article document.
pub fn parse_article_details(document: &Html, audio: &dyn AudioUrlStrategy) -> ArticleDetails {
    let content = document
        .select(&CONTENT_SELECTOR)
        .next()
        .map(|node| element_text(&node));

    let audio_url = document
        .select(&SCRIPT_SELECTOR)
        .map(|script| script.text().collect::<String>())
        .find_map(|text| audio.find_in_script(&text));

    ArticleDetails { content, audio_url }
}

fn collect_links(document: &Html, selector: &Selector, base: &Url) -> LinkMap {
    let mut links = LinkMap::new();

    for anchor in document.select(selector) {
        let name = element_text(&anchor);
        let href = anchor.value().attr("href").unwrap_or_default();
        if name.is_empty() || href.is_empty() || !href.contains(".html") {
            continue;
        }

        match base.join(href) {
            Ok(resolved) => {
                if !links.insert_first(name, resolved.to_string()) {
                    debug!(%href, "Skipping duplicate link name");
                }
            }
            Err(e) => debug!(%href, error = %e, "Skipping unresolvable link"),
        }
    }

    links
}

/// Visible text of an element with entities decoded and whitespace trimmed.
fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
