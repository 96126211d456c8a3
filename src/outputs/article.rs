//! Saving one article: text file plus MP3, side by side in a folder named
//! after the sanitized title.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::download::{Downloader, ProgressSink};
use crate::error::ScraperError;
use crate::scrapers::VoaScraper;
use crate::utils::sanitize_file_name;

/// Folder/file stem used when a title sanitizes to nothing usable.
const UNTITLED: &str = "untitled";

/// Files written for one article.
#[derive(Debug, Clone)]
pub struct SavedArticle {
    pub folder: PathBuf,
    pub text_path: PathBuf,
    pub audio_path: PathBuf,
    pub audio_bytes: u64,
}

/// Why an article could not be saved.
#[derive(Debug, Error)]
pub enum ArticleSaveError {
    /// The page was fetched but lacks body text or an audio reference.
    #[error("article page has no {missing}")]
    Incomplete { missing: &'static str },

    #[error(transparent)]
    Scraper(#[from] ScraperError),
}

impl ArticleSaveError {
    /// Incomplete pages will not improve on retry; fetch failures might.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Incomplete { .. } => false,
            Self::Scraper(e) => e.is_fetch(),
        }
    }
}

/// Extract an article and save `<root>/<safe>/<safe>.txt` and `<safe>.mp3`.
///
/// The article URL doubles as the `Referer` for the audio request. Articles
/// missing either text or audio are skipped before anything is written.
///
/// # Arguments
///
/// * `title` - Listing title; sanitized into the folder and file stem
/// * `article_url` - Absolute article page URL
/// * `root` - Output directory; it must already exist
/// * `progress` - Receives audio download percentages
///
/// # Returns
///
/// The paths written and the audio byte count, or
/// [`ArticleSaveError::Incomplete`] when the page lacks text or audio.
#[instrument(level = "info", skip(scraper, downloader, root, progress), fields(root = %root.display()))]
pub async fn save_article(
    scraper: &VoaScraper,
    downloader: &Downloader,
    title: &str,
    article_url: &str,
    root: &Path,
    progress: &mut (dyn ProgressSink + Send),
) -> Result<SavedArticle, ArticleSaveError> {
    let details = scraper.extract_details(article_url).await?;

    let content = details
        .content
        .filter(|c| !c.is_empty())
        .ok_or(ArticleSaveError::Incomplete { missing: "content" })?;
    let audio_url = details
        .audio_url
        .filter(|u| !u.is_empty())
        .ok_or(ArticleSaveError::Incomplete { missing: "audio" })?;

    let stem = file_stem(title);
    let folder = root.join(&stem);
    fs::create_dir_all(&folder)
        .await
        .map_err(|e| ScraperError::io(&folder, e))?;

    let text_path = folder.join(format!("{stem}.txt"));
    let audio_path = folder.join(format!("{stem}.mp3"));

    fs::write(&text_path, content.as_bytes())
        .await
        .map_err(|e| ScraperError::io(&text_path, e))?;
    debug!(path = %text_path.display(), "Wrote article text");

    let audio_bytes = downloader
        .download(&audio_url, &audio_path, article_url, progress)
        .await?;

    info!(folder = %folder.display(), audio_bytes, "Saved article");
    Ok(SavedArticle {
        folder,
        text_path,
        audio_path,
        audio_bytes,
    })
}

/// Trailing dots and spaces are stripped, which also turns `.` and `..`
/// into the fallback so the stem can never name the root or its parent.
fn file_stem(title: &str) -> String {
    let stem = sanitize_file_name(title.trim());
    let stem = stem.trim_end_matches(['.', ' ']);
    if stem.is_empty() {
        UNTITLED.to_string()
    } else {
        stem.to_string()
    }
}
