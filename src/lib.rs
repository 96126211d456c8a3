//! # VOA Downloader
//!
//! Scraping and download pipeline for the learning-English articles published
//! on [21voa.com](https://www.21voa.com/).
//!
//! ## Architecture
//!
//! The pipeline is composed top-down from stateless components sharing one
//! pooled HTTP client ([`PageFetcher`]):
//!
//! 1. **Discovery**: [`VoaScraper::discover_categories`] reads the homepage
//!    navigation into a [`CategoryMap`]
//! 2. **Listing**: [`VoaScraper::list_articles`] reads one page of a category
//!    into an [`ArticleMap`]
//! 3. **Extraction**: [`VoaScraper::extract_details`] reads an article page
//!    into [`ArticleDetails`]
//! 4. **Download**: [`Downloader::download`] streams the article's MP3 to disk
//!    with a `Referer` header, reporting progress to a [`ProgressSink`]
//!
//! [`sanitize_file_name`] turns titles into safe file names, and
//! [`outputs`] holds the batch orchestration used by the CLI.
//!
//! ## Example
//!
//! ```no_run
//! use voa_downloader::{Downloader, PageFetcher, ScraperConfig, VoaScraper};
//!
//! # async fn run() -> voa_downloader::Result<()> {
//! let config = ScraperConfig::default();
//! let fetcher = PageFetcher::new(&config)?;
//! let scraper = VoaScraper::new(fetcher.clone(), &config)?;
//! let downloader = Downloader::new(fetcher);
//!
//! let categories = scraper.discover_categories().await?;
//! if let Some((_, url)) = categories.iter().next() {
//!     let articles = scraper.list_articles(url, 1).await?;
//!     for (title, article_url) in articles.iter() {
//!         let details = scraper.extract_details(article_url).await?;
//!         println!("{title}: complete = {}", details.is_complete());
//!     }
//! }
//! # let _ = downloader;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;

pub use config::{ConfigError, ScraperConfig};
pub use download::{Downloader, NoProgress, ProgressSink};
pub use error::{Result, ScraperError};
pub use http::PageFetcher;
pub use models::{ArticleDetails, ArticleMap, CategoryMap, LinkEntry, LinkMap};
pub use scrapers::{AudioUrlStrategy, Mp3LiteralStrategy, VoaScraper, page_url};
pub use utils::sanitize_file_name;
