//! Site scraping: categories, listings and article pages.
//!
//! Scraping follows a three-step pattern, one request per step:
//!
//! 1. **Discovery**: read the homepage navigation into a category map
//! 2. **Listing**: read one page of a category into an article map
//! 3. **Extraction**: read an article page into body text and audio URL
//!
//! # Submodules
//!
//! - [`voa`]: selectors, pagination and link filtering for the site
//! - [`audio`]: the replaceable heuristic that finds the MP3 inside scripts
//!
//! Missing markup never fails a step: it yields an empty map or a `None`
//! field. Only failing to retrieve the page itself is an error.

pub mod audio;
pub mod voa;

pub use audio::{AudioUrlStrategy, Mp3LiteralStrategy};
pub use voa::{VoaScraper, page_url};
