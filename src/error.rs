//! Error types for the scraping and download pipeline.
//!
//! Two failure families matter to callers because their retry strategies
//! differ:
//!
//! - **Fetch failures** ([`ScraperError::Network`], [`ScraperError::HttpStatus`],
//!   [`ScraperError::InvalidUrl`]): the remote page or file could not be
//!   retrieved. Usually worth retrying later.
//! - **IO failures** ([`ScraperError::Io`]): the local filesystem refused a
//!   write. Retrying the network will not help.
//!
//! A page that was fetched but lacks an expected node is *not* an error; see
//! [`crate::models::ArticleDetails`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the pipeline.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Transport-level failure (DNS, connection refused, TLS, timeout, body read).
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// The underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL being fetched.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// A URL could not be parsed or resolved against the site origin.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The offending URL string.
        url: String,
    },

    /// Local filesystem failure while writing a download.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ScraperError {
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for every failure to retrieve a remote resource.
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        !self.is_io()
    }

    /// True for local write failures.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_fetch() {
        let err = ScraperError::http_status("https://www.21voa.com/x.html", 404);
        assert!(err.is_fetch());
        assert!(!err.is_io());
        assert_eq!(
            err.to_string(),
            "HTTP 404 fetching https://www.21voa.com/x.html"
        );
    }

    #[test]
    fn test_io_is_not_fetch() {
        let err = ScraperError::io(
            "/tmp/a.mp3",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_io());
        assert!(!err.is_fetch());
        assert!(err.to_string().contains("/tmp/a.mp3"));
    }

    #[test]
    fn test_invalid_url_message() {
        let err = ScraperError::invalid_url("not a url");
        assert!(err.is_fetch());
        assert_eq!(err.to_string(), "invalid URL: not a url");
    }
}
