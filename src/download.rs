//! Streaming file downloads with progress reporting.
//!
//! The audio host only serves an article's MP3 when the request carries a
//! `Referer` pointing at that article, so every download takes one.
//! Bodies are streamed chunk by chunk to disk and never buffered whole.
//!
//! # Failure guarantees
//!
//! - A non-success status fails before the destination file is created.
//! - A transfer or write failure removes the partially written file.
//! - Nothing is retained between calls, so a failed download can simply be
//!   invoked again.

use std::path::Path;

use futures::StreamExt;
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ScraperError};
use crate::http::PageFetcher;

/// Receives download progress as a percentage in `[0, 100]`.
///
/// Only called when the server declares a `Content-Length`; a download of
/// unknown size completes without a single report.
pub trait ProgressSink {
    fn report(&mut self, percent: f64);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64),
{
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// A sink that discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: f64) {}
}

/// Streams remote files to local paths.
#[derive(Debug, Clone)]
pub struct Downloader {
    fetcher: PageFetcher,
}

impl Downloader {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Download `file_url` to `destination`, sending `referer` as the
    /// `Referer` header.
    ///
    /// # Arguments
    ///
    /// * `file_url` - Absolute URL of the remote file
    /// * `destination` - Created or truncated; its parent must already exist
    /// * `referer` - Page the file is linked from
    /// * `progress` - Receives percentages when the server declares a length
    ///
    /// # Returns
    ///
    /// The number of bytes written. On any error the partial destination
    /// file is removed.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::HttpStatus`] / [`ScraperError::Network`] when the
    ///   request fails; no file is created for a bad status.
    /// - [`ScraperError::Io`] when the destination cannot be written.
    #[instrument(level = "info", skip(self, destination, progress), fields(dest = %destination.display()))]
    pub async fn download(
        &self,
        file_url: &str,
        destination: &Path,
        referer: &str,
        progress: &mut (dyn ProgressSink + Send),
    ) -> Result<u64> {
        let response = self.fetcher.get_with_referer(file_url, referer).await?;
        let total = declared_length(&response);
        debug!(?total, "Starting transfer");

        let file = File::create(destination)
            .await
            .map_err(|e| ScraperError::io(destination, e))?;

        let result = stream_to_file(file, response, file_url, destination, total, progress).await;
        if result.is_err() {
            warn!("Transfer failed; removing partial file");
            if let Err(e) = tokio::fs::remove_file(destination).await {
                warn!(error = %e, "Failed to remove partial file");
            }
        }
        let written = result?;

        info!(bytes = written, "Download complete");
        Ok(written)
    }
}

async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    destination: &Path,
    total: Option<u64>,
    progress: &mut (dyn ProgressSink + Send),
) -> Result<u64> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ScraperError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ScraperError::io(destination, e))?;
        written += chunk.len() as u64;

        if let Some(total) = total {
            progress.report(percent(written, total));
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| ScraperError::io(destination, e))?;
    Ok(written)
}

fn declared_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&len| len > 0)
}

fn percent(done: u64, total: u64) -> f64 {
    (done as f64 / total as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 200), 0.0);
        assert_eq!(percent(50, 200), 25.0);
        assert_eq!(percent(200, 200), 100.0);
        assert_eq!(percent(300, 200), 100.0);
    }

    #[test]
    fn test_closure_is_progress_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: f64| seen.push(p);
            let sink: &mut dyn ProgressSink = &mut sink;
            sink.report(10.0);
            sink.report(55.5);
        }
        assert_eq!(seen, vec![10.0, 55.5]);
    }

    #[test]
    fn test_no_progress_ignores_reports() {
        let mut sink = NoProgress;
        sink.report(42.0);
    }
}
