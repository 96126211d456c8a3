//! Shared HTTP fetch primitive.
//!
//! Every network-facing component goes through [`PageFetcher`], which owns a
//! single `reqwest::Client`. Cloning the fetcher shares the client's
//! connection pool, so category discovery, listing, extraction and downloads
//! all reuse keep-alive connections instead of building a client per call.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::REFERER;
use scraper::Html;
use tracing::{debug, instrument};

use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};

/// Pooled HTTP client for HTML pages and binary assets.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Build a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Network`] if the TLS backend cannot be initialised.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ScraperError::network(config.base_url.clone(), e))?;
        Ok(Self { client })
    }

    /// GET `url` and parse the body as an HTML document.
    ///
    /// # Errors
    ///
    /// [`ScraperError::HttpStatus`] for non-2xx responses and
    /// [`ScraperError::Network`] for transport or body-read failures.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_html(&self, url: &str) -> Result<Html> {
        let response = self.send(url, None).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ScraperError::network(url, e))?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(Html::parse_document(&body))
    }

    /// GET `url` with a `Referer` header. The status is checked before the
    /// response is returned, so callers only ever see successful bodies.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_with_referer(&self, url: &str, referer: &str) -> Result<reqwest::Response> {
        self.send(url, Some(referer)).await
    }

    async fn send(&self, url: &str, referer: Option<&str>) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ScraperError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}
