//! Runtime configuration for the scraper.
//!
//! The pipeline targets a single fixed origin. Everything here has a sensible
//! default so the tool runs with no configuration at all; a YAML file and CLI
//! overrides exist mainly for pointing the scraper at a mirror or a local
//! test server.
//!
//! ```yaml
//! base_url: "https://www.21voa.com/"
//! connect_timeout_secs: 30
//! request_timeout_secs: 300
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Origin of the site being scraped.
pub const DEFAULT_BASE_URL: &str = "https://www.21voa.com/";

/// Browser-like User-Agent; the origin serves reduced pages to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Settings shared by every component of the pipeline.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site origin; relative links are resolved against it.
    pub base_url: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (covers large audio downloads).
    pub request_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 30,
            request_timeout_secs: 300,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a YAML file. Missing keys fall back to defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Replace the origin, e.g. from a CLI flag.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    /// Parsed origin.
    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.base().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_points_at_origin() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url, "https://www.21voa.com/");
        assert_eq!(config.connect_timeout_secs, 30);
        assert!(config.base().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScraperConfig::from_yaml("base_url: \"http://127.0.0.1:8080/\"\n").unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.request_timeout_secs, 300);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            ScraperConfig::from_yaml("  \n").unwrap(),
            ScraperConfig::default()
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "connect_timeout_secs: 5").unwrap();
        let config = ScraperConfig::load(file.path()).unwrap();
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_rejects_bad_base_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: \"not a url\"").unwrap();
        let err = ScraperConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScraperConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_with_base_url_override() {
        let config = ScraperConfig::default()
            .with_base_url("http://localhost:9000/")
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert!(ScraperConfig::default().with_base_url("::").is_err());
    }
}
