//! Batch outcome summary.
//!
//! A batch never aborts on a single article; each outcome is recorded here
//! and rendered once at the end, as text for the terminal and optionally as
//! JSON for scripts.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::fs;
use tracing::{info, instrument};

/// An article that could not be saved, with the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FailedArticle {
    pub title: String,
    pub reason: String,
}

/// Per-article results of one batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedArticle>,
    pub finished_at: Option<DateTime<Local>>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, title: impl Into<String>) {
        self.succeeded.push(title.into());
    }

    pub fn record_failure(&mut self, title: impl Into<String>, reason: impl ToString) {
        self.failed.push(FailedArticle {
            title: title.into(),
            reason: reason.to_string(),
        });
    }

    /// Stamp the completion time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when articles were attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.total() > 0 && self.succeeded.is_empty()
    }

    /// Human-readable summary.
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "Batch download finished: {} of {} succeeded.\n",
            self.succeeded.len(),
            self.total()
        );
        if !self.failed.is_empty() {
            out.push_str("\nFailed articles:\n");
            for failed in &self.failed {
                out.push_str(&format!("- {} ({})\n", failed.title, failed.reason));
            }
        }
        out
    }

    /// Write the report as pretty JSON.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;
        info!("Wrote batch report");
        Ok(())
    }
}
