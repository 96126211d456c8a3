//! # VOA Downloader
//!
//! Command-line front end for the scraping pipeline: list categories and
//! articles, preview an article, and batch-download article text plus audio.
//!
//! ## Usage
//!
//! ```sh
//! voa_downloader categories
//! voa_downloader articles "As It Is" --page 2
//! voa_downloader download "As It Is" -o ./voa --all
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls verbosity) so listings on stdout
//! stay pipeable.

use std::path::Path;

use anyhow::{Context, anyhow, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

use voa_downloader::outputs::article::save_article;
use voa_downloader::outputs::report::BatchReport;
use voa_downloader::{Downloader, LinkMap, PageFetcher, ScraperConfig, VoaScraper};

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = load_config(args.config.as_deref(), args.base_url)?;
    let fetcher = PageFetcher::new(&config)?;
    let scraper = VoaScraper::new(fetcher.clone(), &config)?;
    let downloader = Downloader::new(fetcher);
    info!(base = %scraper.base_url(), "voa_downloader starting up");

    match args.command {
        Command::Categories { json } => {
            let categories = scraper.discover_categories().await?;
            print_links(&categories, json)?;
        }
        Command::Articles {
            category,
            page,
            json,
        } => {
            let category_url = resolve_category(&scraper, &category).await?;
            let articles = scraper.list_articles(&category_url, page).await?;
            if articles.is_empty() {
                warn!(%category_url, page, "No articles on this page");
            }
            print_links(&articles, json)?;
        }
        Command::Show { url } => {
            let details = scraper.extract_details(&url).await?;
            println!(
                "Audio: {}\n",
                details.audio_url.as_deref().unwrap_or("(none found)")
            );
            println!(
                "{}",
                details.content.as_deref().unwrap_or("(no article text found)")
            );
        }
        Command::Download {
            category,
            output_dir,
            page,
            titles,
            all,
            report_json,
        } => {
            let report = run_batch(
                &scraper,
                &downloader,
                &category,
                page,
                &titles,
                all,
                &output_dir,
            )
            .await?;

            print!("{}", report.render_text());
            if let Some(path) = report_json {
                report.write_json(&path).await?;
            }
            if report.all_failed() {
                bail!("every selected article failed to download");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

fn load_config(path: Option<&Path>, base_url: Option<String>) -> anyhow::Result<ScraperConfig> {
    let config = match path {
        Some(path) => ScraperConfig::load(path)?,
        None => ScraperConfig::default(),
    };
    match base_url {
        Some(base_url) => Ok(config.with_base_url(base_url)?),
        None => Ok(config),
    }
}

/// Accept an absolute listing URL as-is, otherwise look the name up among
/// the discovered categories.
async fn resolve_category(scraper: &VoaScraper, category: &str) -> anyhow::Result<String> {
    if let Ok(url) = Url::parse(category)
        && matches!(url.scheme(), "http" | "https")
    {
        return Ok(url.to_string());
    }

    let categories = scraper
        .discover_categories()
        .await
        .context("failed to load categories")?;
    categories
        .get_ignore_case(category)
        .map(str::to_string)
        .ok_or_else(|| {
            let known = categories.names().collect::<Vec<_>>().join(", ");
            anyhow!("unknown category {category:?}; available: {known}")
        })
}

#[instrument(level = "info", skip(scraper, downloader, titles, output_dir))]
async fn run_batch(
    scraper: &VoaScraper,
    downloader: &Downloader,
    category: &str,
    page: u32,
    titles: &[String],
    all: bool,
    output_dir: &Path,
) -> anyhow::Result<BatchReport> {
    let category_url = resolve_category(scraper, category).await?;
    let articles = scraper
        .list_articles(&category_url, page)
        .await
        .with_context(|| format!("failed to list {category_url} page {page}"))?;

    let mut report = BatchReport::new();
    let mut selected: Vec<(String, String)> = Vec::new();
    if all {
        selected.extend(
            articles
                .iter()
                .map(|(title, url)| (title.to_string(), url.to_string())),
        );
    } else {
        for title in titles {
            match articles.get(title) {
                Some(url) => selected.push((title.clone(), url.to_string())),
                None => report.record_failure(title.as_str(), "not listed on this page"),
            }
        }
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    let total = selected.len();
    info!(total, "Starting batch download");
    for (i, (title, url)) in selected.iter().enumerate() {
        let bar = progress_bar(&format!("({}/{}) {}", i + 1, total, title));
        let mut sink = {
            let bar = bar.clone();
            move |percent: f64| bar.set_position(percent.round() as u64)
        };

        match save_article(scraper, downloader, title, url, output_dir, &mut sink).await {
            Ok(saved) => {
                bar.finish_and_clear();
                info!(%title, folder = %saved.folder.display(), "Article saved");
                report.record_success(title.as_str());
            }
            Err(e) => {
                bar.abandon();
                error!(%title, error = %e, retryable = e.is_retryable(), "Skipping article");
                report.record_failure(title.as_str(), &e);
            }
        }
    }

    report.finish();
    Ok(report)
}

fn progress_bar(message: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(message.to_string());
    bar
}

fn print_links(links: &LinkMap, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(links)?);
        return Ok(());
    }
    for entry in links {
        println!("{}\t{}", entry.name, entry.url);
    }
    Ok(())
}
