//! Command-line interface definitions for VOA Downloader.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. The origin can also be supplied through the environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the VOA Downloader application.
///
/// # Examples
///
/// ```sh
/// # List categories
/// voa_downloader categories
///
/// # Second page of a category, as JSON
/// voa_downloader articles "As It Is" --page 2 --json
///
/// # Download two articles from the first page
/// voa_downloader download "As It Is" -o ./voa -t "Title One" -t "Title Two"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a config.yaml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the site origin
    #[arg(long, env = "VOA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the site's categories
    Categories {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the articles on one page of a category
    Articles {
        /// Category display name or listing URL
        category: String,

        /// 1-based listing page
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print an article's text and audio URL
    Show {
        /// Article page URL
        url: String,
    },

    /// Download text and audio for articles on one page of a category
    Download {
        /// Category display name or listing URL
        category: String,

        /// Root directory for downloaded articles
        #[arg(short, long)]
        output_dir: PathBuf,

        /// 1-based listing page
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Exact article title to download (repeatable)
        #[arg(short, long = "title", required_unless_present = "all")]
        titles: Vec<String>,

        /// Download every article on the page
        #[arg(long, conflicts_with = "titles")]
        all: bool,

        /// Also write the batch report as JSON
        #[arg(long)]
        report_json: Option<PathBuf>,
    },
}
