//! Writing downloaded articles to disk and summarising batch runs.
//!
//! # Submodules
//!
//! - [`article`]: saves one article's text and audio into its own folder
//! - [`report`]: collects per-article outcomes of a batch
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── Scientists Find New Moon/
//! │   ├── Scientists Find New Moon.txt
//! │   └── Scientists Find New Moon.mp3
//! └── Report_ Q1_Q2_!/
//!     ├── Report_ Q1_Q2_!.txt
//!     └── Report_ Q1_Q2_!.mp3
//! ```

pub mod article;
pub mod report;
