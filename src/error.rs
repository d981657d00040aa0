//! Error types shared by the crawl and merge pipelines.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a URL into rendered markup.
///
/// Render failures are never fatal to a crawl: a listing page that fails
/// counts as an empty page, a detail page that fails is skipped.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },
    #[error("Browser error for {url}: {message}")]
    Browser { url: String, message: String },
    #[error("Timed out after {secs}s rendering {url}")]
    Timeout { url: String, secs: u64 },
    #[error("No page available for {0}")]
    NotFound(String),
    #[error("Browser support not compiled. Rebuild with: cargo build --features browser")]
    Unsupported,
}

/// Fatal errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Failed to read config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("Invalid URL `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("Listing URL template `{0}` has no {{page}} placeholder")]
    InvalidTemplate(String),
    #[error("Merge input {0} has no data rows")]
    EmptyInput(PathBuf),
    #[error("Merged table is empty; nothing to write")]
    EmptyMerge,
    #[error("Failed to start render session: {0}")]
    Session(#[from] RenderError),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = HarvestError> = std::result::Result<T, E>;
