// src/error.rs
// =============================================================================
// Error type for the library.
//
// Only a handful of things are allowed to fail loudly: building the scan
// target (bad seed URL, bad options) and building the HTTP client. Everything
// that goes wrong *during* a scan is turned into data instead (a BrokenLink or
// a skipped page), so these variants mostly show up at construction time or
// inside the fetcher before the crawler swallows them.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("Invalid scan options: {0}")]
    InvalidOptions(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    PageStatus { url: String, status: u16 },

    #[error("Not an HTML document: {0}")]
    NotHtml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
