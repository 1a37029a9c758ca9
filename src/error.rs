// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are two kinds of errors here:
// - Per-URL failures (FetchError, ExtractError) that never stop a crawl.
//   They are turned into a UrlError and recorded in the crawl result.
// - API misuse (CrawlerError) that `WebCrawler::crawl` returns as Err.
//
// We use the `thiserror` crate to derive Display/Error for our enums.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

// A download that did not produce a document
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}")]
    Status { status: u16 },
}

// A downloaded document whose links could not be extracted
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBase { url: String, reason: String },
}

// A URL we could not take a host name from.
// Tasks failing with this are dropped without being recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed URL '{url}': {reason}")]
pub struct MalformedUrl {
    pub url: String,
    pub reason: String,
}

// Errors returned by `WebCrawler::crawl` itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrawlerError {
    #[error("crawl depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    #[error("crawler has been closed")]
    Closed,
}

// What gets recorded for a URL in the crawl result.
//
// #[serde(tag = "kind")] turns this into {"kind": "fetch_failure", "message": ...}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UrlError {
    FetchFailure { message: String },
    ExtractFailure { message: String },
}

impl UrlError {
    pub fn message(&self) -> &str {
        match self {
            UrlError::FetchFailure { message } | UrlError::ExtractFailure { message } => message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UrlError::FetchFailure { .. } => "fetch failure",
            UrlError::ExtractFailure { .. } => "extract failure",
        }
    }
}

impl From<&FetchError> for UrlError {
    fn from(error: &FetchError) -> Self {
        UrlError::FetchFailure {
            message: error.to_string(),
        }
    }
}

impl From<&ExtractError> for UrlError {
    fn from(error: &ExtractError) -> Self {
        UrlError::ExtractFailure {
            message: error.to_string(),
        }
    }
}
