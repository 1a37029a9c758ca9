// src/fetch/mod.rs
// =============================================================================
// The capabilities the crawl engine depends on but does not implement itself:
// - Downloader: turns a URL into a Document
// - Document: lists the links it contains
// - host_of: takes the host name out of a URL
//
// Submodules:
// - http: Downloader backed by reqwest
// - html: Document backed by scraper
// - host: host name extraction
// - fake: deterministic in-memory Downloader for tests
// =============================================================================

mod host;
mod html;
mod http;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::{ExtractError, FetchError};

pub use host::host_of;
pub use html::HtmlDocument;
pub use http::HttpDownloader;

// A fetched page
pub trait Document: Send + Sync {
    // Outbound links in the order they appear in the page
    fn extract_links(&self) -> Result<Vec<String>, ExtractError>;
}

// Fetches pages. Implementations are shared by every download worker.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, FetchError>;
}
