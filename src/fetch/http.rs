// src/fetch/http.rs
// =============================================================================
// The network-backed Downloader.
//
// Key functionality:
// - Makes HTTP GET requests with a per-request timeout
// - Follows a limited number of redirects
// - Treats any non-2xx status as a failed download
// - Resolves links against the final URL (after redirects)
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{Document, Downloader, HtmlDocument};
use crate::error::FetchError;

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    // Create a downloader with the given per-request timeout
    //
    // We reuse this client for all requests (connection pooling)
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        // Relative links on a redirected page are relative to where we ended up
        let final_url = response.url().to_string();
        let html = response.text().await?;
        debug!(url, %final_url, bytes = html.len(), "downloaded page");

        Ok(Box::new(HtmlDocument::new(final_url, html)))
    }
}
