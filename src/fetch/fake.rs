// src/fetch/fake.rs
// =============================================================================
// An in-memory Downloader for tests.
//
// It serves a fixed link graph and lets a test inject:
// - latency per download (so downloads overlap)
// - URLs whose download fails
// - URLs whose link extraction fails
// - URLs whose download panics
//
// It also records how often each URL was fetched and the peak number of
// concurrent downloads seen per host.
// =============================================================================

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{host_of, Document, Downloader};
use crate::error::{ExtractError, FetchError};

#[derive(Default)]
struct Stats {
    fetches: HashMap<String, usize>,
    active: HashMap<String, usize>,
    peak: HashMap<String, usize>,
}

#[derive(Clone, Default)]
pub struct FakeDownloader {
    links: HashMap<String, Vec<String>>,
    fetch_failures: HashSet<String>,
    extract_failures: HashSet<String>,
    panics: HashSet<String>,
    latency: Duration,
    stats: Arc<Mutex<Stats>>,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a page and the links it contains, in order
    pub fn page(mut self, url: &str, links: &[&str]) -> Self {
        self.links.insert(
            url.to_string(),
            links.iter().map(|link| link.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.fetch_failures.insert(url.to_string());
        self
    }

    pub fn unparseable(mut self, url: &str) -> Self {
        self.extract_failures.insert(url.to_string());
        self
    }

    pub fn panicking(mut self, url: &str) -> Self {
        self.panics.insert(url.to_string());
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        let stats = self.stats.lock().unwrap();
        stats.fetches.get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        let stats = self.stats.lock().unwrap();
        stats.fetches.values().sum()
    }

    pub fn peak_concurrency(&self, host: &str) -> usize {
        let stats = self.stats.lock().unwrap();
        stats.peak.get(host).copied().unwrap_or(0)
    }

    fn enter(&self, url: &str, host: &str) {
        let mut stats = self.stats.lock().unwrap();
        *stats.fetches.entry(url.to_string()).or_default() += 1;
        let active = {
            let active = stats.active.entry(host.to_string()).or_default();
            *active += 1;
            *active
        };
        let peak = stats.peak.entry(host.to_string()).or_default();
        *peak = (*peak).max(active);
    }

    fn leave(&self, host: &str) {
        let mut stats = self.stats.lock().unwrap();
        if let Some(active) = stats.active.get_mut(host) {
            *active -= 1;
        }
    }
}

struct FakeDocument {
    url: String,
    links: Vec<String>,
    broken: bool,
}

impl Document for FakeDocument {
    fn extract_links(&self) -> Result<Vec<String>, ExtractError> {
        if self.broken {
            return Err(ExtractError::InvalidBase {
                url: self.url.clone(),
                reason: "injected extraction failure".to_string(),
            });
        }
        Ok(self.links.clone())
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download(&self, url: &str) -> Result<Box<dyn Document>, FetchError> {
        let host = host_of(url).unwrap_or_default();
        self.enter(url, &host);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.leave(&host);

        if self.panics.contains(url) {
            panic!("injected panic while downloading {url}");
        }

        if self.fetch_failures.contains(url) {
            return Err(FetchError::Status { status: 500 });
        }
        // Pages outside the graph exist but have no links
        Ok(Box::new(FakeDocument {
            url: url.to_string(),
            links: self.links.get(url).cloned().unwrap_or_default(),
            broken: self.extract_failures.contains(url),
        }))
    }
}
