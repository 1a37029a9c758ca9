// src/crawl/frontier.rs
// =============================================================================
// Per-crawl bookkeeping shared by all workers:
// - enqueued: every URL ever scheduled (check-and-set dedup)
// - visited: every URL downloaded successfully
// - errors: the first failure recorded for a URL
// =============================================================================

use dashmap::{DashMap, DashSet};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::UrlError;

#[derive(Default)]
pub struct Frontier {
    enqueued: DashSet<String>,
    visited: DashSet<String>,
    errors: DashMap<String, UrlError>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns true for exactly one caller per URL
    pub fn try_enqueue(&self, url: &str) -> bool {
        // Cheap read first; most discovered links are already known
        if self.enqueued.contains(url) {
            return false;
        }
        self.enqueued.insert(url.to_string())
    }

    pub fn mark_visited(&self, url: &str) {
        self.visited.insert(url.to_string());
    }

    // Keeps the first error recorded for a URL
    pub fn record_error(&self, url: &str, error: UrlError) {
        self.errors.entry(url.to_string()).or_insert(error);
    }

    pub fn snapshot(&self) -> CrawlResult {
        CrawlResult {
            downloaded: self.visited.iter().map(|url| url.key().clone()).collect(),
            errors: self
                .errors
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().clone()))
                .collect(),
        }
    }
}

// The outcome of one crawl.
//
// Sorted collections keep the table and JSON output stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    pub downloaded: BTreeSet<String>,
    pub errors: BTreeMap<String, UrlError>,
}
