// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Pieces (leaves first):
// - hosts: per-host admission control (non-blocking permits)
// - frontier: dedup of scheduled URLs, visited set, error map
// - pending: in-flight task counter that signals completion
// - pool: fixed-size tokio worker pools
// - stages: the download and extraction stages that feed each other
// - engine: WebCrawler, the public entry point
// =============================================================================

mod engine;
mod frontier;
mod hosts;
mod pending;
mod pool;
mod stages;

// Re-export the public API
pub use engine::WebCrawler;
pub use frontier::CrawlResult;
