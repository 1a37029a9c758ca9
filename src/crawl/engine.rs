// src/crawl/engine.rs
// =============================================================================
// The crawl orchestrator.
//
// A WebCrawler owns the download and extraction pools for its whole life.
// Each call to crawl() builds fresh per-crawl state, seeds one task, waits
// for the in-flight counter to drain, and returns a snapshot.
// =============================================================================

use std::sync::Arc;
use tracing::{info, warn};

use super::frontier::CrawlResult;
use super::pool::WorkerPool;
use super::stages::{submit_download, CrawlContext, CrawlTask, Stages};
use crate::config::{ConfigError, CrawlerConfig};
use crate::error::CrawlerError;
use crate::fetch::Downloader;

pub struct WebCrawler {
    stages: Arc<Stages>,
    per_host: usize,
}

impl WebCrawler {
    // Starts both worker pools. Must be called from inside a tokio runtime.
    pub fn new(
        downloader: Arc<dyn Downloader>,
        config: &CrawlerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            downloads = config.download_parallelism,
            extractors = config.extract_parallelism,
            per_host = config.per_host,
            "starting crawler"
        );

        let stages = Stages {
            downloads: WorkerPool::new("download", config.download_parallelism),
            extractors: WorkerPool::new("extract", config.extract_parallelism),
            downloader,
        };
        Ok(Self {
            stages: Arc::new(stages),
            per_host: config.per_host,
        })
    }

    // Downloads every page reachable from `url` in at most `depth - 1` hops
    //
    // Per-URL failures end up in `CrawlResult::errors`; only misuse of the
    // crawler itself is returned as Err.
    pub async fn crawl(&self, url: &str, depth: usize) -> Result<CrawlResult, CrawlerError> {
        if depth == 0 {
            return Err(CrawlerError::InvalidDepth(depth));
        }
        info!(url, depth, "crawl started");

        let ctx = Arc::new(CrawlContext::new(Arc::clone(&self.stages), self.per_host));
        ctx.frontier.try_enqueue(url);
        let seed = CrawlTask {
            url: url.to_string(),
            depth,
        };
        submit_download(&ctx, seed).map_err(|_| CrawlerError::Closed)?;

        ctx.pending.wait_for_zero().await;

        let result = ctx.frontier.snapshot();
        if self.stages.downloads.is_closed() {
            warn!(url, "crawler closed during crawl, result is partial");
        }
        info!(
            url,
            downloaded = result.downloaded.len(),
            errors = result.errors.len(),
            "crawl finished"
        );
        Ok(result)
    }

    // Stops both pools right away. In-flight work is abandoned.
    pub fn close(&self) {
        self.stages.shutdown();
    }
}

impl Drop for WebCrawler {
    fn drop(&mut self) {
        self.close();
    }
}
