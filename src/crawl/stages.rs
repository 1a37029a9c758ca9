// src/crawl/stages.rs
// =============================================================================
// The two pipeline stages and the state they share during one crawl.
//
// download: CrawlTask -> (host admission) -> Downloader -> extract stage
// extract:  Document  -> (depth check, dedup) -> download stage
//
// Every submission creates an InFlight guard and moves it into the job, so
// the job's terminal outcome (return, panic, or being dropped) is the
// matching decrement.
// =============================================================================

use std::sync::Arc;
use tracing::{debug, trace};

use super::frontier::Frontier;
use super::hosts::HostAdmission;
use super::pending::{InFlight, PendingCounter};
use super::pool::{PoolClosed, WorkerPool};
use crate::error::UrlError;
use crate::fetch::{host_of, Document, Downloader};

// Engine-wide pieces, shared by every crawl
pub struct Stages {
    pub downloads: WorkerPool,
    pub extractors: WorkerPool,
    pub downloader: Arc<dyn Downloader>,
}

impl Stages {
    pub fn shutdown(&self) {
        self.downloads.shutdown();
        self.extractors.shutdown();
    }
}

// A URL waiting to be downloaded and the depth budget left for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub url: String,
    pub depth: usize,
}

// Everything one crawl call owns. Jobs hold it through an Arc.
pub struct CrawlContext {
    pub stages: Arc<Stages>,
    pub frontier: Frontier,
    pub hosts: HostAdmission,
    pub pending: Arc<PendingCounter>,
}

impl CrawlContext {
    pub fn new(stages: Arc<Stages>, per_host: usize) -> Self {
        Self {
            stages,
            frontier: Frontier::new(),
            hosts: HostAdmission::new(per_host),
            pending: PendingCounter::new(),
        }
    }
}

pub fn submit_download(ctx: &Arc<CrawlContext>, task: CrawlTask) -> Result<(), PoolClosed> {
    let in_flight = ctx.pending.track();
    let job = download(Arc::clone(ctx), task, in_flight);
    ctx.stages.downloads.submit(Box::pin(job))
}

fn submit_extract(
    ctx: &Arc<CrawlContext>,
    document: Box<dyn Document>,
    url: String,
    depth: usize,
) -> Result<(), PoolClosed> {
    let in_flight = ctx.pending.track();
    let job = extract(Arc::clone(ctx), document, url, depth, in_flight);
    ctx.stages.extractors.submit(Box::pin(job))
}

async fn download(ctx: Arc<CrawlContext>, task: CrawlTask, _in_flight: InFlight) {
    let host = match host_of(&task.url) {
        Ok(host) => host,
        Err(e) => {
            // Not recorded as an error: the URL never reaches the result
            debug!(url = %task.url, error = %e, "dropping malformed URL");
            return;
        }
    };

    let Some(permit) = ctx.hosts.try_acquire(&host) else {
        // Host busy: put the same task back. No backoff, but give the
        // permit holders a turn before this worker picks up more work.
        trace!(
            url = %task.url,
            %host,
            active = ctx.hosts.active(&host),
            "host busy, requeueing"
        );
        tokio::task::yield_now().await;
        if let Err(e) = submit_download(&ctx, task) {
            debug!(error = %e, "requeue dropped");
        }
        return;
    };

    let fetched = ctx.stages.downloader.download(&task.url).await;
    drop(permit);

    match fetched {
        Ok(document) => {
            ctx.frontier.mark_visited(&task.url);
            debug!(url = %task.url, depth = task.depth, "downloaded");
            if let Err(e) = submit_extract(&ctx, document, task.url, task.depth) {
                debug!(error = %e, "extraction dropped");
            }
        }
        Err(e) => {
            debug!(url = %task.url, error = %e, "download failed");
            ctx.frontier.record_error(&task.url, UrlError::from(&e));
        }
    }
}

async fn extract(
    ctx: Arc<CrawlContext>,
    document: Box<dyn Document>,
    url: String,
    depth: usize,
    _in_flight: InFlight,
) {
    if depth <= 1 {
        return;
    }

    let links = match document.extract_links() {
        Ok(links) => links,
        Err(e) => {
            debug!(%url, error = %e, "link extraction failed");
            ctx.frontier.record_error(&url, UrlError::from(&e));
            return;
        }
    };

    let mut queued = 0usize;
    for link in links {
        if !ctx.frontier.try_enqueue(&link) {
            continue;
        }
        let task = CrawlTask {
            url: link,
            depth: depth - 1,
        };
        if let Err(e) = submit_download(&ctx, task) {
            debug!(error = %e, "discovered link dropped");
            return;
        }
        queued += 1;
    }
    trace!(%url, queued, "links queued");
    // _in_flight drops here, after every child has been counted
}
