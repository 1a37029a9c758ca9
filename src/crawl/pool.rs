// src/crawl/pool.rs
// =============================================================================
// A fixed-size pool of tokio worker tasks.
//
// How it works:
// 1. `size` workers are spawned up front
// 2. They share one unbounded job channel; the receiver sits behind a mutex
//    so exactly one idle worker waits on it at a time
// 3. A job is any boxed future; the worker runs it to completion, then goes
//    back to the channel
//
// Shutdown aborts every worker. When the last worker is gone the receiver is
// dropped, and with it every job still queued.
// =============================================================================

use futures::future::BoxFuture;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error};

pub type Job = BoxFuture<'static, ()>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("worker pool '{0}' is shut down")]
pub struct PoolClosed(pub &'static str);

pub struct WorkerPool {
    name: &'static str,
    sender: UnboundedSender<Job>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl WorkerPool {
    // Spawns the workers. Must be called from inside a tokio runtime.
    pub fn new(name: &'static str, size: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel::<Job>();
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| tokio::spawn(run_worker(name, id, Arc::clone(&receiver))))
            .collect();

        debug!(pool = name, size, "worker pool started");
        Self {
            name,
            sender,
            workers: Mutex::new(workers),
            closed: AtomicBool::new(false),
        }
    }

    pub fn submit(&self, job: Job) -> Result<(), PoolClosed> {
        if self.is_closed() {
            return Err(PoolClosed(self.name));
        }
        self.sender.send(job).map_err(|_| PoolClosed(self.name))
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // Aborts all workers without draining the queue. Safe to call repeatedly.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for worker in &workers {
            worker.abort();
        }
        debug!(pool = self.name, workers = workers.len(), "worker pool shut down");
    }
}

async fn run_worker(
    pool: &'static str,
    id: usize,
    receiver: Arc<tokio::sync::Mutex<UnboundedReceiver<Job>>>,
) {
    loop {
        // The lock is released before the job runs
        let job = receiver.lock().await.recv().await;
        let Some(job) = job else {
            break;
        };

        // A panicking job must not take the worker down with it
        if AssertUnwindSafe(job).catch_unwind().await.is_err() {
            error!(pool, worker = id, "job panicked");
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not tokio::spawn every job directly?
//    - A pool of N workers is a hard cap on how many jobs run at once
//    - Spawning per job would let a burst of discovered links start
//      thousands of downloads at the same time
//
// 2. Why an unbounded channel?
//    - Workers of one pool submit into the other pool (and into their own,
//      on a host-busy requeue). A bounded channel could fill up while every
//      worker of both pools waits to send: a deadlock
//    - submit() is therefore a plain, non-async call
//
// 3. What does catch_unwind do for a future?
//    - It turns a panic inside the job into an Err instead of unwinding
//      through the worker loop
//    - Anything the job owned (like its InFlight guard) is still dropped
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_runs_submitted_jobs() {
        let pool = WorkerPool::new("test", 3);
        let done = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));

        for _ in 0..10 {
            let done = Arc::clone(&done);
            let tx = Arc::clone(&tx);
            pool.submit(Box::pin(async move {
                if done.fetch_add(1, Ordering::SeqCst) + 1 == 10 {
                    if let Some(tx) = tx.lock().unwrap().take() {
                        let _ = tx.send(());
                    }
                }
            }))
            .unwrap();
        }

        tokio::time::timeout(Duration::from_secs(5), rx)
            .await
            .expect("all jobs ran")
            .unwrap();
        assert_eq!(done.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pool_size_caps_concurrency() {
        let pool = WorkerPool::new("test", 2);
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));

        for _ in 0..8 {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            let finished = Arc::clone(&finished);
            pool.submit(Box::pin(async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                finished.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();
        }

        tokio::time::timeout(Duration::from_secs(5), async {
            while finished.load(Ordering::SeqCst) < 8 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("all jobs finished");
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_worker_survives_panicking_job() {
        let pool = WorkerPool::new("test", 1);
        let (tx, rx) = oneshot::channel();

        pool.submit(Box::pin(async { panic!("boom") })).unwrap();
        pool.submit(Box::pin(async move {
            let _ = tx.send(());
        }))
        .unwrap();

        tokio::time::timeout(Duration::from_secs(5), rx)
            .await
            .expect("second job ran on the same worker")
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent_and_rejects_jobs() {
        let pool = WorkerPool::new("test", 2);
        pool.shutdown();
        pool.shutdown();

        assert!(pool.is_closed());
        assert_eq!(
            pool.submit(Box::pin(async {})),
            Err(PoolClosed("test"))
        );
    }
}
