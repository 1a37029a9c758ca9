// src/crawl/pending.rs
// =============================================================================
// Completion tracking for one crawl.
//
// Every task submitted to a worker pool carries an InFlight guard. Creating
// the guard increments the counter; dropping it decrements. The crawl is done
// when the counter reaches zero.
//
// Because the decrement lives in Drop, it also happens when a task panics or
// is thrown away by a pool shutdown.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct PendingCounter {
    count: AtomicUsize,
    zero: Notify,
}

impl PendingCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // Counts one more task in flight until the returned guard is dropped
    pub fn track(self: &Arc<Self>) -> InFlight {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlight {
            counter: Arc::clone(self),
        }
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn release(&self) {
        let previous = self.count.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "pending counter underflow");
        if previous == 1 {
            // notify_one stores a permit if nobody is waiting yet
            self.zero.notify_one();
        }
    }

    // Waits until no task is in flight
    pub async fn wait_for_zero(&self) {
        while self.get() != 0 {
            self.zero.notified().await;
        }
    }
}

// One unit of in-flight work
#[derive(Debug)]
#[must_use = "dropping the guard immediately marks the task finished"]
pub struct InFlight {
    counter: Arc<PendingCounter>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.counter.release();
    }
}
