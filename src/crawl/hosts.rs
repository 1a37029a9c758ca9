// src/crawl/hosts.rs
// =============================================================================
// Per-host admission control.
//
// Each host gets its own semaphore with `per_host` permits, created the first
// time the host is seen. Acquisition never waits: a worker that is denied
// requeues its task instead of blocking a pool slot.
// =============================================================================

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

pub struct HostAdmission {
    per_host: usize,
    permits: DashMap<String, Arc<Semaphore>>,
}

impl HostAdmission {
    pub fn new(per_host: usize) -> Self {
        Self {
            per_host,
            permits: DashMap::new(),
        }
    }

    // Takes one download slot for `host` if one is free
    //
    // The slot is given back when the returned HostPermit is dropped.
    pub fn try_acquire(&self, host: &str) -> Option<HostPermit> {
        self.semaphore(host)
            .try_acquire_owned()
            .ok()
            .map(|permit| HostPermit { _permit: permit })
    }

    // How many downloads currently hold a permit for `host`
    pub fn active(&self, host: &str) -> usize {
        self.permits
            .get(host)
            .map(|semaphore| self.per_host - semaphore.available_permits())
            .unwrap_or(0)
    }

    fn semaphore(&self, host: &str) -> Arc<Semaphore> {
        // Fast path: the host is already known, only a shared lock is taken
        if let Some(semaphore) = self.permits.get(host) {
            return Arc::clone(semaphore.value());
        }
        // entry() locks the shard, so two first sightings can't both insert
        let semaphore = self
            .permits
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.per_host)));
        Arc::clone(semaphore.value())
    }
}

// A held download slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct HostPermit {
    _permit: OwnedSemaphorePermit,
}
