use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::{RequestError, Result};
use crate::models::request_entry::RequestEntry;
use crate::store::QueueStore;

/// In-memory store. Clones share state, so a test can keep a handle after
/// moving one into the queue.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Vec<RequestEntry>>>,
    saves: Arc<Mutex<usize>>,
    failing: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<RequestEntry>) -> Self {
        let store = Self::new();
        *store.entries.lock() = entries;
        store
    }

    pub fn entries(&self) -> Vec<RequestEntry> {
        self.entries.lock().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    // Simulate a broken disk
    pub fn simulate_failure(&self) {
        *self.failing.lock() = true;
    }

    pub fn simulate_recovery(&self) {
        *self.failing.lock() = false;
    }
}

impl QueueStore for MemoryStore {
    fn load(&self) -> Result<Vec<RequestEntry>> {
        if *self.failing.lock() {
            return Err(RequestError::Store("simulated load failure".to_string()));
        }
        Ok(self.entries())
    }

    fn save(&self, entries: &[RequestEntry]) -> Result<()> {
        if *self.failing.lock() {
            return Err(RequestError::Store("simulated save failure".to_string()));
        }
        *self.entries.lock() = entries.to_vec();
        *self.saves.lock() += 1;
        Ok(())
    }
}
