//! In-process record store.
//!
//! Version tokens come from a write generation counter rather than a file.
//! Counts snapshot reads so callers can observe how often the collection is
//! actually loaded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, UNIX_EPOCH};

use async_trait::async_trait;

use super::{next_id, ChangeCallback, ChangeSource, RecordStore, Snapshot, Subscribers, VersionToken};
use crate::error::StoreError;
use crate::lock::mutex_lock;
use crate::models::{Item, NewItem};

#[derive(Debug)]
struct MemoryState {
    items: Vec<Item>,
    generation: u64,
}

impl MemoryState {
    fn version(&self) -> VersionToken {
        VersionToken::new(
            UNIX_EPOCH + Duration::from_nanos(self.generation),
            self.items.len() as u64,
        )
    }
}

// == Memory Store ==
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    snapshot_reads: AtomicU64,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                items,
                generation: 1,
            }),
            snapshot_reads: AtomicU64::new(0),
            subscribers: Subscribers::new(),
        }
    }

    /// Number of full snapshot reads served so far.
    pub fn snapshot_reads(&self) -> u64 {
        self.snapshot_reads.load(Ordering::SeqCst)
    }

    /// Replaces the whole collection without notifying subscribers,
    /// the way an edit from another process would.
    pub fn overwrite(&self, items: Vec<Item>) {
        let mut state = mutex_lock(&self.state, "memory_store.overwrite");
        state.items = items;
        state.generation += 1;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ChangeSource for MemoryStore {
    fn subscribe(&self, callback: ChangeCallback) {
        self.subscribers.subscribe(callback);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_snapshot(&self) -> Result<Snapshot, StoreError> {
        self.snapshot_reads.fetch_add(1, Ordering::SeqCst);
        let state = mutex_lock(&self.state, "memory_store.read_snapshot");
        Ok(Snapshot {
            items: state.items.clone(),
            version: state.version(),
        })
    }

    async fn append(&self, item: NewItem) -> Result<(Item, VersionToken), StoreError> {
        let (item, version) = {
            let mut state = mutex_lock(&self.state, "memory_store.append");
            let item = item.with_id(next_id(&state.items));
            state.items.push(item.clone());
            state.generation += 1;
            (item, state.version())
        };
        self.subscribers.notify();
        Ok((item, version))
    }

    async fn current_version(&self) -> Result<VersionToken, StoreError> {
        Ok(mutex_lock(&self.state, "memory_store.current_version").version())
    }

    fn notify_changed(&self) {
        self.subscribers.notify();
    }
}
