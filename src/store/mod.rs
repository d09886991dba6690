//! Record Store Module
//!
//! The canonical item collection. A store hands out immutable snapshots
//! tagged with a version token, appends atomically, and notifies
//! subscribers when its content changes.

mod file;
mod memory;

use std::fs::Metadata;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::lock::mutex_lock;
use crate::models::{Item, NewItem};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

// == Version Token ==
/// Identifies one state of the backing collection.
///
/// Modification time plus byte length: the length catches writes that land
/// inside a single mtime tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionToken {
    pub modified: SystemTime,
    pub len: u64,
}

impl VersionToken {
    pub fn new(modified: SystemTime, len: u64) -> Self {
        Self { modified, len }
    }

    /// Builds a token from file metadata.
    pub fn from_metadata(meta: &Metadata) -> std::io::Result<Self> {
        Ok(Self::new(meta.modified()?, meta.len()))
    }
}

// == Snapshot ==
/// An immutable read of the whole collection with the token valid at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub items: Vec<Item>,
    pub version: VersionToken,
}

// == Change Subscription ==
/// Callback invoked when a store's content changes.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Anything that can announce content changes.
///
/// Delivery is at-least-once; subscribers must tolerate duplicates.
pub trait ChangeSource: Send + Sync {
    fn subscribe(&self, callback: ChangeCallback);
}

/// A list of change callbacks. Also usable directly as a synthetic source.
#[derive(Default)]
pub struct Subscribers {
    callbacks: Mutex<Vec<ChangeCallback>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every registered callback.
    ///
    /// Callbacks run outside the registry lock, so they may subscribe further.
    pub fn notify(&self) {
        let callbacks = mutex_lock(&self.callbacks, "subscribers.notify").clone();
        for callback in callbacks {
            callback();
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        mutex_lock(&self.callbacks, "subscribers.len").len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChangeSource for Subscribers {
    fn subscribe(&self, callback: ChangeCallback) {
        mutex_lock(&self.callbacks, "subscribers.subscribe").push(callback);
    }
}

// == Record Store Trait ==
/// Contract consumed by the catalog handlers and the stats cache.
#[async_trait]
pub trait RecordStore: ChangeSource {
    /// Reads the full collection. Never returns a torn item/token pair.
    async fn read_snapshot(&self) -> Result<Snapshot, StoreError>;

    /// Assigns the next id, persists the item and returns it with the new token.
    ///
    /// On failure the visible collection is unchanged.
    async fn append(&self, item: NewItem) -> Result<(Item, VersionToken), StoreError>;

    /// Cheap staleness check; does not read the collection.
    async fn current_version(&self) -> Result<VersionToken, StoreError>;

    /// Tells subscribers the content changed.
    fn notify_changed(&self);
}

/// Next id for a collection: one past the largest id seen.
pub(crate) fn next_id(items: &[Item]) -> u64 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribers_notify_all() {
        let subscribers = Subscribers::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            subscribers.subscribe(Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            }));
        }

        subscribers.notify();
        subscribers.notify();
        assert_eq!(subscribers.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_notify_without_subscribers() {
        let subscribers = Subscribers::new();
        assert!(subscribers.is_empty());
        subscribers.notify();
    }

    #[test]
    fn test_next_id() {
        let item = |id| Item {
            id,
            name: "x".to_string(),
            category: None,
            price: 1.0,
        };
        assert_eq!(next_id(&[]), 1);
        assert_eq!(next_id(&[item(4), item(2)]), 5);
    }
}
