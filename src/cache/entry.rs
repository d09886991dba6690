//! Cache Entry Module
//!
//! A computed aggregate tagged with the version it was computed from, and
//! the lifecycle states the cache moves through.

use serde::Serialize;

use crate::cache::Aggregate;
use crate::store::VersionToken;

// == Cache Entry ==
/// A memoized aggregate and the store version it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    pub aggregate: Aggregate,
    pub source_version: VersionToken,
}

impl CacheEntry {
    pub fn new(aggregate: Aggregate, source_version: VersionToken) -> Self {
        Self {
            aggregate,
            source_version,
        }
    }

    /// Whether this entry was computed from the store state `current`.
    pub fn is_current(&self, current: &VersionToken) -> bool {
        self.source_version == *current
    }
}

// == Cache State ==
/// Lifecycle of the memoized aggregate.
///
/// `Empty` and `Stale` both force a recomputation before answering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CacheState {
    #[default]
    Empty,
    Valid(CacheEntry),
    Stale(CacheEntry),
}

impl CacheState {
    /// Entry usable for `current` without touching the store.
    pub fn fresh_for(&self, current: &VersionToken) -> Option<&CacheEntry> {
        match self {
            CacheState::Valid(entry) if entry.is_current(current) => Some(entry),
            _ => None,
        }
    }

    /// Demotes a valid entry to stale. Other states are left alone.
    pub fn mark_stale(&mut self) -> bool {
        match *self {
            CacheState::Valid(entry) => {
                *self = CacheState::Stale(entry);
                true
            }
            _ => false,
        }
    }

    pub fn status(&self) -> CacheStatus {
        match self {
            CacheState::Empty => CacheStatus::Empty,
            CacheState::Valid(_) => CacheStatus::Valid,
            CacheState::Stale(_) => CacheStatus::Stale,
        }
    }
}

/// Data-free view of `CacheState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Empty,
    Valid,
    Stale,
}
