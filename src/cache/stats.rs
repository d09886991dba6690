//! Cache Statistics Module
//!
//! Tracks how the stats cache answers: fast-path hits, recomputations,
//! invalidations and failed refreshes.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing stats cache behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads answered from the cached entry
    pub hits: u64,
    /// Reads that rebuilt the aggregate from a snapshot
    pub recomputations: u64,
    /// Change notifications that demoted a valid entry
    pub invalidations: u64,
    /// Reads that could not produce an aggregate
    pub failures: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + recomputations), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.recomputations;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_recomputation(&mut self) {
        self.recomputations += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}
