//! Stats Cache Module
//!
//! Memoizes the catalog aggregate and keeps it consistent with the record
//! store. Every read compares the store's version token with the token the
//! cached entry was computed from; change notifications demote the entry
//! to stale so the next reader rebuilds it.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::cache::{Aggregate, CacheEntry, CacheState, CacheStats, CacheStatus};
use crate::error::AggregateUnavailable;
use crate::lock::mutex_lock;
use crate::store::{ChangeSource, RecordStore, VersionToken};

#[derive(Debug, Default)]
struct Inner {
    state: CacheState,
    stats: CacheStats,
}

// == Stats Cache ==
/// Version-checked cache of the catalog aggregate.
///
/// The state mutex is only held to inspect or swap the entry, never across
/// an `.await`, so notification callbacks never wait on store I/O.
/// Recomputation is single-flight: concurrent readers that all see a stale
/// entry queue on `refresh` and reuse the first result.
pub struct StatsCache {
    store: Arc<dyn RecordStore>,
    inner: Mutex<Inner>,
    refresh: tokio::sync::Mutex<()>,
}

impl StatsCache {
    // == Constructor ==
    /// Creates an empty cache over `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            inner: Mutex::new(Inner::default()),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    // == Get Aggregate ==
    /// Returns the aggregate for the store's current content.
    ///
    /// Serves the cached entry when its token matches the store's; otherwise
    /// recomputes from a fresh snapshot. A failed version check counts as
    /// staleness. Stale data is never returned.
    pub async fn get_aggregate(&self) -> Result<Aggregate, AggregateUnavailable> {
        let current = match self.store.current_version().await {
            Ok(token) => Some(token),
            Err(err) => {
                warn!(error = %err, "version check failed, forcing stats recompute");
                None
            }
        };

        if let Some(aggregate) = self.cached(current.as_ref()) {
            return Ok(aggregate);
        }

        let _flight = self.refresh.lock().await;

        // Another reader may have refreshed while this one waited.
        if let Some(aggregate) = self.cached(current.as_ref()) {
            return Ok(aggregate);
        }

        match self.store.read_snapshot().await {
            Ok(snapshot) => {
                let aggregate = Aggregate::from_items(&snapshot.items);
                let mut inner = mutex_lock(&self.inner, "stats_cache.install");
                inner.state = CacheState::Valid(CacheEntry::new(aggregate, snapshot.version));
                inner.stats.record_recomputation();
                let hit_rate = inner.stats.hit_rate();
                drop(inner);

                info!(
                    total = aggregate.total,
                    average_price = ?aggregate.average_price,
                    hit_rate,
                    "stats recomputed"
                );
                Ok(aggregate)
            }
            Err(err) => {
                let mut inner = mutex_lock(&self.inner, "stats_cache.refresh_failed");
                inner.state.mark_stale();
                inner.stats.record_failure();
                drop(inner);

                warn!(error = %err, "stats recompute failed");
                Err(AggregateUnavailable(err))
            }
        }
    }

    /// Cached aggregate if it was computed from `current`; records a hit.
    fn cached(&self, current: Option<&VersionToken>) -> Option<Aggregate> {
        let current = current?;
        let mut inner = mutex_lock(&self.inner, "stats_cache.lookup");
        let aggregate = inner.state.fresh_for(current)?.aggregate;
        inner.stats.record_hit();
        Some(aggregate)
    }

    // == Invalidate ==
    /// Marks the cached entry stale without touching the store.
    pub fn invalidate(&self) {
        let mut inner = mutex_lock(&self.inner, "stats_cache.invalidate");
        if inner.state.mark_stale() {
            inner.stats.record_invalidation();
            debug!("stats cache invalidated");
        }
    }

    // == Listen ==
    /// Invalidates this cache whenever `source` reports a change.
    ///
    /// The callback holds a weak reference, so it never keeps the cache alive.
    pub fn listen<S: ChangeSource + ?Sized>(self: &Arc<Self>, source: &S) {
        let cache = Arc::downgrade(self);
        source.subscribe(Arc::new(move || {
            if let Some(cache) = cache.upgrade() {
                cache.invalidate();
            }
        }));
    }

    /// Current lifecycle state.
    pub fn status(&self) -> CacheStatus {
        mutex_lock(&self.inner, "stats_cache.status").state.status()
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        mutex_lock(&self.inner, "stats_cache.stats").stats.clone()
    }
}
