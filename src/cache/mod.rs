//! Cache Module
//!
//! Provides the version-checked statistics cache over the record store.

mod aggregate;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use aggregate::Aggregate;
pub use entry::{CacheEntry, CacheState, CacheStatus};
pub use stats::CacheStats;
pub use store::StatsCache;
