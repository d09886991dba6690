//! Poison-tolerant lock helpers.
//!
//! Guarded sections in this crate only swap whole values, so a panic while
//! holding a lock cannot leave partial state behind.

use std::sync::{Mutex, MutexGuard};

use tracing::warn;

pub(crate) fn mutex_lock<'a, T>(lock: &'a Mutex<T>, op: &'static str) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(op, result = "poisoned_recovered", "Recovered from poisoned lock");
            poisoned.into_inner()
        }
    }
}
