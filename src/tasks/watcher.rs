//! Store Change Watcher Task
//!
//! Background task that polls the record store's version token and notifies
//! its subscribers when the content changes, including edits made by other
//! processes.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::{RecordStore, VersionToken};

/// Spawns a background task that watches `store` for changes.
///
/// Every `interval` the task reads the store's version token. When it
/// differs from the previous observation (including the store becoming
/// unavailable or available again) the store's subscribers are notified.
/// The task never reads the collection itself.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new("data/items.json"));
/// let watcher = spawn_change_watcher(store.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// watcher.abort();
/// ```
pub fn spawn_change_watcher(store: Arc<dyn RecordStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting store change watcher with interval of {}ms",
            interval.as_millis()
        );

        let mut last: Option<VersionToken> = store.current_version().await.ok();

        loop {
            tokio::time::sleep(interval).await;

            let current = match store.current_version().await {
                Ok(token) => Some(token),
                Err(err) => {
                    if last.is_some() {
                        warn!(error = %err, "store became unavailable");
                    }
                    None
                }
            };

            if current != last {
                info!("Store content changed, notifying subscribers");
                store.notify_changed();
                last = current;
            } else {
                debug!("Store change watcher: no change");
            }
        }
    })
}
