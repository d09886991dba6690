//! JSON file-backed record store.
//!
//! The whole collection lives in one JSON array. Writes go to a temporary
//! sibling file which is then renamed over the target, so readers see either
//! the old array or the new one.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{next_id, ChangeCallback, ChangeSource, RecordStore, Snapshot, Subscribers, VersionToken};
use crate::error::StoreError;
use crate::models::{Item, NewItem};

/// Attempts made to pair a read with a stable version token
const SNAPSHOT_ATTEMPTS: usize = 2;

// == Json File Store ==
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes appends within this process
    write_lock: Mutex<()>,
    subscribers: Subscribers,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            subscribers: Subscribers::new(),
        }
    }

    fn describe(&self, err: impl std::fmt::Display) -> String {
        format!("{}: {}", self.path.display(), err)
    }

    async fn version(&self) -> io::Result<VersionToken> {
        let meta = tokio::fs::metadata(&self.path).await?;
        VersionToken::from_metadata(&meta)
    }

    /// Reads and parses the file once, bracketed by two version checks.
    ///
    /// Returns `None` when the file was replaced while it was being read.
    async fn read_once(&self) -> Result<Option<Snapshot>, StoreError> {
        let unavailable = |e: &dyn std::fmt::Display| StoreError::Unavailable(self.describe(e));

        let before = self.version().await.map_err(|e| unavailable(&e))?;
        let raw = tokio::fs::read(&self.path).await.map_err(|e| unavailable(&e))?;
        let items = parse_items(&raw).map_err(|e| unavailable(&e))?;
        let after = self.version().await.map_err(|e| unavailable(&e))?;

        Ok((before == after).then_some(Snapshot {
            items,
            version: after,
        }))
    }

    async fn read_until_stable<F, Fut>(&self, mut attempt: F) -> Result<Snapshot, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<Snapshot>, StoreError>>,
    {
        for n in 1..=SNAPSHOT_ATTEMPTS {
            if let Some(snapshot) = attempt().await? {
                return Ok(snapshot);
            }
            debug!(attempt = n, path = %self.path.display(), "store changed during read");
        }

        Err(StoreError::Unavailable(
            self.describe("content kept changing during read"),
        ))
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "items.json".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
    }

    /// Writes `body` to a temporary file, then renames it over the target.
    ///
    /// Returns the token of the written file; rename keeps the file's mtime
    /// and length, so the token stays valid at the target path.
    async fn replace_contents(&self, body: &[u8]) -> io::Result<VersionToken> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let temp = self.temp_path();
        let result = async {
            let mut file = tokio::fs::File::create(&temp).await?;
            file.write_all(body).await?;
            file.sync_all().await?;
            let token = VersionToken::from_metadata(&file.metadata().await?)?;
            drop(file);
            tokio::fs::rename(&temp, &self.path).await?;
            Ok::<_, io::Error>(token)
        }
        .await;

        if result.is_err() {
            let _ = tokio::fs::remove_file(&temp).await;
        }
        result
    }
}

fn parse_items(raw: &[u8]) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_slice(raw)
}

impl ChangeSource for JsonFileStore {
    fn subscribe(&self, callback: ChangeCallback) {
        self.subscribers.subscribe(callback);
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn read_snapshot(&self) -> Result<Snapshot, StoreError> {
        self.read_until_stable(move || self.read_once()).await
    }

    async fn append(&self, item: NewItem) -> Result<(Item, VersionToken), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut items = match tokio::fs::read(&self.path).await {
            Ok(raw) => parse_items(&raw).map_err(|e| StoreError::WriteFailure(self.describe(e)))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "creating item store");
                Vec::new()
            }
            Err(e) => return Err(StoreError::WriteFailure(self.describe(e))),
        };

        let item = item.with_id(next_id(&items));
        items.push(item.clone());

        let body =
            serde_json::to_vec_pretty(&items).map_err(|e| StoreError::WriteFailure(self.describe(e)))?;
        let version = self
            .replace_contents(&body)
            .await
            .map_err(|e| StoreError::WriteFailure(self.describe(e)))?;

        debug!(id = item.id, total = items.len(), "item appended");
        self.subscribers.notify();
        Ok((item, version))
    }

    async fn current_version(&self) -> Result<VersionToken, StoreError> {
        self.version()
            .await
            .map_err(|e| StoreError::Unavailable(self.describe(e)))
    }

    fn notify_changed(&self) {
        self.subscribers.notify();
    }
}
