//! Snapshot persistence for the book collection

use super::{Collection, DocumentStore};
use crate::core::{Book, BookFilter, BookUpdate, Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::{debug, info};

pub const SNAPSHOT_VERSION: u32 = 1;
pub const SNAPSHOT_FILE_NAME: &str = "books.snapshot";

// ============================================================================
// Snapshot File
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub collection: Collection,
}

impl CollectionSnapshot {
    pub fn new(collection: Collection) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            collection,
        }
    }
}

#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encode(collection: &Collection) -> Result<Vec<u8>> {
        let snapshot = CollectionSnapshot::new(collection.clone());
        rmp_serde::to_vec(&snapshot).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Replace the snapshot on disk. The old file stays intact until the new
    /// one is fully written and synced.
    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<CollectionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.path)?;
        let snapshot: CollectionSnapshot =
            rmp_serde::from_slice(&data).map_err(|e| StoreError::Serialization(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(Some(snapshot))
    }
}

// ============================================================================
// Snapshot Store
// ============================================================================

/// Document store that rewrites its snapshot file after every mutation.
pub struct SnapshotStore {
    collection: RwLock<Collection>,
    file: Arc<SnapshotFile>,
}

impl SnapshotStore {
    /// Open the store in `data_dir`, loading an existing snapshot if present.
    pub async fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let file = Arc::new(SnapshotFile::new(data_dir.join(SNAPSHOT_FILE_NAME)));

        let loader = Arc::clone(&file);
        let snapshot = tokio::task::spawn_blocking(move || {
            fs::create_dir_all(&data_dir)?;
            loader.load()
        })
        .await??;

        let collection = match snapshot {
            Some(snapshot) => {
                info!(
                    path = %file.path().display(),
                    books = snapshot.collection.len(),
                    created_at = %snapshot.created_at,
                    "loaded snapshot"
                );
                snapshot.collection
            }
            None => {
                info!(path = %file.path().display(), "no snapshot found, starting empty");
                Collection::new()
            }
        };

        Ok(Self {
            collection: RwLock::new(collection),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    // Copy-on-write: the live collection is replaced only after the snapshot is on disk.
    async fn mutate<R>(&self, op: impl FnOnce(&mut Collection) -> R) -> Result<R> {
        let mut guard = self.collection.write().await;
        let mut next = guard.clone();
        let out = op(&mut next);
        if next == *guard {
            return Ok(out);
        }

        let bytes = SnapshotFile::encode(&next)?;
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || file.write(&bytes)).await??;
        debug!(books = next.len(), "snapshot written");

        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl DocumentStore for SnapshotStore {
    async fn insert_one(&self, book: Book) -> Result<()> {
        self.mutate(|coll| coll.insert(book)).await
    }

    async fn count(&self, filter: &BookFilter) -> Result<u64> {
        Ok(self.collection.read().await.count(filter))
    }

    async fn update_one(&self, filter: &BookFilter, update: &BookUpdate) -> Result<u64> {
        self.mutate(|coll| coll.update_one(filter, update)).await
    }

    async fn delete_one(&self, filter: &BookFilter) -> Result<u64> {
        self.mutate(|coll| coll.delete_one(filter)).await
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.collection.read().await.books().to_vec())
    }
}
