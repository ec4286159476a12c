use async_trait::async_trait;
use serde_json::Value;
use skybook_shared::random_token;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, error};

pub const USERS: &str = "users";
pub const FLIGHTS: &str = "flights";
pub const BOOKINGS: &str = "bookings";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on collection '{collection}': {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },
    #[error("collection '{collection}' is not a JSON array ({reason}); moved to {}", .quarantined_to.display())]
    Corrupt {
        collection: String,
        quarantined_to: PathBuf,
        reason: String,
    },
    #[error("failed to serialize collection '{collection}': {source}")]
    Serialize {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence primitive: a named collection is a JSON array of flat records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record in the collection. A collection that was never saved is empty.
    async fn load_all(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Replace the whole collection.
    async fn save_all(&self, collection: &str, records: &[Value]) -> Result<(), StoreError>;
}

/// Stores each collection as `<root>/<collection>.json`.
///
/// Writes overwrite the file in place. A crash in the middle of a write can leave a
/// truncated file behind; the next load quarantines it instead of reading garbage.
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StoreError::Io {
                collection: root.display().to_string(),
                source,
            })?;
        debug!("Record store opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    async fn quarantine(&self, collection: &str, path: &Path, reason: String) -> StoreError {
        // Two corruptions within the same second must not overwrite each other.
        let target = self.root.join(format!(
            "{}.json.corrupt-{}-{}",
            collection,
            chrono::Utc::now().timestamp(),
            random_token(8)
        ));

        if let Err(source) = tokio::fs::rename(path, &target).await {
            error!(
                "Collection '{}' is corrupt and could not be moved aside: {}",
                collection, source
            );
            return StoreError::Io {
                collection: collection.to_string(),
                source,
            };
        }

        error!(
            "Collection '{}' is corrupt ({}); quarantined to {}",
            collection,
            reason,
            target.display()
        );
        StoreError::Corrupt {
            collection: collection.to_string(),
            quarantined_to: target,
            reason,
        }
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn load_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let path = self.path_for(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    collection: collection.to_string(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => Err(self.quarantine(collection, &path, e.to_string()).await),
        }
    }

    async fn save_all(&self, collection: &str, records: &[Value]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serialize {
            collection: collection.to_string(),
            source,
        })?;

        tokio::fs::write(self.path_for(collection), body)
            .await
            .map_err(|source| StoreError::Io {
                collection: collection.to_string(),
                source,
            })
    }
}

/// Keeps collections in process memory. Used by tests and throwaway runs.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn load_all(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn save_all(&self, collection: &str, records: &[Value]) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        collections.insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}
