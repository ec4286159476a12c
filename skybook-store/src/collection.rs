use serde_json::Value;
use skybook_core::repository::Mutation;
use skybook_core::{CoreError, CoreResult};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

use crate::codec::{CodecError, RecordCodec};
use crate::record_store::{RecordStore, StoreError};

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt {
                collection,
                quarantined_to,
                reason,
            } => CoreError::StorageCorrupt {
                collection,
                detail: format!("{} (quarantined to {})", reason, quarantined_to.display()),
            },
            other => CoreError::Storage(other.to_string()),
        }
    }
}

fn corrupt(collection: &str, err: CodecError) -> CoreError {
    error!("Collection '{}' holds an unreadable record: {}", collection, err);
    CoreError::StorageCorrupt {
        collection: collection.to_string(),
        detail: err.to_string(),
    }
}

/// Typed view of one collection.
///
/// Every read-modify-write cycle holds the collection lock from load to save, so
/// concurrent writers on the same collection never interleave.
pub struct JsonCollection<T> {
    store: Arc<dyn RecordStore>,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RecordCodec> JsonCollection<T> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    async fn read(&self) -> CoreResult<Vec<T>> {
        self.store
            .load_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(|record| T::decode(record).map_err(|e| corrupt(T::COLLECTION, e)))
            .collect()
    }

    async fn write(&self, items: &[T]) -> CoreResult<()> {
        let records = items
            .iter()
            .map(|item| item.encode().map_err(|e| CoreError::Storage(e.to_string())))
            .collect::<CoreResult<Vec<Value>>>()?;
        self.store.save_all(T::COLLECTION, &records).await?;
        Ok(())
    }

    pub async fn all(&self) -> CoreResult<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    pub async fn find(&self, predicate: impl Fn(&T) -> bool) -> CoreResult<Option<T>> {
        Ok(self.all().await?.into_iter().find(|item| predicate(item)))
    }

    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> CoreResult<Vec<T>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|item| predicate(item))
            .collect())
    }

    /// Append `entity` with the next free id. `check` sees the current contents first
    /// and can refuse the insert.
    pub async fn insert(
        &self,
        mut entity: T,
        check: impl FnOnce(&[T], &T) -> CoreResult<()>,
    ) -> CoreResult<T> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;
        check(&items, &entity)?;

        let next_id = items.iter().map(|item| item.record_id()).max().unwrap_or(0) + 1;
        entity.assign_id(next_id);
        items.push(entity.clone());

        self.write(&items).await?;
        Ok(entity)
    }

    /// Apply `mutation` to the item with `id` and save. Nothing is written if the
    /// mutation fails.
    pub async fn update(&self, id: i64, what: &str, mutation: Mutation<T>) -> CoreResult<T> {
        let _guard = self.lock.lock().await;
        let mut items = self.read().await?;

        let item = items
            .iter_mut()
            .find(|item| item.record_id() == id)
            .ok_or_else(|| CoreError::NotFound(what.to_string()))?;
        mutation(item)?;
        item.assign_id(id);
        let updated = item.clone();

        self.write(&items).await?;
        Ok(updated)
    }
}
