use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use baton_model::RecordId;
use tracing::trace;

use crate::{
    collection::{Collection, Document},
    error::StoreError,
};

/// In-memory collection.
///
/// Clones share the same storage.
pub struct MemoryCollection<T> {
    inner: Arc<RwLock<MemoryInner<T>>>,
}

impl<T> Clone for MemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct MemoryInner<T> {
    /// Records indexed by id.
    records: HashMap<RecordId, T>,
    /// Ids in insertion order.
    order: Vec<RecordId>,
}

impl<T> MemoryCollection<T> {
    /// Create empty collection.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryInner {
                records: HashMap::new(),
                order: Vec::new(),
            })),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryInner<T>>, StoreError> {
        self.inner.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryInner<T>>, StoreError> {
        self.inner.write().map_err(poisoned)
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<G>(_: PoisonError<G>) -> StoreError {
    StoreError::Backend("collection lock poisoned".to_string())
}

#[async_trait]
impl<T> Collection<T> for MemoryCollection<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn insert(&self, record: T) -> Result<RecordId, StoreError> {
        let id = RecordId::from(uuid::Uuid::new_v4().to_string());
        let mut inner = self.write()?;

        inner.records.insert(id.clone(), record);
        inner.order.push(id.clone());
        trace!(%id, "record inserted");
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Document<T>>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| {
                inner.records.get(id).map(|data| Document {
                    id: id.clone(),
                    data: data.clone(),
                })
            })
            .collect())
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Document<T>>, StoreError> {
        let inner = self.read()?;
        Ok(inner.records.get(id).map(|data| Document {
            id: id.clone(),
            data: data.clone(),
        }))
    }

    async fn update(&self, id: &RecordId, record: T) -> Result<bool, StoreError> {
        let mut inner = self.write()?;

        match inner.records.get_mut(id) {
            Some(slot) => {
                *slot = record;
                trace!(%id, "record updated");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &RecordId) -> Result<bool, StoreError> {
        let mut inner = self.write()?;

        if inner.records.remove(id).is_none() {
            return Ok(false);
        }
        inner.order.retain(|known| known != id);
        trace!(%id, "record deleted");
        Ok(true)
    }
}
