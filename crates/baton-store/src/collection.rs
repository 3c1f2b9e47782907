use async_trait::async_trait;
use baton_model::RecordId;

use crate::error::StoreError;

/// A stored record together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<T> {
    pub id: RecordId,
    pub data: T,
}

/// Single-document operations a storage backend provides.
#[async_trait]
pub trait Collection<T>: Send + Sync
where
    T: Clone + Send + Sync + 'static,
{
    /// Stores `record` under a new identifier.
    async fn insert(&self, record: T) -> Result<RecordId, StoreError>;

    /// All records, in insertion order.
    async fn find_all(&self) -> Result<Vec<Document<T>>, StoreError>;

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Document<T>>, StoreError>;

    /// Replaces the record; returns `false` if `id` is unknown.
    async fn update(&self, id: &RecordId, record: T) -> Result<bool, StoreError>;

    /// Removes the record; returns `false` if `id` is unknown.
    async fn delete_by_id(&self, id: &RecordId) -> Result<bool, StoreError>;
}
