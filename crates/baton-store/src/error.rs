use baton_model::{ModelError, RecordId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ModelError),

    #[error("record not found: {0}")]
    NotFound(RecordId),

    #[error("backend error: {0}")]
    Backend(String),
}
