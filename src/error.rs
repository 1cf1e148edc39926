// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

pub use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Index-addressed operation outside `0..len`.
    #[error("index {index} out of range (store holds {len} records)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("record ids exhausted")]
    IdsExhausted,
    #[error("record {0} not found")]
    RecordNotFound(u64),
    #[error("invalid slot key: {0}")]
    InvalidKey(String),
}

impl From<redb::DatabaseError> for StoreError {
    fn from(e: redb::DatabaseError) -> Self {
        StoreError::Redb(e.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(e: redb::TransactionError) -> Self {
        StoreError::Redb(e.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(e: redb::TableError) -> Self {
        StoreError::Redb(e.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(e: redb::CommitError) -> Self {
        StoreError::Redb(e.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(e: redb::StorageError) -> Self {
        StoreError::Redb(e.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
