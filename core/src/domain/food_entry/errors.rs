use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Food entry {0} not found")]
    NotFound(Uuid),

    #[error("Failed to write food entry: {0}")]
    WriteFailed(String),

    #[error("Failed to read food entries: {0}")]
    ReadFailed(String),

    #[error("Database connection failed: {0}")]
    Connection(String),
}
