/// Storage error types
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl From<StorageError> for warden_core::WardenError {
    fn from(err: StorageError) -> Self {
        warden_core::WardenError::storage(err.to_string())
    }
}
