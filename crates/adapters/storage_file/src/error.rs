//! Storage-specific error type for the file store.

use hbnb_domain::error::HbnbError;

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the object file failed.
    #[error("file error")]
    Io(#[from] std::io::Error),

    /// The object file or a stored record is not valid JSON.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl From<StorageError> for HbnbError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
