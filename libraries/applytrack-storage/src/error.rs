/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Stored value no longer passes validation
    #[error("Corrupt value for '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a corrupt-value error
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<StorageError> for applytrack_core::TrackerError {
    fn from(err: StorageError) -> Self {
        applytrack_core::TrackerError::storage(err.to_string())
    }
}
