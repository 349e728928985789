/// CLI error types
use applytrack_core::TrackerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

impl From<applytrack_client::ClientError> for CliError {
    fn from(err: applytrack_client::ClientError) -> Self {
        CliError::Tracker(err.into())
    }
}

impl From<applytrack_storage::StorageError> for CliError {
    fn from(err: applytrack_storage::StorageError) -> Self {
        CliError::Tracker(err.into())
    }
}

impl From<applytrack_core::ValidationError> for CliError {
    fn from(err: applytrack_core::ValidationError) -> Self {
        CliError::Tracker(err.into())
    }
}
