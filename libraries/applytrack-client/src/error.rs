//! Error types for the ApplyTrack client.

use applytrack_core::{RecordId, TrackerError};
use thiserror::Error;

/// Errors that can occur when talking to the remote authority.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Registration refused: account already exists
    #[error("Account already exists: {0}")]
    EmailExists(String),

    /// Login refused
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Record unknown to the server
    #[error("Application not found: {0}")]
    RecordNotFound(RecordId),

    /// Body matched none of the agreed tokens
    #[error("Unexpected response to {operation}: {body}")]
    UnexpectedResponse { operation: &'static str, body: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Map a send failure, separating unreachable hosts from other errors.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<ClientError> for TrackerError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::EmailExists(email) => TrackerError::EmailExists(email),
            ClientError::InvalidCredentials => TrackerError::InvalidCredentials,
            ClientError::RecordNotFound(id) => TrackerError::RecordNotFound(id),
            ClientError::UnexpectedResponse { operation, body } => {
                TrackerError::UnexpectedResponse { operation, body }
            }
            ClientError::ServerError { status, message } => {
                TrackerError::Server { status, message }
            }
            ClientError::ServerUnreachable(msg) => TrackerError::Unreachable(msg),
            ClientError::ParseError(msg) => TrackerError::Parse(msg),
            ClientError::Request(e) => TrackerError::Network(e.to_string()),
            ClientError::InvalidUrl(msg) => TrackerError::Network(format!("invalid URL: {msg}")),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
