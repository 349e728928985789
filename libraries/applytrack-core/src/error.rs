/// Core error types for ApplyTrack
use crate::types::RecordId;
use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using `TrackerError`
pub type Result<T> = std::result::Result<T, TrackerError>;

/// How a failure should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A local precondition failed; no remote call was made.
    Validation,
    /// The remote authority answered with a recognized refusal.
    Rejection,
    /// The request could not complete or the answer was not understood.
    Transport,
}

/// Local precondition failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email does not match the accepted address syntax
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Password shorter than the configured policy allows
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Password left empty
    #[error("Password is required")]
    EmptyPassword,

    /// Required record field left empty
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// Date could not be parsed as a calendar date
    #[error("Invalid date '{0}': use YYYY-MM-DD or dd/MM/yyyy")]
    InvalidDate(String),

    /// Date lies before today while past dates are disallowed
    #[error("Date {0} is in the past")]
    PastDate(NaiveDate),

    /// Status is not one of Applied, Interview, Offer, Rejected
    #[error("Unknown status '{0}': expected Applied, Interview, Offer or Rejected")]
    UnknownStatus(String),

    /// Same company and position already tracked
    #[error("Duplicate entry: {position} at {company} is already tracked")]
    Duplicate { company: String, position: String },

    /// Operation needs an active session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Record names an owner other than the logged-in user
    #[error("Application belongs to {0}, not the logged-in user")]
    ForeignOwner(String),

    /// Reference does not match any cached record
    #[error("No application matches '{0}'")]
    UnknownRecord(String),
}

/// Core error type for ApplyTrack
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Local validation failed before any remote call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registration refused because the account already exists
    #[error("Account already exists: {0}")]
    EmailExists(String),

    /// Login refused
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Remote authority does not know the record
    #[error("Application not found: {0}")]
    RecordNotFound(RecordId),

    /// Remote authority answered with a body outside the agreed tokens
    #[error("Unexpected response to {operation}: {body}")]
    UnexpectedResponse { operation: &'static str, body: String },

    /// Remote authority returned an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Remote authority could not be reached
    #[error("Server unreachable: {0}")]
    Unreachable(String),

    /// Request failed in flight
    #[error("Network error: {0}")]
    Network(String),

    /// Response payload could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A mutation was confirmed but the follow-up refresh failed
    #[error("Change saved, but the application list could not be reloaded: {source}")]
    StaleAfterMutation {
        #[source]
        source: Box<TrackerError>,
    },

    /// Local session persistence failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an unexpected-response error
    pub fn unexpected(operation: &'static str, body: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            operation,
            body: body.into(),
        }
    }

    /// Classify the failure for presentation.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::EmailExists(_) | Self::InvalidCredentials | Self::RecordNotFound(_) => {
                ErrorClass::Rejection
            }
            Self::UnexpectedResponse { .. }
            | Self::Server { .. }
            | Self::Unreachable(_)
            | Self::Network(_)
            | Self::Parse(_)
            | Self::StaleAfterMutation { .. }
            | Self::Storage(_) => ErrorClass::Transport,
        }
    }

    /// Whether re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            TrackerError::from(ValidationError::NotLoggedIn).class(),
            ErrorClass::Validation
        );
        assert_eq!(
            TrackerError::EmailExists("a@b.com".into()).class(),
            ErrorClass::Rejection
        );
        assert_eq!(TrackerError::InvalidCredentials.class(), ErrorClass::Rejection);
        assert_eq!(
            TrackerError::RecordNotFound(RecordId::new("x")).class(),
            ErrorClass::Rejection
        );
        assert_eq!(
            TrackerError::unexpected("login", "oops").class(),
            ErrorClass::Transport
        );
        assert_eq!(
            TrackerError::Unreachable("refused".into()).class(),
            ErrorClass::Transport
        );
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(TrackerError::Network("reset".into()).is_retryable());
        assert!(!TrackerError::InvalidCredentials.is_retryable());
        assert!(!TrackerError::from(ValidationError::EmptyPassword).is_retryable());
    }

    #[test]
    fn test_stale_after_mutation_keeps_cause() {
        let err = TrackerError::StaleAfterMutation {
            source: Box::new(TrackerError::Unreachable("down".into())),
        };
        assert_eq!(err.class(), ErrorClass::Transport);
        assert!(err.to_string().contains("down"));
    }
}
