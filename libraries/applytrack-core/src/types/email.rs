/// User identity types
use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Email address identifying a user.
///
/// Doubles as the ownership key for application records and as the
/// persisted session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserEmail(String);

impl UserEmail {
    /// Trim and validate an address.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if email_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidEmail(trimmed.to_string()))
        }
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserEmail {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserEmail> for String {
    fn from(email: UserEmail) -> Self {
        email.0
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email and password pair sent to the remote authority.
#[derive(Clone)]
pub struct Credentials {
    pub email: UserEmail,
    pub password: String,
}

impl Credentials {
    pub fn new(email: UserEmail, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
        }
    }
}

// Password never reaches logs through `{:?}`.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
