//! Local precondition checks.
//!
//! These checks fail fast before a round trip. They are advisory: the
//! remote authority remains the only judge of account existence and
//! record ownership.

use crate::error::ValidationError;
use crate::types::{ApplicationFields, ApplicationStatus, Credentials, UserEmail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default minimum password length for registration
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

type Result<T> = std::result::Result<T, ValidationError>;

/// Tunable validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Minimum password length accepted by `register`
    pub min_password_length: usize,
    /// Reject applied dates before today
    pub reject_past_dates: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            reject_past_dates: false,
        }
    }
}

impl ValidationPolicy {
    /// Check registration input.
    pub fn registration(&self, email: &str, password: &str) -> Result<Credentials> {
        let email = UserEmail::parse(email)?;
        let password = password.trim();
        if password.chars().count() < self.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.min_password_length,
            });
        }
        Ok(Credentials::new(email, password))
    }

    /// Check login input. Only presence of a password is required here.
    pub fn login(&self, email: &str, password: &str) -> Result<Credentials> {
        let email = UserEmail::parse(email)?;
        let password = password.trim();
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Credentials::new(email, password))
    }

    /// Check and assemble record fields.
    ///
    /// `today` is only consulted when past dates are rejected.
    pub fn fields(
        &self,
        company: &str,
        position: &str,
        applied_date: &str,
        status: &str,
        today: NaiveDate,
    ) -> Result<ApplicationFields> {
        let company = required("Company", company)?;
        let position = required("Position", position)?;
        let date_raw = required("Applied date", applied_date)?;
        let status_raw = required("Status", status)?;

        let applied_date = parse_applied_date(&date_raw)?;
        self.check_date(applied_date, today)?;

        Ok(ApplicationFields {
            company,
            position,
            applied_date,
            status: parse_status(&status_raw)?,
        })
    }

    /// Check fields that arrive already typed.
    ///
    /// Applies the same rules as [`ValidationPolicy::fields`]: company and
    /// position must be non-empty, the status must be a named one and the
    /// date must pass the past-date rule.
    pub fn check_fields(&self, fields: &ApplicationFields, today: NaiveDate) -> Result<()> {
        required("Company", &fields.company)?;
        required("Position", &fields.position)?;
        if let ApplicationStatus::Other(other) = &fields.status {
            return Err(ValidationError::UnknownStatus(other.clone()));
        }
        self.check_date(fields.applied_date, today)
    }

    /// Apply the past-date rule to an already parsed date.
    pub fn check_date(&self, date: NaiveDate, today: NaiveDate) -> Result<()> {
        if self.reject_past_dates && date < today {
            return Err(ValidationError::PastDate(date));
        }
        Ok(())
    }
}

fn required(name: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(name))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a date given as `YYYY-MM-DD` or `dd/MM/yyyy`.
pub fn parse_applied_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Parse a status typed by the user; only the named states are accepted.
pub fn parse_status(raw: &str) -> Result<ApplicationStatus> {
    match ApplicationStatus::parse(raw) {
        ApplicationStatus::Other(other) => Err(ValidationError::UnknownStatus(other)),
        named => Ok(named),
    }
}
