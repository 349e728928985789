//! Types for remote authority requests and responses.

use crate::error::{ClientError, Result};
use applytrack_core::validation::parse_applied_date;
use applytrack_core::{
    ApplicationFields, ApplicationStatus, Credentials, Draft, Persisted, RecordId, UserEmail,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Configuration for connecting to the remote authority.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "http://localhost:5000")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl ServerConfig {
    /// Create a new server config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Override both timeouts.
    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

// =============================================================================
// Account Types
// =============================================================================

/// Request body for `/register` and `/login`.
#[derive(Debug, Serialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

impl From<&Credentials> for AuthRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            email: credentials.email.as_str().to_string(),
            password: credentials.password.clone(),
        }
    }
}

// =============================================================================
// Application Types
// =============================================================================

/// Request body for `/addJob` and `/updateStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    /// Present only for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_email: String,
    pub company: String,
    pub position: String,
    /// `YYYY-MM-DD`
    pub applied_date: String,
    pub status: String,
}

impl JobPayload {
    fn from_parts(id: Option<&RecordId>, owner: &UserEmail, fields: &ApplicationFields) -> Self {
        Self {
            id: id.map(|id| id.as_str().to_string()),
            user_email: owner.as_str().to_string(),
            company: fields.company.clone(),
            position: fields.position.clone(),
            applied_date: fields.applied_date.format("%Y-%m-%d").to_string(),
            status: fields.status.as_str().to_string(),
        }
    }
}

impl From<&Draft> for JobPayload {
    fn from(draft: &Draft) -> Self {
        Self::from_parts(None, &draft.owner, &draft.fields)
    }
}

impl From<&Persisted> for JobPayload {
    fn from(record: &Persisted) -> Self {
        Self::from_parts(Some(record.id()), &record.owner, &record.fields)
    }
}

/// One application as returned by `/getJobs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    /// Accepted as `id` or `_id`, string or number
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub company: String,
    pub position: String,
    /// `YYYY-MM-DD`, optionally followed by a time part
    pub applied_date: String,
    pub status: String,
}

impl JobRow {
    /// Convert into a domain record owned by `owner`.
    pub fn into_persisted(self, owner: &UserEmail) -> Result<Persisted> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ClientError::ParseError(
                "application without identifier".to_string(),
            ));
        }

        let raw_date = self.applied_date.trim();
        let date_part = raw_date
            .get(..10)
            .filter(|prefix| raw_date.len() > 10 && prefix.contains('-'))
            .unwrap_or(raw_date);
        let applied_date = parse_applied_date(date_part)
            .map_err(|e| ClientError::ParseError(format!("application {id}: {e}")))?;

        Ok(Persisted::new(
            RecordId::new(id),
            owner.clone(),
            ApplicationFields {
                company: self.company,
                position: self.position,
                applied_date,
                status: ApplicationStatus::parse(&self.status),
            },
        ))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

// =============================================================================
// Response Tokens
// =============================================================================

/// Success token of `/register`, `/login` and `/addJob`
pub(crate) const TOKEN_SUCCESS: &str = "success";
/// Rejection token of `/register`
pub(crate) const TOKEN_EMAIL_EXISTS: &str = "email_exists";
/// Tokens `/login` answers for wrong credentials
pub(crate) const LOGIN_REJECTION_TOKENS: [&str; 4] =
    ["invalid_credentials", "invalid", "fail", "failure"];
/// Alternate success token of `/updateStatus`
pub(crate) const TOKEN_UPDATED: &str = "updated";
/// Alternate success token of `/deleteJob`
pub(crate) const TOKEN_DELETED: &str = "deleted";

/// Reduce a plain-text or JSON-string body to its bare token.
pub(crate) fn response_token(body: &str) -> &str {
    let trimmed = body.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn owner() -> UserEmail {
        UserEmail::parse("a@b.com").unwrap()
    }

    #[test]
    fn test_response_token_strips_quotes_and_whitespace() {
        assert_eq!(response_token("success"), "success");
        assert_eq!(response_token("\"success\"\n"), "success");
        assert_eq!(response_token("  updated "), "updated");
        assert_eq!(response_token("\"unterminated"), "\"unterminated");
    }

    #[test]
    fn test_payload_for_draft_omits_id() {
        let draft = Draft::new(
            owner(),
            ApplicationFields {
                company: "Acme".into(),
                position: "Engineer".into(),
                applied_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                status: ApplicationStatus::Applied,
            },
        );

        let json = serde_json::to_value(JobPayload::from(&draft)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userEmail": "a@b.com",
                "company": "Acme",
                "position": "Engineer",
                "appliedDate": "2024-01-10",
                "status": "Applied"
            })
        );
    }

    #[test]
    fn test_row_accepts_underscore_id_and_datetime() {
        let row: JobRow = serde_json::from_value(serde_json::json!({
            "_id": "65a1f0",
            "userEmail": "a@b.com",
            "company": "Acme",
            "position": "Engineer",
            "appliedDate": "2024-01-10T00:00:00.000Z",
            "status": "Interview"
        }))
        .unwrap();

        let record = row.into_persisted(&owner()).unwrap();
        assert_eq!(record.id().as_str(), "65a1f0");
        assert_eq!(
            record.fields.applied_date,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert_eq!(record.fields.status, ApplicationStatus::Interview);
    }

    #[test]
    fn test_row_accepts_numeric_id_and_legacy_date() {
        let row: JobRow = serde_json::from_value(serde_json::json!({
            "id": 7,
            "company": "Acme",
            "position": "Engineer",
            "appliedDate": "10/01/2024",
            "status": "Offer Letter"
        }))
        .unwrap();

        let record = row.into_persisted(&owner()).unwrap();
        assert_eq!(record.id().as_str(), "7");
        assert_eq!(record.fields.status, ApplicationStatus::Offer);
        assert_eq!(record.owner, owner());
    }

    #[test]
    fn test_row_keeps_unknown_status() {
        let row: JobRow = serde_json::from_value(serde_json::json!({
            "id": "1",
            "company": "Acme",
            "position": "Engineer",
            "appliedDate": "2024-01-10",
            "status": "Ghosted"
        }))
        .unwrap();

        let record = row.into_persisted(&owner()).unwrap();
        assert_eq!(record.fields.status, ApplicationStatus::Other("Ghosted".into()));
    }

    #[test]
    fn test_row_with_bad_date_is_parse_error() {
        let row: JobRow = serde_json::from_value(serde_json::json!({
            "id": "1",
            "company": "Acme",
            "position": "Engineer",
            "appliedDate": "someday",
            "status": "Applied"
        }))
        .unwrap();

        assert!(matches!(
            row.into_persisted(&owner()),
            Err(ClientError::ParseError(_))
        ));
    }
}
