/// Job application domain types
use super::{RecordId, UserEmail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a job application.
///
/// Any status may move to any other by explicit user action. Values the
/// remote authority sends that match none of the named states are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Applied,
    Interview,
    Offer,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    /// Parse a status label, case-insensitively.
    ///
    /// "Offer Letter" is accepted as `Offer`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "applied" => Self::Applied,
            "interview" => Self::Interview,
            "offer" | "offer letter" => Self::Offer,
            "rejected" => Self::Rejected,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Wire label
    pub fn as_str(&self) -> &str {
        match self {
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_named(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-editable fields of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFields {
    pub company: String,
    pub position: String,
    pub applied_date: NaiveDate,
    pub status: ApplicationStatus,
}

/// Application not yet accepted by the remote authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub owner: UserEmail,
    pub fields: ApplicationFields,
}

impl Draft {
    pub fn new(owner: UserEmail, fields: ApplicationFields) -> Self {
        Self { owner, fields }
    }
}

/// Application as known to the remote authority.
///
/// The identifier is fixed for the lifetime of the record; updates replace
/// `fields` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    id: RecordId,
    pub owner: UserEmail,
    pub fields: ApplicationFields,
}

impl Persisted {
    pub fn new(id: RecordId, owner: UserEmail, fields: ApplicationFields) -> Self {
        Self { id, owner, fields }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Same record with replaced fields
    pub fn with_fields(&self, fields: ApplicationFields) -> Self {
        Self {
            id: self.id.clone(),
            owner: self.owner.clone(),
            fields,
        }
    }
}

/// An application record at either stage of its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationRecord {
    Draft(Draft),
    Persisted(Persisted),
}

impl ApplicationRecord {
    /// Identifier, present only once the remote authority assigned one
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Draft(_) => None,
            Self::Persisted(record) => Some(record.id()),
        }
    }

    pub fn owner(&self) -> &UserEmail {
        match self {
            Self::Draft(draft) => &draft.owner,
            Self::Persisted(record) => &record.owner,
        }
    }

    pub fn fields(&self) -> &ApplicationFields {
        match self {
            Self::Draft(draft) => &draft.fields,
            Self::Persisted(record) => &record.fields,
        }
    }
}

impl From<Draft> for ApplicationRecord {
    fn from(draft: Draft) -> Self {
        Self::Draft(draft)
    }
}

impl From<Persisted> for ApplicationRecord {
    fn from(record: Persisted) -> Self {
        Self::Persisted(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ApplicationFields {
        ApplicationFields {
            company: "Acme".into(),
            position: "Engineer".into(),
            applied_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            status: ApplicationStatus::Applied,
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(ApplicationStatus::parse("interview"), ApplicationStatus::Interview);
        assert_eq!(ApplicationStatus::parse(" REJECTED "), ApplicationStatus::Rejected);
        assert_eq!(ApplicationStatus::parse("Offer Letter"), ApplicationStatus::Offer);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = ApplicationStatus::parse("Ghosted");
        assert_eq!(status, ApplicationStatus::Other("Ghosted".into()));
        assert_eq!(status.as_str(), "Ghosted");
        assert!(!status.is_named());
    }

    #[test]
    fn test_status_serde_uses_labels() {
        let json = serde_json::to_string(&ApplicationStatus::Offer).unwrap();
        assert_eq!(json, "\"Offer\"");
        let parsed: ApplicationStatus = serde_json::from_str("\"applied\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Applied);
    }

    #[test]
    fn test_draft_has_no_identifier() {
        let owner = UserEmail::parse("a@b.com").unwrap();
        let record = ApplicationRecord::from(Draft::new(owner, fields()));
        assert!(record.id().is_none());
    }

    #[test]
    fn test_with_fields_keeps_identity() {
        let owner = UserEmail::parse("a@b.com").unwrap();
        let record = Persisted::new(RecordId::new("42"), owner, fields());

        let mut changed = fields();
        changed.status = ApplicationStatus::Interview;
        let updated = record.with_fields(changed);

        assert_eq!(updated.id(), record.id());
        assert_eq!(updated.owner, record.owner);
        assert_eq!(updated.fields.status, ApplicationStatus::Interview);
        assert_eq!(ApplicationRecord::from(updated).id(), Some(&RecordId::new("42")));
    }
}
