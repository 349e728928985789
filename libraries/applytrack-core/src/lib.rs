//! ApplyTrack Core
//!
//! Platform-agnostic domain types, validation rules, traits, and error
//! handling shared by every ApplyTrack crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `UserEmail`, `RecordId`, `ApplicationStatus`, `Draft`, `Persisted`
//! - **Core Traits**: `SessionStore` (durable identity) and `RemoteAuthority` (service of record)
//! - **Error Handling**: Unified `TrackerError`, classified by `ErrorClass`
//!
//! # Example
//!
//! ```rust
//! use applytrack_core::types::{ApplicationFields, ApplicationStatus, Draft, UserEmail};
//! use chrono::NaiveDate;
//!
//! let owner = UserEmail::parse("a@b.com").unwrap();
//! let fields = ApplicationFields {
//!     company: "Acme".into(),
//!     position: "Engineer".into(),
//!     applied_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     status: ApplicationStatus::Applied,
//! };
//! let draft = Draft::new(owner, fields);
//! assert_eq!(draft.owner.as_str(), "a@b.com");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{ErrorClass, Result, TrackerError, ValidationError};
pub use traits::{RemoteAuthority, SessionStore};
pub use types::{
    ApplicationFields, ApplicationRecord, ApplicationStatus, Credentials, Draft, Persisted,
    RecordId, StatusSummary, UserEmail,
};
pub use validation::ValidationPolicy;
