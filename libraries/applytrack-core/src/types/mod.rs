mod application;
mod email;
mod ids;
mod summary;

pub use application::{ApplicationFields, ApplicationRecord, ApplicationStatus, Draft, Persisted};
pub use email::{Credentials, UserEmail};
pub use ids::RecordId;
pub use summary::StatusSummary;
