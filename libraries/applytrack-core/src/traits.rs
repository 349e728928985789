/// Core traits for ApplyTrack
use crate::error::Result;
use crate::types::{Credentials, Draft, Persisted, RecordId, UserEmail};
use async_trait::async_trait;

/// Durable holder of the currently authenticated identity.
///
/// At most one identity is stored. It survives process restarts until
/// `clear` is called.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Identity of the logged-in user, if any
    async fn current_user(&self) -> Result<Option<UserEmail>>;

    /// Replace the stored identity
    async fn set_current_user(&self, user: &UserEmail) -> Result<()>;

    /// Forget the stored identity. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}

/// The external service of record for accounts and applications.
///
/// Implementations translate the service's responses into outcomes:
/// `Ok(())` only for a confirmed success, a rejection variant of
/// `TrackerError` for recognized refusals, and a transport variant for
/// everything else.
#[async_trait]
pub trait RemoteAuthority: Send + Sync {
    /// Create an account. Refusal for an existing account is `EmailExists`.
    async fn register(&self, credentials: &Credentials) -> Result<()>;

    /// Verify credentials. Refusal is `InvalidCredentials`.
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    /// Full list of applications owned by `owner`, in the authority's order
    async fn list_applications(&self, owner: &UserEmail) -> Result<Vec<Persisted>>;

    /// Submit a new application; the authority assigns its identifier
    async fn create_application(&self, draft: &Draft) -> Result<()>;

    /// Replace the fields of an existing application
    async fn update_application(&self, record: &Persisted) -> Result<()>;

    /// Remove an application by identifier
    async fn delete_application(&self, id: &RecordId) -> Result<()>;
}
