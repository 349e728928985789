//! Session-scoped facade over gateway, cache and mutator.

use crate::cache::{derive_summary, RecordCache};
use crate::gateway::CredentialGateway;
use crate::mutator::RecordMutator;
use applytrack_core::{
    ApplicationFields, ApplicationRecord, Persisted, RecordId, RemoteAuthority, Result,
    SessionStore, StatusSummary, UserEmail, ValidationError, ValidationPolicy,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};

/// Owns everything one user session needs.
///
/// There is no global state: the session store handle, the cache and the
/// remote client all live here, and `logout` is the single reset.
///
/// # Example
///
/// ```ignore
/// let tracker = JobTracker::new(authority, store, ValidationPolicy::default());
/// tracker.login("a@b.com", "secret1").await?;
/// tracker.create("Acme", "Engineer", "2024-01-10", "Applied").await?;
/// let summary = tracker.summary().await;
/// ```
pub struct JobTracker {
    authority: Arc<dyn RemoteAuthority>,
    store: Arc<dyn SessionStore>,
    cache: Arc<RecordCache>,
    gateway: CredentialGateway,
    mutator: RecordMutator,
    policy: ValidationPolicy,
}

impl JobTracker {
    pub fn new(
        authority: Arc<dyn RemoteAuthority>,
        store: Arc<dyn SessionStore>,
        policy: ValidationPolicy,
    ) -> Self {
        let cache = Arc::new(RecordCache::new());
        let gateway = CredentialGateway::new(
            Arc::clone(&authority),
            Arc::clone(&store),
            Arc::clone(&cache),
            policy,
        );
        let mutator = RecordMutator::new(Arc::clone(&authority), Arc::clone(&cache));

        Self {
            authority,
            store,
            cache,
            gateway,
            mutator,
            policy,
        }
    }

    // ===== Session =====

    /// Identity of the logged-in user, if any.
    pub async fn current_user(&self) -> Result<Option<UserEmail>> {
        self.store.current_user().await
    }

    /// Pick up a session persisted by an earlier run and load its records.
    pub async fn restore_session(&self) -> Result<Option<UserEmail>> {
        let Some(user) = self.store.current_user().await? else {
            debug!("No persisted session");
            return Ok(None);
        };

        info!(email = %user, "Restoring session");
        self.cache.refresh(self.authority.as_ref(), &user).await?;
        Ok(Some(user))
    }

    /// Identity of the logged-in user, or `NotLoggedIn`.
    pub async fn require_user(&self) -> Result<UserEmail> {
        self.store
            .current_user()
            .await?
            .ok_or_else(|| ValidationError::NotLoggedIn.into())
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<UserEmail> {
        self.gateway.register(email, password).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserEmail> {
        self.gateway.login(email, password).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.gateway.logout().await
    }

    // ===== Records =====

    /// Reload the logged-in user's records from the remote authority.
    pub async fn refresh(&self) -> Result<Vec<Persisted>> {
        let owner = self.require_user().await?;
        self.cache.refresh(self.authority.as_ref(), &owner).await
    }

    /// Records as of the last refresh.
    pub async fn records(&self) -> Vec<Persisted> {
        self.cache.current_records().await
    }

    /// Status counts over the cached records.
    pub async fn summary(&self) -> StatusSummary {
        derive_summary(&self.cache.current_records().await)
    }

    /// Record at 1-based position `n` of the cached listing.
    pub async fn record_at(&self, n: usize) -> Result<Persisted> {
        let records = self.cache.current_records().await;
        n.checked_sub(1)
            .and_then(|index| records.into_iter().nth(index))
            .ok_or_else(|| ValidationError::UnknownRecord(format!("#{n}")).into())
    }

    /// Cached record with identifier `id`.
    pub async fn find(&self, id: &RecordId) -> Result<Persisted> {
        self.cache
            .current_records()
            .await
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| ValidationError::UnknownRecord(id.to_string()).into())
    }

    /// Validate raw input and submit it as a new application.
    pub async fn create(
        &self,
        company: &str,
        position: &str,
        applied_date: &str,
        status: &str,
    ) -> Result<Vec<Persisted>> {
        let owner = self.require_user().await?;
        let fields = self.fields(company, position, applied_date, status)?;
        self.mutator.create(&owner, fields).await
    }

    /// Validate raw input and replace the fields of application `id`.
    pub async fn update(
        &self,
        id: &RecordId,
        company: &str,
        position: &str,
        applied_date: &str,
        status: &str,
    ) -> Result<Vec<Persisted>> {
        let owner = self.require_user().await?;
        let fields = self.fields(company, position, applied_date, status)?;
        self.mutator.update(&owner, id, fields).await
    }

    /// Remove application `id`.
    pub async fn delete(&self, id: &RecordId) -> Result<Vec<Persisted>> {
        let owner = self.require_user().await?;
        self.mutator.delete(&owner, id).await
    }

    /// Create or update an already typed record.
    ///
    /// The record must belong to the logged-in user.
    pub async fn save(&self, record: ApplicationRecord) -> Result<Vec<Persisted>> {
        let owner = self.require_user().await?;
        if record.owner() != &owner {
            return Err(ValidationError::ForeignOwner(record.owner().to_string()).into());
        }
        self.policy.check_fields(record.fields(), today())?;
        self.mutator.save(record).await
    }

    fn fields(
        &self,
        company: &str,
        position: &str,
        applied_date: &str,
        status: &str,
    ) -> Result<ApplicationFields> {
        Ok(self
            .policy
            .fields(company, position, applied_date, status, today())?)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
