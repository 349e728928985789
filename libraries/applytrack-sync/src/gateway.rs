//! Registration, login and logout.

use crate::cache::RecordCache;
use applytrack_core::{RemoteAuthority, Result, SessionStore, UserEmail, ValidationPolicy};
use std::sync::Arc;
use tracing::{info, warn};

/// Delegates account checks to the remote authority and keeps the
/// session store in step with the outcome.
pub struct CredentialGateway {
    authority: Arc<dyn RemoteAuthority>,
    store: Arc<dyn SessionStore>,
    cache: Arc<RecordCache>,
    policy: ValidationPolicy,
}

impl CredentialGateway {
    pub fn new(
        authority: Arc<dyn RemoteAuthority>,
        store: Arc<dyn SessionStore>,
        cache: Arc<RecordCache>,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            authority,
            store,
            cache,
            policy,
        }
    }

    /// Create an account. The session is left untouched.
    pub async fn register(&self, email: &str, password: &str) -> Result<UserEmail> {
        let credentials = self.policy.registration(email, password)?;

        if let Err(e) = self.authority.register(&credentials).await {
            warn!(email = %credentials.email, error = %e, "Registration failed");
            return Err(e);
        }

        info!(email = %credentials.email, "Account registered");
        Ok(credentials.email)
    }

    /// Verify credentials and start a session for them.
    ///
    /// The cache is discarded on success. A failed login leaves the
    /// session and cache as they were.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserEmail> {
        let credentials = self.policy.login(email, password)?;

        if let Err(e) = self.authority.login(&credentials).await {
            warn!(email = %credentials.email, error = %e, "Login failed");
            return Err(e);
        }

        self.cache.clear().await;
        self.store.set_current_user(&credentials.email).await?;

        info!(email = %credentials.email, "Session started");
        Ok(credentials.email)
    }

    /// End the session and drop every cached record.
    ///
    /// Idempotent, and makes no remote call.
    pub async fn logout(&self) -> Result<()> {
        self.cache.clear().await;
        self.store.clear().await?;
        info!("Session ended");
        Ok(())
    }
}
