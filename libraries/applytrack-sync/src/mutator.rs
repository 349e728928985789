//! Create, update and delete round trips.

use crate::cache::RecordCache;
use applytrack_core::{
    ApplicationFields, ApplicationRecord, Draft, Persisted, RecordId, RemoteAuthority, Result,
    TrackerError, UserEmail, ValidationError,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Issues mutations against the remote authority and refreshes the cache
/// once each one is confirmed. The cache is never edited directly.
pub struct RecordMutator {
    authority: Arc<dyn RemoteAuthority>,
    cache: Arc<RecordCache>,
}

impl RecordMutator {
    pub fn new(authority: Arc<dyn RemoteAuthority>, cache: Arc<RecordCache>) -> Self {
        Self { authority, cache }
    }

    /// Submit a new application for `owner`.
    ///
    /// Rejected locally when the cache already holds the same company and
    /// position for this owner.
    pub async fn create(
        &self,
        owner: &UserEmail,
        fields: ApplicationFields,
    ) -> Result<Vec<Persisted>> {
        if self.cache.find_duplicate(owner, &fields).await.is_some() {
            warn!(owner = %owner, company = %fields.company, "Duplicate application refused");
            return Err(ValidationError::Duplicate {
                company: fields.company,
                position: fields.position,
            }
            .into());
        }

        let draft = Draft::new(owner.clone(), fields);
        self.authority.create_application(&draft).await?;
        info!(owner = %owner, company = %draft.fields.company, "Application created");

        self.refresh_after(owner).await
    }

    /// Replace every field of the application `id`.
    pub async fn update(
        &self,
        owner: &UserEmail,
        id: &RecordId,
        fields: ApplicationFields,
    ) -> Result<Vec<Persisted>> {
        let record = Persisted::new(id.clone(), owner.clone(), fields);
        self.authority.update_application(&record).await?;
        info!(owner = %owner, id = %id, status = %record.fields.status, "Application updated");

        self.refresh_after(owner).await
    }

    /// Remove the application `id`.
    pub async fn delete(&self, owner: &UserEmail, id: &RecordId) -> Result<Vec<Persisted>> {
        self.authority.delete_application(id).await?;
        info!(owner = %owner, id = %id, "Application deleted");

        self.refresh_after(owner).await
    }

    /// Create a draft or update a persisted record.
    pub async fn save(&self, record: ApplicationRecord) -> Result<Vec<Persisted>> {
        match record {
            ApplicationRecord::Draft(draft) => self.create(&draft.owner, draft.fields).await,
            ApplicationRecord::Persisted(persisted) => {
                self.update(&persisted.owner, persisted.id(), persisted.fields.clone())
                    .await
            }
        }
    }

    async fn refresh_after(&self, owner: &UserEmail) -> Result<Vec<Persisted>> {
        debug!(owner = %owner, "Reloading after confirmed change");
        self.cache
            .refresh(self.authority.as_ref(), owner)
            .await
            .map_err(|e| TrackerError::StaleAfterMutation {
                source: Box::new(e),
            })
    }
}
