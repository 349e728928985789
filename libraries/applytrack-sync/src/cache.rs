//! In-memory projection of the remote application list.

use applytrack_core::{
    ApplicationFields, Persisted, RemoteAuthority, Result, StatusSummary, UserEmail,
};
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Snapshot {
    owner: Option<UserEmail>,
    records: Vec<Persisted>,
}

/// Ordered cache of one user's applications.
///
/// Contents are only ever replaced wholesale from the remote authority.
/// The write lock is held just long enough to swap the snapshot, so
/// readers see either the previous list or the new one.
#[derive(Debug, Default)]
pub struct RecordCache {
    snapshot: RwLock<Snapshot>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full list for `owner` and replace the cache with it.
    ///
    /// On failure the cache is emptied and the error returned.
    pub async fn refresh(
        &self,
        authority: &dyn RemoteAuthority,
        owner: &UserEmail,
    ) -> Result<Vec<Persisted>> {
        debug!(owner = %owner, "Refreshing application cache");

        match authority.list_applications(owner).await {
            Ok(records) => {
                let mut snapshot = self.snapshot.write().await;
                snapshot.owner = Some(owner.clone());
                snapshot.records.clone_from(&records);
                debug!(owner = %owner, count = records.len(), "Application cache replaced");
                Ok(records)
            }
            Err(e) => {
                warn!(owner = %owner, error = %e, "Refresh failed, discarding cache");
                self.clear().await;
                Err(e)
            }
        }
    }

    /// Records as of the last successful refresh.
    pub async fn current_records(&self) -> Vec<Persisted> {
        self.snapshot.read().await.records.clone()
    }

    /// Identity the cached records belong to, if any.
    pub async fn owner(&self) -> Option<UserEmail> {
        self.snapshot.read().await.owner.clone()
    }

    /// Discard every cached record.
    pub async fn clear(&self) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.owner = None;
        snapshot.records.clear();
    }

    /// Find a cached record of `owner` with the same company and position.
    ///
    /// Comparison ignores case and surrounding whitespace.
    pub async fn find_duplicate(
        &self,
        owner: &UserEmail,
        fields: &ApplicationFields,
    ) -> Option<Persisted> {
        let snapshot = self.snapshot.read().await;
        if snapshot.owner.as_ref() != Some(owner) {
            return None;
        }

        snapshot
            .records
            .iter()
            .find(|record| {
                same_text(&record.fields.company, &fields.company)
                    && same_text(&record.fields.position, &fields.position)
            })
            .cloned()
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Count records per status in a single pass.
pub fn derive_summary(records: &[Persisted]) -> StatusSummary {
    records.iter().map(|record| &record.fields.status).collect()
}
