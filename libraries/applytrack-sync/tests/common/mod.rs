//! Shared fixtures for sync integration tests.

#![allow(dead_code)]

use applytrack_core::{
    Credentials, Draft, Persisted, RecordId, RemoteAuthority, Result, TrackerError, UserEmail,
};
use applytrack_storage::MemorySessionStore;
use applytrack_sync::JobTracker;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory remote authority that behaves like a well-formed backend.
#[derive(Default)]
pub struct FakeAuthority {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    accounts: HashMap<String, String>,
    records: Vec<Persisted>,
    offline: bool,
}

impl FakeAuthority {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail as unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Records held for `owner`, in insertion order.
    pub fn stored(&self, owner: &UserEmail) -> Vec<Persisted> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect()
    }

    fn check_online(state: &FakeState) -> Result<()> {
        if state.offline {
            Err(TrackerError::Unreachable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteAuthority for FakeAuthority {
    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        let email = credentials.email.as_str().to_string();
        if state.accounts.contains_key(&email) {
            return Err(TrackerError::EmailExists(email));
        }
        state.accounts.insert(email, credentials.password.clone());
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        match state.accounts.get(credentials.email.as_str()) {
            Some(password) if *password == credentials.password => Ok(()),
            _ => Err(TrackerError::InvalidCredentials),
        }
    }

    async fn list_applications(&self, owner: &UserEmail) -> Result<Vec<Persisted>> {
        let state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        Ok(state
            .records
            .iter()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect())
    }

    async fn create_application(&self, draft: &Draft) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        let id = RecordId::new(Uuid::new_v4().to_string());
        state
            .records
            .push(Persisted::new(id, draft.owner.clone(), draft.fields.clone()));
        Ok(())
    }

    async fn update_application(&self, record: &Persisted) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        match state.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                existing.fields = record.fields.clone();
                Ok(())
            }
            None => Err(TrackerError::RecordNotFound(record.id().clone())),
        }
    }

    async fn delete_application(&self, id: &RecordId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check_online(&state)?;
        let before = state.records.len();
        state.records.retain(|r| r.id() != id);
        if state.records.len() == before {
            Err(TrackerError::RecordNotFound(id.clone()))
        } else {
            Ok(())
        }
    }
}

/// Tracker wired to a fresh fake authority and an in-memory session.
pub fn tracker() -> (JobTracker, Arc<FakeAuthority>, Arc<MemorySessionStore>) {
    let authority = FakeAuthority::new();
    let store = Arc::new(MemorySessionStore::new());
    let tracker = JobTracker::new(authority.clone(), store.clone(), Default::default());
    (tracker, authority, store)
}

/// Tracker with "a@b.com" registered and logged in.
pub async fn logged_in() -> (JobTracker, Arc<FakeAuthority>, Arc<MemorySessionStore>) {
    let (tracker, authority, store) = tracker();
    tracker.register("a@b.com", "secret1").await.unwrap();
    tracker.login("a@b.com", "secret1").await.unwrap();
    (tracker, authority, store)
}

pub fn email(raw: &str) -> UserEmail {
    UserEmail::parse(raw).unwrap()
}
