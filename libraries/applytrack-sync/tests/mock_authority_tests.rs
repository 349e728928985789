//! Failure handling against a mocked remote authority.

use applytrack_core::{
    ApplicationFields, ApplicationStatus, Credentials, Draft, ErrorClass, Persisted, RecordId,
    RemoteAuthority, Result, SessionStore, TrackerError, UserEmail, ValidationPolicy,
};
use applytrack_storage::MemorySessionStore;
use applytrack_sync::{CredentialGateway, JobTracker, RecordCache, RecordMutator};
use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;

mock! {
    pub Authority {}

    #[async_trait]
    impl RemoteAuthority for Authority {
        async fn register(&self, credentials: &Credentials) -> Result<()>;
        async fn login(&self, credentials: &Credentials) -> Result<()>;
        async fn list_applications(&self, owner: &UserEmail) -> Result<Vec<Persisted>>;
        async fn create_application(&self, draft: &Draft) -> Result<()>;
        async fn update_application(&self, record: &Persisted) -> Result<()>;
        async fn delete_application(&self, id: &RecordId) -> Result<()>;
    }
}

fn owner() -> UserEmail {
    UserEmail::parse("a@b.com").unwrap()
}

fn fields(company: &str) -> ApplicationFields {
    ApplicationFields {
        company: company.into(),
        position: "Engineer".into(),
        applied_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        status: ApplicationStatus::Applied,
    }
}

fn persisted(id: &str, company: &str) -> Persisted {
    Persisted::new(RecordId::new(id), owner(), fields(company))
}

// =============================================================================
// Record Cache
// =============================================================================

#[tokio::test]
async fn test_refresh_replaces_wholesale() {
    let mut authority = MockAuthority::new();
    let mut seq = mockall::Sequence::new();
    authority
        .expect_list_applications()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![persisted("1", "Acme"), persisted("2", "Globex")]));
    authority
        .expect_list_applications()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![persisted("3", "Initech")]));

    let cache = RecordCache::new();
    cache.refresh(&authority, &owner()).await.unwrap();
    assert_eq!(cache.current_records().await.len(), 2);

    cache.refresh(&authority, &owner()).await.unwrap();
    let records = cache.current_records().await;
    assert_eq!(records, vec![persisted("3", "Initech")]);
    assert_eq!(cache.owner().await, Some(owner()));
}

#[tokio::test]
async fn test_refresh_failure_empties_cache() {
    let mut authority = MockAuthority::new();
    let mut seq = mockall::Sequence::new();
    authority
        .expect_list_applications()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![persisted("1", "Acme")]));
    authority
        .expect_list_applications()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(TrackerError::Unreachable("connection refused".into())));

    let cache = RecordCache::new();
    cache.refresh(&authority, &owner()).await.unwrap();

    let err = cache.refresh(&authority, &owner()).await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Transport);
    assert!(cache.current_records().await.is_empty());
    assert!(cache.owner().await.is_none());
}

// =============================================================================
// Credential Gateway
// =============================================================================

#[tokio::test]
async fn test_failed_login_keeps_existing_session() {
    let mut authority = MockAuthority::new();
    authority
        .expect_login()
        .times(1)
        .returning(|_| Err(TrackerError::InvalidCredentials));

    let store = Arc::new(MemorySessionStore::with_user(owner()));
    let gateway = CredentialGateway::new(
        Arc::new(authority),
        store.clone(),
        Arc::new(RecordCache::new()),
        ValidationPolicy::default(),
    );

    let err = gateway.login("c@d.com", "secret1").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Rejection);
    assert_eq!(store.current_user().await.unwrap(), Some(owner()));
}

#[tokio::test]
async fn test_register_does_not_start_session() {
    let mut authority = MockAuthority::new();
    authority
        .expect_register()
        .withf(|credentials| {
            credentials.email.as_str() == "a@b.com" && credentials.password == "secret1"
        })
        .times(1)
        .returning(|_| Ok(()));
    authority.expect_login().never();

    let store = Arc::new(MemorySessionStore::new());
    let gateway = CredentialGateway::new(
        Arc::new(authority),
        store.clone(),
        Arc::new(RecordCache::new()),
        ValidationPolicy::default(),
    );

    gateway.register("a@b.com", "secret1").await.unwrap();
    assert!(store.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_makes_no_remote_call() {
    let authority = MockAuthority::new();
    let store = Arc::new(MemorySessionStore::with_user(owner()));
    let gateway = CredentialGateway::new(
        Arc::new(authority),
        store.clone(),
        Arc::new(RecordCache::new()),
        ValidationPolicy::default(),
    );

    gateway.logout().await.unwrap();
    gateway.logout().await.unwrap();
    assert!(store.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_custom_password_policy() {
    let mut authority = MockAuthority::new();
    authority.expect_register().never();

    let gateway = CredentialGateway::new(
        Arc::new(authority),
        Arc::new(MemorySessionStore::new()),
        Arc::new(RecordCache::new()),
        ValidationPolicy {
            min_password_length: 10,
            reject_past_dates: false,
        },
    );

    let err = gateway.register("a@b.com", "secret1").await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Validation);
}

// =============================================================================
// Record Mutator
// =============================================================================

#[tokio::test]
async fn test_rejected_create_leaves_cache_untouched() {
    let mut authority = MockAuthority::new();
    authority
        .expect_list_applications()
        .times(1)
        .returning(|_| Ok(vec![persisted("1", "Acme")]));
    authority
        .expect_create_application()
        .times(1)
        .returning(|_| Err(TrackerError::unexpected("addJob", "error")));

    let authority = Arc::new(authority);
    let cache = Arc::new(RecordCache::new());
    cache.refresh(authority.as_ref(), &owner()).await.unwrap();

    let mutator = RecordMutator::new(authority, cache.clone());
    let err = mutator.create(&owner(), fields("Globex")).await.unwrap_err();

    assert!(matches!(err, TrackerError::UnexpectedResponse { .. }));
    assert_eq!(cache.current_records().await, vec![persisted("1", "Acme")]);
}

#[tokio::test]
async fn test_confirmed_change_with_failed_reload_is_stale() {
    let mut authority = MockAuthority::new();
    authority
        .expect_delete_application()
        .with(eq(RecordId::new("1")))
        .times(1)
        .returning(|_| Ok(()));
    authority
        .expect_list_applications()
        .times(1)
        .returning(|_| Err(TrackerError::Network("connection reset".into())));

    let cache = Arc::new(RecordCache::new());
    let mutator = RecordMutator::new(Arc::new(authority), cache.clone());

    let err = mutator.delete(&owner(), &RecordId::new("1")).await.unwrap_err();
    match &err {
        TrackerError::StaleAfterMutation { source } => {
            assert!(matches!(**source, TrackerError::Network(_)));
        }
        other => panic!("Expected StaleAfterMutation, got: {:?}", other),
    }
    assert_eq!(err.class(), ErrorClass::Transport);
    assert!(cache.current_records().await.is_empty());
}

#[tokio::test]
async fn test_update_sends_identifier_and_fields() {
    let mut authority = MockAuthority::new();
    authority
        .expect_update_application()
        .withf(|record| {
            record.id().as_str() == "1"
                && record.owner.as_str() == "a@b.com"
                && record.fields.status == ApplicationStatus::Interview
        })
        .times(1)
        .returning(|_| Ok(()));
    authority
        .expect_list_applications()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let mutator = RecordMutator::new(Arc::new(authority), Arc::new(RecordCache::new()));
    let mut changed = fields("Acme");
    changed.status = ApplicationStatus::Interview;

    mutator
        .update(&owner(), &RecordId::new("1"), changed)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_past_dates_rejected_when_configured() {
    let mut authority = MockAuthority::new();
    authority.expect_create_application().never();

    let tracker = JobTracker::new(
        Arc::new(authority),
        Arc::new(MemorySessionStore::with_user(owner())),
        ValidationPolicy {
            min_password_length: 6,
            reject_past_dates: true,
        },
    );

    let err = tracker
        .create("Acme", "Engineer", "2000-01-01", "Applied")
        .await
        .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Validation);
}
