//! Session persistence
//!
//! Key-value pairs in the `session_state` table. The logged-in identity is
//! stored under [`KEY_CURRENT_USER`].

use crate::error::{Result, StorageError};
use applytrack_core::{SessionStore, TrackerError, UserEmail};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

/// Key holding the logged-in user's email
pub const KEY_CURRENT_USER: &str = "currentUser";

/// Get a stored value
///
/// Returns `Ok(None)` if the key is not set
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM session_state WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get::<String, _>("value")))
}

/// Set a value, replacing any previous one
pub async fn set_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO session_state (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a value. Removing a missing key is not an error.
///
/// Returns whether a value was present
pub async fn remove_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM session_state WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Session store backed by the local `SQLite` database
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_user(&self) -> Result<Option<UserEmail>> {
        match get_value(&self.pool, KEY_CURRENT_USER).await? {
            Some(raw) => UserEmail::parse(&raw)
                .map(Some)
                .map_err(|e| StorageError::corrupt(KEY_CURRENT_USER, e.to_string())),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn current_user(&self) -> std::result::Result<Option<UserEmail>, TrackerError> {
        let user = self.load_user().await?;
        debug!(user = ?user.as_ref().map(UserEmail::as_str), "Loaded session");
        Ok(user)
    }

    async fn set_current_user(&self, user: &UserEmail) -> std::result::Result<(), TrackerError> {
        set_value(&self.pool, KEY_CURRENT_USER, user.as_str()).await?;
        info!(user = %user, "Session stored");
        Ok(())
    }

    async fn clear(&self) -> std::result::Result<(), TrackerError> {
        let existed = remove_value(&self.pool, KEY_CURRENT_USER).await?;
        info!(existed, "Session cleared");
        Ok(())
    }
}
