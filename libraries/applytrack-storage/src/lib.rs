//! ApplyTrack Storage
//!
//! Local `SQLite` persistence for the session identity.
//!
//! The remote authority owns accounts and applications; the only state kept
//! on this side is which user is logged in, stored under a fixed key so it
//! survives process restarts until logout.
//!
//! # Example
//!
//! ```rust,no_run
//! use applytrack_storage::{create_pool, run_migrations, SqliteSessionStore};
//! use applytrack_core::SessionStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://applytrack.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteSessionStore::new(pool);
//! let user = store.current_user().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
pub mod session;

pub use error::StorageError;
pub use memory::MemorySessionStore;
pub use session::SqliteSessionStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://applytrack.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(url = %database_url, "Creating session database pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    debug!("Session database pool ready");

    Ok(pool)
}

/// Open (creating if needed) and migrate the session database.
pub async fn open_session_store(database_url: &str) -> Result<SqliteSessionStore, StorageError> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(SqliteSessionStore::new(pool))
}
