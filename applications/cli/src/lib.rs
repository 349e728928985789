//! ApplyTrack CLI
//!
//! Command-line stand-in for a presentation layer: parses commands, wires
//! the tracker to the configured server and session database, and renders
//! outcomes as text.

pub mod cli;
pub mod config;
pub mod error;
pub mod reference;
pub mod render;

// Re-export commonly used types for convenience
pub use cli::{execute, Cli, Command};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use reference::RecordRef;

use applytrack_client::ApplyTrackClient;
use applytrack_sync::JobTracker;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build a tracker backed by the configured server and session database.
pub async fn build_tracker(config: &AppConfig) -> Result<JobTracker> {
    let client = ApplyTrackClient::new(config.server_config())?;

    ensure_database_dir(&config.storage.database_url)?;
    let store = applytrack_storage::open_session_store(&config.storage.database_url).await?;

    info!(server = %client.url(), "Tracker ready");

    Ok(JobTracker::new(
        Arc::new(client),
        Arc::new(store),
        config.validation_policy(),
    ))
}

/// Create the parent directory of a file-backed `sqlite://` URL.
fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
