//! ApplyTrack Server Client
//!
//! HTTP client library for the remote authority that owns ApplyTrack
//! accounts and job applications.
//!
//! # Features
//!
//! - **Accounts**: register and log in with email/password
//! - **Applications**: list, create, update, and delete job applications
//! - **Outcome mapping**: success tokens, recognized rejections, and
//!   transport failures are kept apart
//!
//! # Example
//!
//! ```ignore
//! use applytrack_client::{ApplyTrackClient, ServerConfig};
//! use applytrack_core::{RemoteAuthority, UserEmail};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApplyTrackClient::new(ServerConfig::new("http://localhost:5000"))?;
//!
//!     let owner = UserEmail::parse("a@b.com")?;
//!     let applications = client.list_applications(&owner).await?;
//!     println!("Found {} applications", applications.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod jobs;
mod types;

// Re-export main types
pub use client::ApplyTrackClient;
pub use error::{ClientError, Result};
pub use types::{AuthRequest, JobPayload, JobRow, ServerConfig};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use jobs::JobsClient;
