//! ApplyTrack Sync
//!
//! Client-side reconciliation between the local record cache and the
//! remote authority:
//! - `CredentialGateway` registers, logs in and logs out
//! - `RecordCache` holds the last full list fetched for the session user
//! - `RecordMutator` performs confirmed round trips, then refreshes
//! - `JobTracker` bundles them for one session

mod cache;
mod gateway;
mod mutator;
mod tracker;

// Public exports
pub use cache::{derive_summary, RecordCache};
pub use gateway::CredentialGateway;
pub use mutator::RecordMutator;
pub use tracker::JobTracker;
