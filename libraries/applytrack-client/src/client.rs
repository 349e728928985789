//! Main ApplyTrack server client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::jobs::JobsClient;
use crate::types::ServerConfig;
use applytrack_core::{Credentials, Draft, Persisted, RecordId, RemoteAuthority, UserEmail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Client for the remote authority.
///
/// Holds no session state: the logged-in identity lives in the session
/// store, and every request names the owner explicitly.
///
/// # Example
///
/// ```ignore
/// use applytrack_client::{ApplyTrackClient, ServerConfig};
///
/// let client = ApplyTrackClient::new(ServerConfig::new("http://localhost:5000"))?;
/// client.auth().login(&credentials).await?;
/// let records = client.jobs().list(&owner).await?;
/// ```
#[derive(Clone)]
pub struct ApplyTrackClient {
    http: Client,
    base_url: Url,
}

impl ApplyTrackClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim().trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("ApplyTrack/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(url = %base_url, "Client created");

        Ok(Self { http, base_url })
    }

    /// Get the server URL, without trailing slash.
    pub fn url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Account operations
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    /// Application operations
    pub fn jobs(&self) -> JobsClient<'_> {
        JobsClient::new(&self.http, &self.base_url)
    }
}

#[async_trait]
impl RemoteAuthority for ApplyTrackClient {
    async fn register(&self, credentials: &Credentials) -> applytrack_core::Result<()> {
        Ok(self.auth().register(credentials).await?)
    }

    async fn login(&self, credentials: &Credentials) -> applytrack_core::Result<()> {
        Ok(self.auth().login(credentials).await?)
    }

    async fn list_applications(&self, owner: &UserEmail) -> applytrack_core::Result<Vec<Persisted>> {
        Ok(self.jobs().list(owner).await?)
    }

    async fn create_application(&self, draft: &Draft) -> applytrack_core::Result<()> {
        Ok(self.jobs().add(draft).await?)
    }

    async fn update_application(&self, record: &Persisted) -> applytrack_core::Result<()> {
        Ok(self.jobs().update(record).await?)
    }

    async fn delete_application(&self, id: &RecordId) -> applytrack_core::Result<()> {
        Ok(self.jobs().delete(id).await?)
    }
}

/// Append path segments to the base URL, percent-encoding each one.
///
/// Any path prefix on the base URL (e.g. `/api`) is kept.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{base_url} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
