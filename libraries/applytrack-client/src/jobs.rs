//! Job application endpoints of the remote authority.

use crate::error::{ClientError, Result};
use crate::types::{
    response_token, JobPayload, JobRow, TOKEN_DELETED, TOKEN_SUCCESS, TOKEN_UPDATED,
};
use applytrack_core::{Draft, Persisted, RecordId, UserEmail};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

/// Applications client for the remote authority.
pub struct JobsClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> JobsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Get every application owned by `owner`.
    pub async fn list(&self, owner: &UserEmail) -> Result<Vec<Persisted>> {
        let mut url = crate::client::endpoint(self.base_url, &["getJobs"])?;
        url.query_pairs_mut().append_pair("email", owner.as_str());
        debug!(url = %url, owner = %owner, "Fetching applications");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let rows: Vec<JobRow> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse applications: {}", e))
            })?;

            let records = rows
                .into_iter()
                .map(|row| row.into_persisted(owner))
                .collect::<Result<Vec<_>>>()?;

            debug!(count = records.len(), "Fetched applications");
            Ok(records)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Submit a new application.
    pub async fn add(&self, draft: &Draft) -> Result<()> {
        let url = crate::client::endpoint(self.base_url, &["addJob"])?;
        debug!(url = %url, company = %draft.fields.company, "Adding application");

        let response = self
            .http
            .post(url)
            .json(&JobPayload::from(draft))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        expect_tokens(response, "addJob", &[TOKEN_SUCCESS], None).await
    }

    /// Replace the fields of an existing application.
    pub async fn update(&self, record: &Persisted) -> Result<()> {
        let url = crate::client::endpoint(self.base_url, &["updateStatus"])?;
        debug!(url = %url, id = %record.id(), "Updating application");

        let response = self
            .http
            .put(url)
            .json(&JobPayload::from(record))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        expect_tokens(
            response,
            "updateStatus",
            &[TOKEN_UPDATED, TOKEN_SUCCESS],
            Some(record.id()),
        )
        .await
    }

    /// Remove an application.
    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        let url = crate::client::endpoint(self.base_url, &["deleteJob", id.as_str()])?;
        debug!(url = %url, id = %id, "Deleting application");

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        expect_tokens(
            response,
            "deleteJob",
            &[TOKEN_DELETED, TOKEN_SUCCESS],
            Some(id),
        )
        .await
    }
}

/// Accept a 2xx response whose body is one of `tokens`.
///
/// 404 on a record-addressed call is `RecordNotFound`, other error statuses
/// are `ServerError`, and any other body is `UnexpectedResponse`.
async fn expect_tokens(
    response: Response,
    operation: &'static str,
    tokens: &[&str],
    record: Option<&RecordId>,
) -> Result<()> {
    let status = response.status();
    let body = response.text().await.map_err(ClientError::from_send)?;

    if status.is_success() && tokens.contains(&response_token(&body)) {
        debug!(operation, "Remote change confirmed");
        return Ok(());
    }

    match record {
        Some(id) if status == StatusCode::NOT_FOUND => {
            warn!(operation, id = %id, "Application not found");
            Err(ClientError::RecordNotFound(id.clone()))
        }
        _ if status.is_client_error() || status.is_server_error() => {
            warn!(operation, status = %status, "Remote change failed");
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: body,
            })
        }
        _ => {
            warn!(operation, body = %body, "Remote change not confirmed");
            Err(ClientError::UnexpectedResponse { operation, body })
        }
    }
}
