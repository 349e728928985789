//! Account endpoints of the remote authority.

use crate::error::{ClientError, Result};
use crate::types::{
    response_token, AuthRequest, LOGIN_REJECTION_TOKENS, TOKEN_EMAIL_EXISTS, TOKEN_SUCCESS,
};
use applytrack_core::Credentials;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

/// Account client for the remote authority.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Create an account.
    ///
    /// `email_exists` maps to `ClientError::EmailExists`. Registration does
    /// not start a session.
    pub async fn register(&self, credentials: &Credentials) -> Result<()> {
        let url = crate::client::endpoint(self.base_url, &["register"])?;
        debug!(url = %url, email = %credentials.email, "Registering account");

        let response = self
            .http
            .post(url)
            .json(&AuthRequest::from(credentials))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_send)?;

        if status.is_server_error() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        match response_token(&body) {
            TOKEN_SUCCESS if status.is_success() => {
                info!(email = %credentials.email, "Registration successful");
                Ok(())
            }
            TOKEN_EMAIL_EXISTS => {
                warn!(email = %credentials.email, "Registration refused: account exists");
                Err(ClientError::EmailExists(credentials.email.to_string()))
            }
            _ if status.as_u16() == 409 => {
                warn!(email = %credentials.email, "Registration refused: conflict");
                Err(ClientError::EmailExists(credentials.email.to_string()))
            }
            _ => Err(ClientError::UnexpectedResponse {
                operation: "register",
                body,
            }),
        }
    }

    /// Verify credentials.
    ///
    /// Only 401/403 or a recognized rejection token count as wrong
    /// credentials. Other 4xx and 5xx answers are server errors, and any
    /// other body is an unexpected response.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let url = crate::client::endpoint(self.base_url, &["login"])?;
        debug!(url = %url, email = %credentials.email, "Attempting login");

        let response = self
            .http
            .post(url)
            .json(&AuthRequest::from(credentials))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_send)?;
        let token = response_token(&body);

        if matches!(status.as_u16(), 401 | 403) || is_login_rejection(token) {
            warn!(
                email = %credentials.email,
                status = %status,
                "Login failed: invalid credentials"
            );
            return Err(ClientError::InvalidCredentials);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: body,
            });
        }

        if status.is_success() && token == TOKEN_SUCCESS {
            info!(email = %credentials.email, "Login successful");
            Ok(())
        } else {
            warn!(status = %status, "Login answered with an unrecognized body");
            Err(ClientError::UnexpectedResponse {
                operation: "login",
                body,
            })
        }
    }
}

fn is_login_rejection(token: &str) -> bool {
    LOGIN_REJECTION_TOKENS
        .iter()
        .any(|rejection| token.eq_ignore_ascii_case(rejection))
}
