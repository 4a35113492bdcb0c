//! Client for the remote authentication service.
//!
//! `AuthClient` sends a single `POST /login` per call. It performs no
//! retries and keeps no state of its own; committing the result is the
//! session store's job.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::ApiError;

/// Path of the login endpoint, relative to the configured base URL
const LOGIN_PATH: &str = "/login";

/// Email and password for one login attempt. Borrowed, never stored.
#[derive(Clone, Copy, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> Credentials<'a> {
    pub fn new(email: &'a str, password: &'a str) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload. Fields beyond `token` and `user` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse<U> {
    pub token: String,
    pub user: U,
}

/// Client for the authentication service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    login_url: String,
}

impl AuthClient {
    /// Create a client for the service at `config.base_url`
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Reuse an existing reqwest client, sharing its connection pool
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            login_url: format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Exchange credentials for a token and user profile
    pub async fn login<U: DeserializeOwned>(
        &self,
        credentials: &Credentials<'_>,
    ) -> Result<LoginResponse<U>, ApiError> {
        debug!(url = %self.login_url, email = credentials.email, "Sending login request");

        let response = self
            .client
            .post(&self.login_url)
            .header(header::ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;

        Self::parse_login(&body)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "Login rejected by authentication service");
            Err(ApiError::from_status(status, &body))
        }
    }

    fn parse_login<U: DeserializeOwned>(body: &str) -> Result<LoginResponse<U>, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}
