use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::api::{ApiError, AuthClient, Credentials, LoginResponse};

/// Token and user profile from one successful login.
///
/// Both fields only ever exist together, so a reader can never see a
/// token without its user or the other way round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session<U = Value> {
    pub token: String,
    pub user: U,
    pub established_at: DateTime<Utc>,
}

impl<U> Session<U> {
    fn from_response(response: LoginResponse<U>) -> Self {
        Self {
            token: response.token,
            user: response.user,
            established_at: Utc::now(),
        }
    }

    /// Value for an `Authorization` header on later requests
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Shared session state plus the `login` operation that fills it.
///
/// Clone is cheap and every clone observes the same state. The user
/// profile type `U` is opaque to the store; with the default
/// `serde_json::Value` it is kept exactly as the service sent it.
///
/// Overlapping `login` calls are not serialized. Each one commits its own
/// session when its response arrives, so the last to finish wins.
pub struct SessionStore<U = Value> {
    client: AuthClient,
    state: Arc<RwLock<Option<Session<U>>>>,
}

impl<U> Clone for SessionStore<U> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<U> SessionStore<U> {
    /// Create an unauthenticated store that logs in through `client`
    pub fn new(client: AuthClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Get the session token if logged in
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }

    /// `Bearer <token>` for callers that attach it to their own requests
    pub async fn bearer_header(&self) -> Option<String> {
        self.state.read().await.as_ref().map(Session::bearer_header)
    }
}

impl<U: Clone> SessionStore<U> {
    pub async fn user(&self) -> Option<U> {
        self.state.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Snapshot of token and user taken under a single read
    pub async fn session(&self) -> Option<Session<U>> {
        self.state.read().await.clone()
    }
}

impl<U: DeserializeOwned> SessionStore<U> {
    /// Exchange `email` and `password` for a session.
    ///
    /// Sends exactly one request. On success the previous session, if any,
    /// is replaced in a single write. On failure the error is returned as
    /// is and the current session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let credentials = Credentials::new(email, password);
        let response = self.client.login::<U>(&credentials).await?;

        let session = Session::from_response(response);
        *self.state.write().await = Some(session);

        info!(email, "Session established");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offline_store() -> SessionStore {
        let client = AuthClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
        SessionStore::new(client)
    }

    #[test]
    fn test_bearer_header() {
        let session = Session {
            token: "abc".to_string(),
            user: json!({"id": 1}),
            established_at: Utc::now(),
        };
        assert_eq!(session.bearer_header(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = offline_store();
        assert!(!store.is_authenticated().await);
        assert_eq!(store.token().await, None);
        assert_eq!(store.user().await, None);
        assert_eq!(store.bearer_header().await, None);
        assert!(store.session().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = offline_store();
        let other = store.clone();

        *store.state.write().await = Some(Session::from_response(LoginResponse {
            token: "T1".to_string(),
            user: json!({"id": 1}),
        }));

        assert!(other.is_authenticated().await);
        assert_eq!(other.token().await.as_deref(), Some("T1"));
        assert_eq!(other.bearer_header().await.as_deref(), Some("Bearer T1"));
    }
}
