//! Client-side authentication session store.
//!
//! A `SessionStore` starts out unauthenticated. `login` sends the email and
//! password to the authentication service and, when it answers with a
//! token and user profile, commits both as one `Session`. A failed login
//! leaves whatever session was there before.
//!
//! ```no_run
//! use authstore_core::{AuthClient, Config, SessionStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let store: SessionStore = SessionStore::new(AuthClient::new(&config)?);
//! store.login("a@b.com", "pw").await?;
//! let header = store.bearer_header().await;
//! # let _ = header;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;

pub use api::{ApiError, AuthClient, Credentials, LoginResponse};
pub use auth::{Session, SessionStore};
pub use config::Config;
