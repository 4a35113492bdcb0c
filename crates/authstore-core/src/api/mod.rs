//! HTTP client module for the remote authentication service.
//!
//! This module provides the `AuthClient`, which exchanges an email and
//! password for a token and user profile via `POST {base_url}/login`.
//! The login call is the one that establishes authentication, so no
//! bearer token is sent with it.

pub mod client;
pub mod error;

pub use client::{AuthClient, Credentials, LoginResponse};
pub use error::ApiError;
