//! Session state for the current user.
//!
//! This module provides:
//! - `Session`: token and user profile committed together by a login
//! - `SessionStore`: the shared, explicitly constructed state container
//!
//! Sessions live in memory only; nothing is written to disk.

pub mod session;

pub use session::{Session, SessionStore};
