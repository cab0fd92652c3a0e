//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token backed by a session.

pub mod auth;
