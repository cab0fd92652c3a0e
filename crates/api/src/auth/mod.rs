//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation, session token hashing.

pub mod jwt;
