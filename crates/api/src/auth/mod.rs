//! Bearer-token authorization for the drink catalog.
//!
//! - [`jwt`] -- token verification (and issuance for tooling and tests).
//! - [`error`] -- the typed [`AuthError`] carrying its own status and message.
//!
//! Signing keys and the identity provider are outside this crate; tokens are
//! HS256 with a shared secret.

pub mod error;
pub mod jwt;

pub use error::AuthError;
