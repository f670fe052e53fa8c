//! Signed access and refresh tokens.

pub mod auth;
pub mod claims;

pub use auth::{TokenAuth, TokenPair};
pub use claims::{AccessClaims, RefreshClaims};
