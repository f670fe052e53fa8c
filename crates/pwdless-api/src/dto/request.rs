//! Request bodies.
//!
//! Field contents are checked by the session manager so that malformed
//! input yields the same authentication errors as unknown input.

use serde::{Deserialize, Serialize};

/// `POST /login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address to send the login token to.
    pub email: String,
}

/// `POST /token` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    /// The emailed login token.
    pub token: String,
}
