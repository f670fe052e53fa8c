//! Authentication error taxonomy.
//!
//! Every failure that can reach a client is one of these variants. The
//! messages are deliberately coarse: callers must not be able to tell
//! which individual check rejected them.

use thiserror::Error;

use pwdless_core::error::{AppError, ErrorKind};

/// Errors raised by the authentication flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The supplied email address is syntactically invalid.
    #[error("invalid email address")]
    InvalidLogin,
    /// No account exists for the email or id.
    #[error("email not registered")]
    UnknownLogin,
    /// The account exists but may not authenticate.
    #[error("login for account disabled")]
    LoginDisabled,
    /// The login token is malformed, unknown, expired or already used.
    #[error("invalid or expired login token")]
    LoginToken,
    /// Bad signature, wrong algorithm, or missing bearer token.
    #[error("token unauthorized")]
    TokenUnauthorized,
    /// The signed token or its refresh record has expired.
    #[error("token expired")]
    TokenExpired,
    /// Access token claims are missing or mistyped.
    #[error("invalid access token")]
    InvalidAccessToken,
    /// Refresh token claims are missing or mistyped.
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    /// The caller lacks a required role.
    #[error("insufficient role")]
    Forbidden,
    /// A store or signing failure.
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl AuthError {
    /// The error category used when rendering this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Internal(err) => err.kind,
            Self::Forbidden => ErrorKind::Forbidden,
            _ => ErrorKind::Unauthorized,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Internal(inner) => inner,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
