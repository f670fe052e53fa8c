//! # pwdless-auth
//!
//! The authentication engine of the passwordless service.
//!
//! ## Modules
//!
//! - `login` — single-use, in-memory login tokens
//! - `jwt` — signed access/refresh token issuance and verification
//! - `session` — refresh record stores, the session orchestrator and purge
//! - `mail` — login token email content and asynchronous dispatch
//! - `rbac` — role capability checks on access claims
//! - `error` — the public authentication error taxonomy

pub mod error;
pub mod jwt;
pub mod login;
pub mod mail;
pub mod rbac;
pub mod session;

pub use error::AuthError;
pub use jwt::{AccessClaims, RefreshClaims, TokenAuth, TokenPair};
pub use login::{LoginToken, LoginTokenStore};
pub use mail::{LogMailer, LoginTokenContent, MailDispatcher, Mailer};
pub use rbac::require_role;
pub use session::{
    AccountStore, DeviceInfo, MemoryAccountStore, MemoryRefreshTokenStore, RefreshTokenStore,
    SessionCleanup, SessionManager,
};
