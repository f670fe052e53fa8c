//! # pwdless-entity
//!
//! Domain models persisted by the service.
//!
//! - `account` — an authenticating user and its eligibility
//! - `token` — a durable refresh token record, one per client session

pub mod account;
pub mod token;

pub use account::Account;
pub use token::RefreshToken;
