//! # pwdless-database
//!
//! PostgreSQL connection management and concrete repositories for
//! accounts and refresh tokens.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
