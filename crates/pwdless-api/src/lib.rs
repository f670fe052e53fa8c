//! # pwdless-api
//!
//! HTTP API layer for the passwordless auth service built on Axum.
//!
//! Provides the login/token/refresh/logout endpoints, the access and
//! refresh bearer token extractors, the JSON error envelope and request
//! logging.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod readiness;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use readiness::ReadinessCheck;
pub use state::AppState;
