//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{LoginRequest, TokenRequest};
pub use response::{AccountResponse, ReadinessResponse, TokenResponse};
