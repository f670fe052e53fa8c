//! Request middleware and route guards.

pub mod logging;
pub mod rbac;
