//! Role-based capability checks.

pub mod enforcer;

pub use enforcer::require_role;
