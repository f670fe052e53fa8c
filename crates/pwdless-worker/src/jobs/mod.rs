//! Built-in job implementations.

pub mod purge;

pub use purge::PurgeJob;
