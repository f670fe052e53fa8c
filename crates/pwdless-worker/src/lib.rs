//! Background maintenance for the passwordless auth service.
//!
//! - A scheduler that runs periodic tasks on a fixed interval
//! - The refresh token purge job

pub mod jobs;
pub mod scheduler;

pub use jobs::PurgeJob;
pub use scheduler::PurgeScheduler;
