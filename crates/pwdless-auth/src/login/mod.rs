//! Single-use login tokens emailed to users.

pub mod store;

pub use store::{LoginToken, LoginTokenStore};
