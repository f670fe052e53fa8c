//! Session lifecycle: refresh record stores, the login/exchange/refresh/
//! logout orchestrator, and the expired record sweep.

pub mod cleanup;
pub mod device;
pub mod input;
pub mod manager;
pub mod memory;
pub mod store;

pub use cleanup::SessionCleanup;
pub use device::DeviceInfo;
pub use manager::SessionManager;
pub use memory::{MemoryAccountStore, MemoryRefreshTokenStore};
pub use store::{AccountStore, RefreshTokenStore};
