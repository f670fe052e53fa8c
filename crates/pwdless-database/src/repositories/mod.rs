//! Concrete repository implementations.

pub mod account;
pub mod token;

pub use account::AccountRepository;
pub use token::RefreshTokenRepository;
