//! Infrastructure Layer
//!
//! Repository and token service implementations.

pub mod memory;
pub mod token;

pub use memory::InMemoryStore;
pub use token::HmacTokenService;
