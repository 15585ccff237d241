//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Commands, queries and their handlers
//! - `infra/` - In-memory store and token service
//!
//! ## Features
//! - User registration, login and profile management
//! - Articles with paged listings and per-author listings
//! - Comments on articles
//! - Every request is validated as a whole before its handler runs, and
//!   all field errors are reported together
//!
//! ## Security Model
//! - Passwords stored as salted PBKDF2-HMAC-SHA256, compared in constant time
//! - Unknown usernames and wrong passwords are indistinguishable
//! - Access tokens are HMAC-SHA256 signed and carry the caller's role
//! - Ownership and admin checks read the token's role only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::BlogConfig;
pub use error::{BlogError, BlogResult};
pub use infra::{HmacTokenService, InMemoryStore};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    error_list::{ErrorList, Outcome},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::application::dto::*;
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
