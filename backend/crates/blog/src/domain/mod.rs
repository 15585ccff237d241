//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Article, Comment, User};
pub use repository::{ArticleRepository, CommentRepository, UserRepository};
