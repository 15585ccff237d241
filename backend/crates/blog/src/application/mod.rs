//! Application Layer
//!
//! One module per command or query. Each request type declares its field
//! rules through `kernel::validation::Request` and is served by a handler
//! meant to sit behind `kernel::validation::ValidationPipeline`. Handlers
//! re-parse their input into value objects, which cannot fail once the
//! pipeline has passed it, and then enforce the rules that need stored
//! state (existence, uniqueness, ownership).

use std::collections::HashMap;

use kernel::id::UserId;

use crate::application::dto::DELETED_AUTHOR;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::{BlogError, BlogResult};

pub mod config;
pub mod dto;
pub mod principal;
pub mod token;

pub mod create_article;
pub mod create_comment;
pub mod delete_article;
pub mod delete_user;
pub mod get_article;
pub mod get_user;
pub mod list_articles;
pub mod list_comments;
pub mod list_users;
pub mod login_user;
pub mod register_user;
pub mod update_article;
pub mod update_user;

// Re-exports
pub use config::{BlogConfig, ConfigError};
pub use principal::Principal;
pub use token::TokenService;

pub use create_article::{CreateArticle, CreateArticleHandler};
pub use create_comment::{CreateComment, CreateCommentHandler};
pub use delete_article::{DeleteArticle, DeleteArticleHandler};
pub use delete_user::{DeleteUser, DeleteUserHandler};
pub use get_article::{GetArticleById, GetArticleHandler};
pub use get_user::{GetUserById, GetUserHandler};
pub use list_articles::{GetArticlesByAuthor, GetPagedArticles, ListArticlesHandler};
pub use list_comments::{GetCommentsByArticle, ListCommentsHandler};
pub use list_users::{ListUsers, ListUsersHandler};
pub use login_user::{LoginUser, LoginUserHandler};
pub use register_user::{RegisterUser, RegisterUserHandler};
pub use update_article::{UpdateArticle, UpdateArticleHandler};
pub use update_user::{UpdateUser, UpdateUserHandler};

/// Fails when `username` or `email` belongs to a user other than `owner`.
///
/// Runs before hashing so a clash is reported early; the repository still
/// enforces both constraints when the row is written.
pub(crate) async fn ensure_unique<U: UserRepository>(
    users: &U,
    username: &Username,
    email: &Email,
    owner: Option<UserId>,
) -> BlogResult<()> {
    let taken_by_other = |found: Option<crate::domain::User>| {
        found.is_some_and(|user| Some(user.id) != owner)
    };

    if taken_by_other(users.find_by_username(username).await?) {
        return Err(BlogError::UsernameTaken);
    }
    if taken_by_other(users.find_by_email(email).await?) {
        return Err(BlogError::EmailTaken);
    }
    Ok(())
}

/// Full names keyed by user id; unknown ids map to [`DELETED_AUTHOR`]
pub(crate) async fn author_names<U: UserRepository>(
    users: &U,
    ids: &[UserId],
) -> BlogResult<HashMap<UserId, String>> {
    let mut names = HashMap::new();
    for &id in ids {
        if names.contains_key(&id) {
            continue;
        }
        let name = users
            .find_by_id(&id)
            .await?
            .map_or_else(|| DELETED_AUTHOR.to_string(), |user| user.full_name());
        names.insert(id, name);
    }
    Ok(names)
}

pub(crate) fn name_of(names: &HashMap<UserId, String>, id: &UserId) -> String {
    names
        .get(id)
        .cloned()
        .unwrap_or_else(|| DELETED_AUTHOR.to_string())
}
