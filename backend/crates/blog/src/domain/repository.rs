//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use kernel::id::{ArticleId, UserId};

use crate::domain::entity::{article::Article, comment::Comment, user::User};
use crate::domain::value_object::{Email, PageRequest, Username};
use crate::error::BlogResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user.
    ///
    /// Username and email are unique constraints: a clash fails with
    /// `UsernameTaken` or `EmailTaken` atomically with the insert.
    async fn create(&self, user: &User) -> BlogResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> BlogResult<Option<User>>;

    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &Username) -> BlogResult<Option<User>>;

    /// Find user by email (ASCII case-insensitive)
    async fn find_by_email(&self, email: &Email) -> BlogResult<Option<User>>;

    /// All users, oldest first
    async fn list(&self) -> BlogResult<Vec<User>>;

    /// Update user; same unique constraints as `create`
    async fn update(&self, user: &User) -> BlogResult<()>;

    /// Delete user; returns whether it existed
    async fn delete(&self, user_id: &UserId) -> BlogResult<bool>;
}

/// Article repository trait
#[trait_variant::make(ArticleRepository: Send)]
pub trait LocalArticleRepository {
    async fn create(&self, article: &Article) -> BlogResult<()>;

    async fn find_by_id(&self, article_id: &ArticleId) -> BlogResult<Option<Article>>;

    /// One page, newest first, and the total count
    async fn page(&self, page: PageRequest) -> BlogResult<(Vec<Article>, usize)>;

    /// One page of a single author's articles, newest first, and their total
    async fn page_by_author(
        &self,
        author_id: &UserId,
        page: PageRequest,
    ) -> BlogResult<(Vec<Article>, usize)>;

    async fn update(&self, article: &Article) -> BlogResult<()>;

    /// Delete article and its comments; returns whether it existed
    async fn delete(&self, article_id: &ArticleId) -> BlogResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Fails with `ArticleNotFound` unless the article exists at insert time
    async fn create(&self, comment: &Comment) -> BlogResult<()>;

    /// Comments on an article, oldest first
    async fn list_by_article(&self, article_id: &ArticleId) -> BlogResult<Vec<Comment>>;
}
