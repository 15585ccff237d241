//! In-memory repositories
//!
//! One store implementing every repository trait, used by tests and local
//! tooling. Users are kept as rows holding the stored credential text and
//! rehydrated on every read, the way a database-backed repository would.
//! Locks are always taken in the order users, articles, comments.

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{article::Article, comment::Comment, user::User};
use crate::domain::repository::{ArticleRepository, CommentRepository, UserRepository};
use crate::domain::value_object::{
    Email, FirstName, LastName, PageRequest, UserPassword, UserRole, Username,
};
use crate::error::{BlogError, BlogResult};

/// Stored form of a user
#[derive(Debug, Clone)]
struct UserRow {
    id: UserId,
    first_name: FirstName,
    last_name: LastName,
    username: Username,
    email: Email,
    password_hash: String,
    role: UserRole,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn from_entity(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password.as_stored().to_string(),
            role: user.role,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    fn to_entity(&self) -> BlogResult<User> {
        Ok(User {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            password: UserPassword::from_stored(self.password_hash.as_str())?,
            role: self.role,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<UserRow>>,
    articles: RwLock<Vec<Article>>,
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a stored credential verbatim, bypassing every check
    #[cfg(test)]
    pub(crate) async fn overwrite_credential(&self, user_id: &UserId, stored: &str) {
        if let Some(row) = self.users.write().await.iter_mut().find(|r| r.id == *user_id) {
            row.password_hash = stored.to_string();
        }
    }
}

fn page_of<'a>(
    articles: impl DoubleEndedIterator<Item = &'a Article>,
    page: PageRequest,
) -> Vec<Article> {
    articles
        .rev()
        .skip(page.offset())
        .take(page.size() as usize)
        .cloned()
        .collect()
}

/// Unique constraints on username and email, checked under the write lock.
/// The row being replaced, if any, is skipped.
fn check_unique(rows: &[UserRow], user: &User) -> BlogResult<()> {
    let others = || rows.iter().filter(|r| r.id != user.id);
    if others().any(|r| r.username == user.username) {
        return Err(BlogError::UsernameTaken);
    }
    if others().any(|r| r.email.matches(&user.email)) {
        return Err(BlogError::EmailTaken);
    }
    Ok(())
}

impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> BlogResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|r| r.id == user.id) {
            return Err(BlogError::Storage(format!("duplicate user id {}", user.id)));
        }
        check_unique(&users, user)?;
        users.push(UserRow::from_entity(user));
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> BlogResult<Option<User>> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|r| r.id == *user_id)
            .map(UserRow::to_entity)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> BlogResult<Option<User>> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|r| r.username == *username)
            .map(UserRow::to_entity)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> BlogResult<Option<User>> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|r| r.email.matches(email))
            .map(UserRow::to_entity)
            .transpose()
    }

    async fn list(&self) -> BlogResult<Vec<User>> {
        let users = self.users.read().await;
        users.iter().map(UserRow::to_entity).collect()
    }

    async fn update(&self, user: &User) -> BlogResult<()> {
        let mut users = self.users.write().await;
        check_unique(&users, user)?;
        let row = users
            .iter_mut()
            .find(|r| r.id == user.id)
            .ok_or(BlogError::UserNotFound)?;
        *row = UserRow::from_entity(user);
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> BlogResult<bool> {
        let mut users = self.users.write().await;
        let mut articles = self.articles.write().await;
        let mut comments = self.comments.write().await;

        let before = users.len();
        users.retain(|r| r.id != *user_id);
        if users.len() == before {
            return Ok(false);
        }

        let removed: Vec<ArticleId> = articles
            .iter()
            .filter(|a| a.author_id == *user_id)
            .map(|a| a.id)
            .collect();
        articles.retain(|a| a.author_id != *user_id);
        comments.retain(|c| c.author_id != *user_id && !removed.contains(&c.article_id));

        Ok(true)
    }
}

impl ArticleRepository for InMemoryStore {
    async fn create(&self, article: &Article) -> BlogResult<()> {
        self.articles.write().await.push(article.clone());
        Ok(())
    }

    async fn find_by_id(&self, article_id: &ArticleId) -> BlogResult<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.id == *article_id).cloned())
    }

    async fn page(&self, page: PageRequest) -> BlogResult<(Vec<Article>, usize)> {
        let articles = self.articles.read().await;
        Ok((page_of(articles.iter(), page), articles.len()))
    }

    async fn page_by_author(
        &self,
        author_id: &UserId,
        page: PageRequest,
    ) -> BlogResult<(Vec<Article>, usize)> {
        let articles = self.articles.read().await;
        let by_author: Vec<&Article> = articles
            .iter()
            .filter(|a| a.author_id == *author_id)
            .collect();
        let total = by_author.len();
        Ok((page_of(by_author.into_iter(), page), total))
    }

    async fn update(&self, article: &Article) -> BlogResult<()> {
        let mut articles = self.articles.write().await;
        let slot = articles
            .iter_mut()
            .find(|a| a.id == article.id)
            .ok_or(BlogError::ArticleNotFound)?;
        *slot = article.clone();
        Ok(())
    }

    async fn delete(&self, article_id: &ArticleId) -> BlogResult<bool> {
        let mut articles = self.articles.write().await;
        let mut comments = self.comments.write().await;

        let before = articles.len();
        articles.retain(|a| a.id != *article_id);
        comments.retain(|c| c.article_id != *article_id);
        Ok(articles.len() != before)
    }
}

impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: &Comment) -> BlogResult<()> {
        // Held across the insert so a concurrent delete cannot orphan it
        let articles = self.articles.read().await;
        if !articles.iter().any(|a| a.id == comment.article_id) {
            return Err(BlogError::ArticleNotFound);
        }
        self.comments.write().await.push(comment.clone());
        Ok(())
    }

    async fn list_by_article(&self, article_id: &ArticleId) -> BlogResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| c.article_id == *article_id)
            .cloned()
            .collect())
    }
}
