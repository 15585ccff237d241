//! Response shapes handed to the transport layer

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, CommentId, UserId};
use serde::Serialize;

use crate::domain::entity::{Article, Comment, User};
use crate::domain::value_object::UserRole;

/// Shown when an author no longer exists
pub const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            full_name: user.full_name(),
            username: user.username.to_string(),
            email: user.email.to_string(),
            role: user.role,
            active: user.active,
        }
    }
}

#[derive(Clone, Serialize)]
pub struct LoggedUser {
    pub id: UserId,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

impl fmt::Debug for LoggedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggedUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    pub author_id: UserId,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

impl CommentView {
    pub fn new(comment: &Comment, author: String) -> Self {
        Self {
            id: comment.id,
            content: comment.content.to_string(),
            author_id: comment.author_id,
            author,
            published_at: comment.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleDetails {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<CommentView>,
}

/// Listing entry; content is cut to an excerpt
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummary {
    pub id: ArticleId,
    pub title: String,
    pub excerpt: String,
    pub author_id: UserId,
    pub author: String,
    pub published_at: DateTime<Utc>,
}

impl ArticleSummary {
    pub fn new(article: &Article, author: String) -> Self {
        Self {
            id: article.id,
            title: article.title.to_string(),
            excerpt: article.content.excerpt(),
            author_id: article.author_id,
            author,
            published_at: article.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedArticles {
    pub total_count: usize,
    pub page_number: u32,
    pub page_size: u32,
    pub articles: Vec<ArticleSummary>,
}
