//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, CommentId, UserId};

use crate::domain::value_object::CommentContent;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub content: CommentContent,
    pub author_id: UserId,
    pub published_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(article_id: ArticleId, content: CommentContent, author_id: UserId) -> Self {
        Self {
            id: CommentId::new(),
            article_id,
            content,
            author_id,
            published_at: Utc::now(),
        }
    }
}
