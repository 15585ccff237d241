//! Article Entity

use chrono::{DateTime, Utc};
use kernel::id::{ArticleId, UserId};

use crate::domain::value_object::{ArticleContent, ArticleTitle};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub content: ArticleContent,
    pub author_id: UserId,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: ArticleTitle, content: ArticleContent, author_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: ArticleId::new(),
            title,
            content,
            author_id,
            published_at: now,
            updated_at: now,
        }
    }

    pub fn revise(&mut self, title: ArticleTitle, content: ArticleContent) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }
}
