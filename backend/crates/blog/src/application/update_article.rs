//! Update Article Use Case

use std::sync::Arc;

use kernel::error::error_list::{Combine, Outcome};
use kernel::id::ArticleId;
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::principal::Principal;
use crate::domain::repository::ArticleRepository;
use crate::domain::value_object::{ArticleContent, ArticleTitle};
use crate::error::BlogError;

/// Replaces title and content; allowed for the author or an admin
pub struct UpdateArticle {
    pub principal: Principal,
    pub id: Uuid,
    pub title: String,
    pub content: String,
}

impl Request for UpdateArticle {
    type Response = ArticleId;
    const NAME: &'static str = "UpdateArticle";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("ArticleId", |r: &Self| {
            require_id("ArticleId", "Article id", &r.id).map(drop)
        }),
        FieldRule::new("Title", |r: &Self| ArticleTitle::parse(&r.title).map(drop)),
        FieldRule::new("Content", |r: &Self| ArticleContent::parse(&r.content).map(drop)),
    ];
}

pub struct UpdateArticleHandler<A> {
    articles: Arc<A>,
}

impl<A: ArticleRepository> UpdateArticleHandler<A> {
    pub fn new(articles: Arc<A>) -> Self {
        Self { articles }
    }
}

impl<A> Handler<UpdateArticle> for UpdateArticleHandler<A>
where
    A: ArticleRepository + Send + Sync,
{
    async fn handle(&self, request: UpdateArticle) -> Outcome<ArticleId> {
        let (title, content) = (
            ArticleTitle::parse(&request.title),
            ArticleContent::parse(&request.content),
        )
            .combine()?;

        let id = ArticleId::from_uuid(request.id);
        let mut article = self
            .articles
            .find_by_id(&id)
            .await?
            .ok_or(BlogError::ArticleNotFound)?;

        request.principal.require_owner_or_admin(&article.author_id)?;

        article.revise(title, content);
        self.articles.update(&article).await?;

        tracing::info!(
            article_id = %id,
            updated_by = %request.principal.user_id,
            "Article updated"
        );

        Ok(id)
    }
}
