//! Delete Article Use Case

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::id::ArticleId;
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::principal::Principal;
use crate::domain::repository::ArticleRepository;
use crate::error::BlogError;

/// Removes an article and its comments
pub struct DeleteArticle {
    pub principal: Principal,
    pub id: Uuid,
}

impl Request for DeleteArticle {
    type Response = ();
    const NAME: &'static str = "DeleteArticle";
    const RULES: &'static [FieldRule<Self>] = &[FieldRule::new("ArticleId", |r: &Self| {
        require_id("ArticleId", "Article id", &r.id).map(drop)
    })];
}

pub struct DeleteArticleHandler<A> {
    articles: Arc<A>,
}

impl<A: ArticleRepository> DeleteArticleHandler<A> {
    pub fn new(articles: Arc<A>) -> Self {
        Self { articles }
    }
}

impl<A> Handler<DeleteArticle> for DeleteArticleHandler<A>
where
    A: ArticleRepository + Send + Sync,
{
    async fn handle(&self, request: DeleteArticle) -> Outcome<()> {
        let id = ArticleId::from_uuid(request.id);
        let article = self
            .articles
            .find_by_id(&id)
            .await?
            .ok_or(BlogError::ArticleNotFound)?;

        request.principal.require_owner_or_admin(&article.author_id)?;

        if !self.articles.delete(&id).await? {
            return Err(BlogError::ArticleNotFound.into());
        }

        tracing::info!(
            article_id = %id,
            deleted_by = %request.principal.user_id,
            "Article deleted"
        );
        Ok(())
    }
}
