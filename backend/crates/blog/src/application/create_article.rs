//! Create Article Use Case

use std::sync::Arc;

use kernel::error::error_list::{Combine, Outcome};
use kernel::id::ArticleId;
use kernel::validation::{FieldRule, Handler, Request};

use crate::application::principal::Principal;
use crate::domain::entity::Article;
use crate::domain::repository::{ArticleRepository, UserRepository};
use crate::domain::value_object::{ArticleContent, ArticleTitle};
use crate::error::BlogError;

/// Publishes an article authored by the caller
pub struct CreateArticle {
    pub principal: Principal,
    pub title: String,
    pub content: String,
}

impl Request for CreateArticle {
    type Response = ArticleId;
    const NAME: &'static str = "CreateArticle";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("Title", |r: &Self| ArticleTitle::parse(&r.title).map(drop)),
        FieldRule::new("Content", |r: &Self| ArticleContent::parse(&r.content).map(drop)),
    ];
}

pub struct CreateArticleHandler<U, A> {
    users: Arc<U>,
    articles: Arc<A>,
}

impl<U: UserRepository, A: ArticleRepository> CreateArticleHandler<U, A> {
    pub fn new(users: Arc<U>, articles: Arc<A>) -> Self {
        Self { users, articles }
    }
}

impl<U, A> Handler<CreateArticle> for CreateArticleHandler<U, A>
where
    U: UserRepository + Send + Sync,
    A: ArticleRepository + Send + Sync,
{
    async fn handle(&self, request: CreateArticle) -> Outcome<ArticleId> {
        let (title, content) = (
            ArticleTitle::parse(&request.title),
            ArticleContent::parse(&request.content),
        )
            .combine()?;

        let author_id = request.principal.user_id;
        if self.users.find_by_id(&author_id).await?.is_none() {
            return Err(BlogError::UserNotFound.into());
        }

        let article = Article::new(title, content, author_id);
        self.articles.create(&article).await?;

        tracing::info!(article_id = %article.id, author_id = %author_id, "Article created");

        Ok(article.id)
    }
}
