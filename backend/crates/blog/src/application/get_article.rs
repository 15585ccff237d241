//! Get Article Use Case
//!
//! Returns the full article with its comments, oldest first. Authors that
//! no longer exist are shown as `[deleted]`.

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::id::{ArticleId, UserId};
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::dto::{ArticleDetails, CommentView};
use crate::application::{author_names, name_of};
use crate::domain::repository::{ArticleRepository, CommentRepository, UserRepository};
use crate::error::BlogError;

pub struct GetArticleById {
    pub id: Uuid,
}

impl Request for GetArticleById {
    type Response = ArticleDetails;
    const NAME: &'static str = "GetArticleById";
    const RULES: &'static [FieldRule<Self>] = &[FieldRule::new("ArticleId", |r: &Self| {
        require_id("ArticleId", "Article id", &r.id).map(drop)
    })];
}

pub struct GetArticleHandler<U, A, C> {
    users: Arc<U>,
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<U, A, C> GetArticleHandler<U, A, C>
where
    U: UserRepository,
    A: ArticleRepository,
    C: CommentRepository,
{
    pub fn new(users: Arc<U>, articles: Arc<A>, comments: Arc<C>) -> Self {
        Self {
            users,
            articles,
            comments,
        }
    }
}

impl<U, A, C> Handler<GetArticleById> for GetArticleHandler<U, A, C>
where
    U: UserRepository + Send + Sync,
    A: ArticleRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
{
    async fn handle(&self, request: GetArticleById) -> Outcome<ArticleDetails> {
        let id = ArticleId::from_uuid(request.id);

        let article = self
            .articles
            .find_by_id(&id)
            .await?
            .ok_or(BlogError::ArticleNotFound)?;
        let comments = self.comments.list_by_article(&id).await?;

        let authors: Vec<UserId> = std::iter::once(article.author_id)
            .chain(comments.iter().map(|comment| comment.author_id))
            .collect();
        let names = author_names(&*self.users, &authors).await?;

        Ok(ArticleDetails {
            id: article.id,
            title: article.title.to_string(),
            content: article.content.to_string(),
            author_id: article.author_id,
            author: name_of(&names, &article.author_id),
            published_at: article.published_at,
            updated_at: article.updated_at,
            comments: comments
                .iter()
                .map(|comment| CommentView::new(comment, name_of(&names, &comment.author_id)))
                .collect(),
        })
    }
}
