//! List Comments Query

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::id::{ArticleId, UserId};
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::dto::CommentView;
use crate::application::{author_names, name_of};
use crate::domain::repository::{ArticleRepository, CommentRepository, UserRepository};
use crate::error::BlogError;

/// Comments on one article, oldest first
pub struct GetCommentsByArticle {
    pub article_id: Uuid,
}

impl Request for GetCommentsByArticle {
    type Response = Vec<CommentView>;
    const NAME: &'static str = "GetCommentsByArticle";
    const RULES: &'static [FieldRule<Self>] = &[FieldRule::new("ArticleId", |r: &Self| {
        require_id("ArticleId", "Article id", &r.article_id).map(drop)
    })];
}

pub struct ListCommentsHandler<U, A, C> {
    users: Arc<U>,
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<U, A, C> ListCommentsHandler<U, A, C>
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

impl<U, A, C> Handler<GetCommentsByArticle> for ListCommentsHandler<U, A, C>
where
    U: UserRepository + Send + Sync,
    A: ArticleRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
{
    async fn handle(&self, request: GetCommentsByArticle) -> Outcome<Vec<CommentView>> {
        let article_id = ArticleId::from_uuid(request.article_id);

        if self.articles.find_by_id(&article_id).await?.is_none() {
            return Err(BlogError::ArticleNotFound.into());
        }

        let comments = self.comments.list_by_article(&article_id).await?;
        let authors: Vec<UserId> = comments.iter().map(|c| c.author_id).collect();
        let names = author_names(&*self.users, &authors).await?;

        Ok(comments
            .iter()
            .map(|comment| CommentView::new(comment, name_of(&names, &comment.author_id)))
            .collect())
    }
}
