//! Create Comment Use Case

use std::sync::Arc;

use kernel::error::error_list::{Combine, Outcome};
use kernel::id::{ArticleId, CommentId};
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::principal::Principal;
use crate::domain::entity::Comment;
use crate::domain::repository::{ArticleRepository, CommentRepository};
use crate::domain::value_object::CommentContent;
use crate::error::BlogError;

pub struct CreateComment {
    pub principal: Principal,
    pub article_id: Uuid,
    pub content: String,
}

impl Request for CreateComment {
    type Response = CommentId;
    const NAME: &'static str = "CreateComment";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("ArticleId", |r: &Self| {
            require_id("ArticleId", "Article id", &r.article_id).map(drop)
        }),
        FieldRule::new("Content", |r: &Self| CommentContent::parse(&r.content).map(drop)),
    ];
}

pub struct CreateCommentHandler<A, C> {
    articles: Arc<A>,
    comments: Arc<C>,
}

impl<A: ArticleRepository, C: CommentRepository> CreateCommentHandler<A, C> {
    pub fn new(articles: Arc<A>, comments: Arc<C>) -> Self {
        Self { articles, comments }
    }
}

impl<A, C> Handler<CreateComment> for CreateCommentHandler<A, C>
where
    A: ArticleRepository + Send + Sync,
    C: CommentRepository + Send + Sync,
{
    async fn handle(&self, request: CreateComment) -> Outcome<CommentId> {
        let (content,) = (CommentContent::parse(&request.content),).combine()?;
        let article_id = ArticleId::from_uuid(request.article_id);

        if self.articles.find_by_id(&article_id).await?.is_none() {
            return Err(BlogError::ArticleNotFound.into());
        }

        // The store re-checks the article on insert
        let comment = Comment::new(article_id, content, request.principal.user_id);
        self.comments.create(&comment).await?;

        tracing::info!(
            comment_id = %comment.id,
            article_id = %article_id,
            author_id = %comment.author_id,
            "Comment created"
        );

        Ok(comment.id)
    }
}
