//! Article Listing Queries
//!
//! Both queries return newest-first pages of excerpts. The requested page
//! size is lowered to the configured maximum.

use std::sync::Arc;

use kernel::error::error_list::Outcome;
use kernel::id::UserId;
use kernel::validation::{FieldRule, Handler, Request, require_id};
use uuid::Uuid;

use crate::application::config::BlogConfig;
use crate::application::dto::{ArticleSummary, PagedArticles};
use crate::application::{author_names, name_of};
use crate::domain::entity::Article;
use crate::domain::repository::{ArticleRepository, UserRepository};
use crate::domain::value_object::PageRequest;
use crate::error::BlogError;

/// Every article, one page at a time
pub struct GetPagedArticles {
    pub page_number: u32,
    pub page_size: u32,
}

impl Request for GetPagedArticles {
    type Response = PagedArticles;
    const NAME: &'static str = "GetPagedArticles";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("PageNumber", |r: &Self| {
            PageRequest::check_number(r.page_number).map(drop)
        }),
        FieldRule::new("PageSize", |r: &Self| PageRequest::check_size(r.page_size).map(drop)),
    ];
}

/// One author's articles, one page at a time
pub struct GetArticlesByAuthor {
    pub author_id: Uuid,
    pub page_number: u32,
    pub page_size: u32,
}

impl Request for GetArticlesByAuthor {
    type Response = PagedArticles;
    const NAME: &'static str = "GetArticlesByAuthor";
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule::new("AuthorId", |r: &Self| {
            require_id("AuthorId", "Author id", &r.author_id).map(drop)
        }),
        FieldRule::new("PageNumber", |r: &Self| {
            PageRequest::check_number(r.page_number).map(drop)
        }),
        FieldRule::new("PageSize", |r: &Self| PageRequest::check_size(r.page_size).map(drop)),
    ];
}

pub struct ListArticlesHandler<U, A> {
    users: Arc<U>,
    articles: Arc<A>,
    max_page_size: u32,
}

impl<U: UserRepository, A: ArticleRepository> ListArticlesHandler<U, A> {
    pub fn new(users: Arc<U>, articles: Arc<A>, config: &BlogConfig) -> Self {
        Self {
            users,
            articles,
            max_page_size: config.max_page_size,
        }
    }
}

impl<U, A> ListArticlesHandler<U, A>
where
    U: UserRepository + Send + Sync,
    A: ArticleRepository + Send + Sync,
{
    fn page(&self, number: u32, size: u32) -> Outcome<PageRequest> {
        Ok(PageRequest::new(number, size)?.capped(self.max_page_size))
    }

    async fn summarize(
        &self,
        page: PageRequest,
        (articles, total_count): (Vec<Article>, usize),
    ) -> Outcome<PagedArticles> {
        let authors: Vec<UserId> = articles.iter().map(|a| a.author_id).collect();
        let names = author_names(&*self.users, &authors).await?;

        Ok(PagedArticles {
            total_count,
            page_number: page.number(),
            page_size: page.size(),
            articles: articles
                .iter()
                .map(|article| ArticleSummary::new(article, name_of(&names, &article.author_id)))
                .collect(),
        })
    }
}

impl<U, A> Handler<GetPagedArticles> for ListArticlesHandler<U, A>
where
    U: UserRepository + Send + Sync,
    A: ArticleRepository + Send + Sync,
{
    async fn handle(&self, request: GetPagedArticles) -> Outcome<PagedArticles> {
        let page = self.page(request.page_number, request.page_size)?;
        let found = self.articles.page(page).await?;
        self.summarize(page, found).await
    }
}

impl<U, A> Handler<GetArticlesByAuthor> for ListArticlesHandler<U, A>
where
    U: UserRepository + Send + Sync,
    A: ArticleRepository + Send + Sync,
{
    async fn handle(&self, request: GetArticlesByAuthor) -> Outcome<PagedArticles> {
        let author_id = UserId::from_uuid(request.author_id);
        let page = self.page(request.page_number, request.page_size)?;

        if self.users.find_by_id(&author_id).await?.is_none() {
            return Err(BlogError::UserNotFound.into());
        }

        let found = self.articles.page_by_author(&author_id, page).await?;
        self.summarize(page, found).await
    }
}
