use crate::domain::article::entity::{Article, ArticleFilter, ArticleUpdate, NewArticle};
use crate::domain::article::revision::ArticleRevision;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn delete(&self, id: ArticleId) -> DomainResult<()>;
    async fn increment_views(&self, id: ArticleId) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    /// Newest first. Returns the page and the total number of matches.
    async fn list_page(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<Article>, u64)>;
}

#[async_trait]
pub trait ArticleRevisionRepository: Send + Sync {
    async fn append(&self, article: &Article, edited_by: &UserId) -> DomainResult<()>;
    /// Newest version first.
    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleRevision>>;
}
