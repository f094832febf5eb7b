use crate::domain::article::{Article, ArticleId};
use crate::domain::column::entity::{Column, ColumnEntry, ColumnId, ColumnUpdate, NewColumn};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ColumnRepository: Send + Sync {
    async fn insert(&self, column: NewColumn) -> DomainResult<Column>;
    async fn update(&self, update: ColumnUpdate) -> DomainResult<Column>;
    async fn delete(&self, id: ColumnId) -> DomainResult<()>;
    async fn find_by_id(&self, id: ColumnId) -> DomainResult<Option<Column>>;
    /// Newest first.
    async fn list_page(&self, page: PageRequest) -> DomainResult<(Vec<Column>, u64)>;
    /// Most subscribed first.
    async fn list_hot(&self, limit: u32) -> DomainResult<Vec<Column>>;
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)>;
    async fn list_subscribed(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)>;
    /// Returns `false` when the subscription already existed.
    async fn subscribe(&self, id: ColumnId, user_id: &UserId) -> DomainResult<bool>;
    /// Returns `false` when there was no subscription.
    async fn unsubscribe(&self, id: ColumnId, user_id: &UserId) -> DomainResult<bool>;
}

#[async_trait]
pub trait ColumnEntryRepository: Send + Sync {
    async fn find(&self, id: ColumnId, article_id: ArticleId) -> DomainResult<Option<ColumnEntry>>;
    async fn max_sort(&self, id: ColumnId) -> DomainResult<Option<i32>>;
    async fn insert(&self, entry: ColumnEntry) -> DomainResult<ColumnEntry>;
    /// Returns `false` when the article was not in the column.
    async fn remove(&self, id: ColumnId, article_id: ArticleId) -> DomainResult<bool>;
    async fn set_sort(
        &self,
        id: ColumnId,
        article_id: ArticleId,
        sort: i32,
    ) -> DomainResult<ColumnEntry>;
    /// Member articles ordered by sort key, then by when they were added.
    async fn list_articles(
        &self,
        id: ColumnId,
        page: PageRequest,
    ) -> DomainResult<(Vec<(ColumnEntry, Article)>, u64)>;
    async fn touch(&self, id: ColumnId, at: DateTime<Utc>) -> DomainResult<()>;
}
