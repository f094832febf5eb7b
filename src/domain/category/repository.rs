use crate::domain::category::entity::{Category, CategoryId, NewCategory};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>>;
    async fn list_all(&self) -> DomainResult<Vec<Category>>;
}
