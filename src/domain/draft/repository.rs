use crate::domain::draft::entity::{Draft, DraftId, DraftUpdate, NewDraft};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait DraftRepository: Send + Sync {
    async fn insert(&self, draft: NewDraft) -> DomainResult<Draft>;
    async fn update(&self, update: DraftUpdate) -> DomainResult<Draft>;
    async fn find_by_id(&self, id: DraftId) -> DomainResult<Option<Draft>>;
    /// Most recently edited first.
    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Draft>, u64)>;
    async fn delete(&self, id: DraftId) -> DomainResult<()>;
}
