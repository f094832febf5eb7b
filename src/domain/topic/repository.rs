use crate::domain::errors::DomainResult;
use crate::domain::topic::entity::{NewTopic, Topic, TopicId, TopicName};
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn insert(&self, topic: NewTopic) -> DomainResult<Topic>;
    async fn find_by_id(&self, id: TopicId) -> DomainResult<Option<Topic>>;
    async fn find_by_name(&self, name: &TopicName) -> DomainResult<Option<Topic>>;
    async fn list_hot(&self, limit: u32) -> DomainResult<Vec<Topic>>;
    /// Returns `false` when the user already followed the topic.
    async fn follow(&self, id: TopicId, user_id: &UserId) -> DomainResult<bool>;
    /// Returns `false` when the user was not following the topic.
    async fn unfollow(&self, id: TopicId, user_id: &UserId) -> DomainResult<bool>;
}
