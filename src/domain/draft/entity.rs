use crate::domain::article::ArticleId;
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::topic::TopicId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(pub i64);

impl DraftId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("draft id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<DraftId> for i64 {
    fn from(value: DraftId) -> Self {
        value.0
    }
}

/// Unpublished work. Title and body may be incomplete until publication.
#[derive(Debug, Clone)]
pub struct Draft {
    pub id: DraftId,
    pub owner_id: UserId,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: Option<CategoryId>,
    pub topic_ids: Vec<TopicId>,
    pub article_id: Option<ArticleId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewDraft {
    pub owner_id: UserId,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: Option<CategoryId>,
    pub topic_ids: Vec<TopicId>,
    pub article_id: Option<ArticleId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DraftUpdate {
    pub id: DraftId,
    pub title: Option<String>,
    pub summary: Option<Option<String>>,
    pub body: Option<String>,
    pub category_id: Option<Option<CategoryId>>,
    pub topic_ids: Option<Vec<TopicId>>,
    pub updated_at: DateTime<Utc>,
}
