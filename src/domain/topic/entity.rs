use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

const MAX_NAME_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicId(pub i64);

impl TopicId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("topic id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<TopicId> for i64 {
    fn from(value: TopicId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicName(String);

impl TopicName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim().trim_start_matches('#').trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("topic name cannot be empty".into()));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "topic name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Topic {
    pub id: TopicId,
    pub name: TopicName,
    pub description: Option<String>,
    pub creator_id: UserId,
    pub follower_count: i64,
    pub article_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Topic {
    /// Followers weigh twice as much as tagged articles.
    pub fn hotness(&self) -> i64 {
        self.follower_count * 2 + self.article_count
    }
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: TopicName,
    pub description: Option<String>,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Hottest first; ties go to the older topic.
pub fn rank_by_hotness(topics: &mut [Topic]) {
    topics.sort_by(|a, b| b.hotness().cmp(&a.hotness()).then(a.id.cmp(&b.id)));
}
