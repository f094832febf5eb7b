use crate::domain::topic::Topic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: String,
    pub follower_count: i64,
    pub article_count: i64,
    pub hotness: i64,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<Topic> for TopicDto {
    fn from(topic: Topic) -> Self {
        let hotness = topic.hotness();
        Self {
            id: topic.id.into(),
            name: topic.name.into_inner(),
            description: topic.description,
            creator_id: topic.creator_id.into(),
            follower_count: topic.follower_count,
            article_count: topic.article_count,
            hotness,
            created_at: topic.created_at,
        }
    }
}
