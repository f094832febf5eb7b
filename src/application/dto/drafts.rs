use crate::domain::draft::Draft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DraftDto {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: Option<i64>,
    pub topic_ids: Vec<i64>,
    /// Set when the draft edits an already published article.
    pub article_id: Option<i64>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Draft> for DraftDto {
    fn from(draft: Draft) -> Self {
        Self {
            id: draft.id.into(),
            title: draft.title,
            summary: draft.summary,
            body: draft.body,
            category_id: draft.category_id.map(Into::into),
            topic_ids: draft.topic_ids.into_iter().map(Into::into).collect(),
            article_id: draft.article_id.map(Into::into),
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        }
    }
}
