use crate::domain::article::{Article, ArticleRevision};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: String,
    pub author_id: String,
    pub category_id: Option<i64>,
    pub topic_ids: Vec<i64>,
    pub view_count: i64,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.into(),
            title: article.title.into_inner(),
            slug: article.slug.into_inner(),
            summary: article.summary,
            body: article.body.into_inner(),
            author_id: article.author_id.into(),
            category_id: article.category_id.map(Into::into),
            topic_ids: article.topic_ids.into_iter().map(Into::into).collect(),
            view_count: article.view_count,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleRevisionDto {
    pub version: i32,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub edited_by: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub recorded_at: DateTime<Utc>,
}

impl From<ArticleRevision> for ArticleRevisionDto {
    fn from(revision: ArticleRevision) -> Self {
        Self {
            version: revision.version,
            title: revision.title.into_inner(),
            summary: revision.summary,
            body: revision.body.into_inner(),
            edited_by: revision.edited_by.into(),
            recorded_at: revision.recorded_at,
        }
    }
}
