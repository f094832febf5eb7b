use crate::domain::article::Article;
use crate::domain::column::{Column, ColumnEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ArticleDto, serde_time};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnDto {
    pub id: i64,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub subscriber_count: i64,
    pub article_count: i64,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Column> for ColumnDto {
    fn from(column: Column) -> Self {
        Self {
            id: column.id.into(),
            owner_id: column.owner_id.into(),
            name: column.name.into_inner(),
            description: column.description,
            cover_url: column.cover_url,
            subscriber_count: column.subscriber_count,
            article_count: column.article_count,
            created_at: column.created_at,
            updated_at: column.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnArticleDto {
    pub sort: i32,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub added_at: DateTime<Utc>,
    pub article: ArticleDto,
}

impl From<(ColumnEntry, Article)> for ColumnArticleDto {
    fn from((entry, article): (ColumnEntry, Article)) -> Self {
        Self {
            sort: entry.sort,
            added_at: entry.added_at,
            article: article.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnEntryDto {
    pub column_id: i64,
    pub article_id: i64,
    pub sort: i32,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub added_at: DateTime<Utc>,
}

impl From<ColumnEntry> for ColumnEntryDto {
    fn from(entry: ColumnEntry) -> Self {
        Self {
            column_id: entry.column_id.into(),
            article_id: entry.article_id.into(),
            sort: entry.sort,
            added_at: entry.added_at,
        }
    }
}
