use crate::domain::article::value_objects::{ArticleBody, ArticleId, ArticleTitle};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Snapshot of an article taken on every write.
#[derive(Debug, Clone)]
pub struct ArticleRevision {
    pub article_id: ArticleId,
    pub version: i32,
    pub title: ArticleTitle,
    pub summary: Option<String>,
    pub body: ArticleBody,
    pub edited_by: UserId,
    pub recorded_at: DateTime<Utc>,
}
