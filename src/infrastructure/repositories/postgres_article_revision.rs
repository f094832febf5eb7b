// src/infrastructure/repositories/postgres_article_revision.rs
use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleBody, ArticleId, ArticleRevision, ArticleRevisionRepository, ArticleTitle,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresArticleRevisionRepository {
    pool: PgPool,
}

impl PostgresArticleRevisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRevisionRow {
    article_id: i64,
    version: i32,
    title: String,
    summary: Option<String>,
    body: String,
    edited_by: String,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<ArticleRevisionRow> for ArticleRevision {
    type Error = DomainError;

    fn try_from(row: ArticleRevisionRow) -> Result<Self, Self::Error> {
        Ok(ArticleRevision {
            article_id: ArticleId::new(row.article_id)?,
            version: row.version,
            title: ArticleTitle::new(row.title)?,
            summary: row.summary,
            body: ArticleBody::new(row.body)?,
            edited_by: UserId::new(row.edited_by)?,
            recorded_at: row.recorded_at,
        })
    }
}

#[async_trait]
impl ArticleRevisionRepository for PostgresArticleRevisionRepository {
    async fn append(&self, article: &Article, edited_by: &UserId) -> DomainResult<()> {
        sqlx::query(
            r"
            WITH next_version AS (
                SELECT COALESCE(MAX(version) + 1, 1) AS version
                FROM article_revisions
                WHERE article_id = $1
            )
            INSERT INTO article_revisions (article_id, version, title, summary, body, edited_by, recorded_at)
            SELECT $1, next_version.version, $2, $3, $4, $5, $6
            FROM next_version
            ",
        )
        .bind(i64::from(article.id))
        .bind(article.title.as_str())
        .bind(article.summary.as_deref())
        .bind(article.body.as_str())
        .bind(edited_by.as_str())
        .bind(article.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleRevision>> {
        let rows = sqlx::query_as::<_, ArticleRevisionRow>(
            r"
            SELECT article_id, version, title, summary, body, edited_by, recorded_at
            FROM article_revisions
            WHERE article_id = $1
            ORDER BY version DESC
            ",
        )
        .bind(i64::from(article_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(ArticleRevision::try_from).collect()
    }
}
