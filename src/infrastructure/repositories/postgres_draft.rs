// src/infrastructure/repositories/postgres_draft.rs
use super::{map_sqlx, to_count};
use crate::domain::article::ArticleId;
use crate::domain::category::CategoryId;
use crate::domain::draft::{Draft, DraftId, DraftRepository, DraftUpdate, NewDraft};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::topic::TopicId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const DRAFT_COLUMNS: &str = "id, owner_id, title, summary, body, category_id, topic_ids, \
     article_id, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresDraftRepository {
    pool: PgPool,
}

impl PostgresDraftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DraftRow {
    id: i64,
    owner_id: String,
    title: String,
    summary: Option<String>,
    body: String,
    category_id: Option<i64>,
    topic_ids: Vec<i64>,
    article_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DraftRow> for Draft {
    type Error = DomainError;

    fn try_from(row: DraftRow) -> Result<Self, Self::Error> {
        Ok(Draft {
            id: DraftId::new(row.id)?,
            owner_id: UserId::new(row.owner_id)?,
            title: row.title,
            summary: row.summary,
            body: row.body,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            topic_ids: row
                .topic_ids
                .into_iter()
                .map(TopicId::new)
                .collect::<Result<_, _>>()?,
            article_id: row.article_id.map(ArticleId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl DraftRepository for PostgresDraftRepository {
    async fn insert(&self, draft: NewDraft) -> DomainResult<Draft> {
        let topic_ids: Vec<i64> = draft.topic_ids.iter().map(|id| id.0).collect();
        let row = sqlx::query_as::<_, DraftRow>(&format!(
            "INSERT INTO drafts (owner_id, title, summary, body, category_id, topic_ids, article_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {DRAFT_COLUMNS}"
        ))
        .bind(draft.owner_id.as_str())
        .bind(&draft.title)
        .bind(draft.summary.as_deref())
        .bind(&draft.body)
        .bind(draft.category_id.map(i64::from))
        .bind(topic_ids)
        .bind(draft.article_id.map(i64::from))
        .bind(draft.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Draft::try_from(row)
    }

    async fn update(&self, update: DraftUpdate) -> DomainResult<Draft> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE drafts SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(title) = update.title {
            builder.push(", title = ");
            builder.push_bind(title);
        }
        if let Some(summary) = update.summary {
            builder.push(", summary = ");
            builder.push_bind(summary);
        }
        if let Some(body) = update.body {
            builder.push(", body = ");
            builder.push_bind(body);
        }
        if let Some(category_id) = update.category_id {
            builder.push(", category_id = ");
            builder.push_bind(category_id.map(i64::from));
        }
        if let Some(topic_ids) = update.topic_ids {
            builder.push(", topic_ids = ");
            builder.push_bind(topic_ids.into_iter().map(i64::from).collect::<Vec<_>>());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" RETURNING ");
        builder.push(DRAFT_COLUMNS);

        let row = builder
            .build_query_as::<DraftRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("draft not found".into()))?;

        Draft::try_from(row)
    }

    async fn find_by_id(&self, id: DraftId) -> DomainResult<Option<Draft>> {
        let row = sqlx::query_as::<_, DraftRow>(&format!(
            "SELECT {DRAFT_COLUMNS} FROM drafts WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Draft::try_from).transpose()
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Draft>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drafts WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, DraftRow>(&format!(
            "SELECT {DRAFT_COLUMNS} FROM drafts WHERE owner_id = $1
             ORDER BY updated_at DESC, id DESC LIMIT $2 OFFSET $3"
        ))
        .bind(owner_id.as_str())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let drafts = rows
            .into_iter()
            .map(Draft::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((drafts, to_count(total)))
    }

    async fn delete(&self, id: DraftId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM drafts WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("draft not found".into()));
        }
        Ok(())
    }
}
