// src/infrastructure/repositories/postgres_sensitive_word.rs
use super::map_sqlx;
use crate::domain::comment::{SensitiveWord, SensitiveWordId, SensitiveWordRepository};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresSensitiveWordRepository {
    pool: PgPool,
}

impl PostgresSensitiveWordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SensitiveWordRow {
    id: i64,
    word: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<SensitiveWordRow> for SensitiveWord {
    type Error = DomainError;

    fn try_from(row: SensitiveWordRow) -> Result<Self, Self::Error> {
        Ok(SensitiveWord {
            id: SensitiveWordId::new(row.id)?,
            word: row.word,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl SensitiveWordRepository for PostgresSensitiveWordRepository {
    async fn list_all(&self) -> DomainResult<Vec<SensitiveWord>> {
        let rows = sqlx::query_as::<_, SensitiveWordRow>(
            "SELECT id, word, created_at FROM sensitive_words ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(SensitiveWord::try_from).collect()
    }

    async fn insert(&self, word: String, created_at: DateTime<Utc>) -> DomainResult<SensitiveWord> {
        let row = sqlx::query_as::<_, SensitiveWordRow>(
            "INSERT INTO sensitive_words (word, created_at) VALUES ($1, $2)
             RETURNING id, word, created_at",
        )
        .bind(word)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        SensitiveWord::try_from(row)
    }

    async fn delete(&self, id: SensitiveWordId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM sensitive_words WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() == 1)
    }
}
