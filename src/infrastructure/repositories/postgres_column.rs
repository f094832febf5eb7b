// src/infrastructure/repositories/postgres_column.rs
use super::postgres_article::{ARTICLE_COLUMNS, ArticleRow};
use super::{map_sqlx, to_count};
use crate::domain::article::{Article, ArticleId};
use crate::domain::column::{
    Column, ColumnEntry, ColumnEntryRepository, ColumnId, ColumnName, ColumnRepository,
    ColumnUpdate, NewColumn,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const COLUMN_SELECT: &str = "SELECT c.id, c.owner_id, c.name, c.description, c.cover_url,
        c.created_at, c.updated_at,
        (SELECT COUNT(*) FROM column_subscriptions s WHERE s.column_id = c.id) AS subscriber_count,
        (SELECT COUNT(*) FROM column_articles e WHERE e.column_id = c.id) AS article_count
     FROM article_columns c";

#[derive(Clone)]
pub struct PostgresColumnRepository {
    pool: PgPool,
}

impl PostgresColumnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresColumnEntryRepository {
    pool: PgPool,
}

impl PostgresColumnEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ColumnRow {
    id: i64,
    owner_id: String,
    name: String,
    description: Option<String>,
    cover_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    subscriber_count: i64,
    article_count: i64,
}

impl TryFrom<ColumnRow> for Column {
    type Error = DomainError;

    fn try_from(row: ColumnRow) -> Result<Self, Self::Error> {
        Ok(Column {
            id: ColumnId::new(row.id)?,
            owner_id: UserId::new(row.owner_id)?,
            name: ColumnName::new(row.name)?,
            description: row.description,
            cover_url: row.cover_url,
            subscriber_count: row.subscriber_count,
            article_count: row.article_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct EntryRow {
    column_id: i64,
    article_id: i64,
    sort: i32,
    added_at: DateTime<Utc>,
}

impl TryFrom<EntryRow> for ColumnEntry {
    type Error = DomainError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(ColumnEntry {
            column_id: ColumnId::new(row.column_id)?,
            article_id: ArticleId::new(row.article_id)?,
            sort: row.sort,
            added_at: row.added_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct EntryWithArticleRow {
    entry_column_id: i64,
    entry_sort: i32,
    entry_added_at: DateTime<Utc>,
    #[sqlx(flatten)]
    article: ArticleRow,
}

impl EntryWithArticleRow {
    fn into_parts(self) -> DomainResult<(ColumnEntry, Article)> {
        let article = Article::try_from(self.article)?;
        let entry = ColumnEntry {
            column_id: ColumnId::new(self.entry_column_id)?,
            article_id: article.id,
            sort: self.entry_sort,
            added_at: self.entry_added_at,
        };
        Ok((entry, article))
    }
}

fn into_columns(rows: Vec<ColumnRow>) -> DomainResult<Vec<Column>> {
    rows.into_iter().map(Column::try_from).collect()
}

impl PostgresColumnRepository {
    async fn page_where(
        &self,
        join: &str,
        condition: &str,
        order: &str,
        user_id: &str,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM article_columns c {join} WHERE {condition}"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, ColumnRow>(&format!(
            "{COLUMN_SELECT} {join} WHERE {condition} ORDER BY {order} LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok((into_columns(rows)?, to_count(total)))
    }
}

#[async_trait]
impl ColumnRepository for PostgresColumnRepository {
    async fn insert(&self, column: NewColumn) -> DomainResult<Column> {
        let row = sqlx::query_as::<_, ColumnRow>(
            "INSERT INTO article_columns (owner_id, name, description, cover_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING id, owner_id, name, description, cover_url, created_at, updated_at,
                       0::BIGINT AS subscriber_count, 0::BIGINT AS article_count",
        )
        .bind(column.owner_id.as_str())
        .bind(column.name.as_str())
        .bind(column.description.as_deref())
        .bind(column.cover_url.as_deref())
        .bind(column.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Column::try_from(row)
    }

    async fn update(&self, update: ColumnUpdate) -> DomainResult<Column> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE article_columns SET updated_at = ");
        builder.push_bind(update.updated_at);

        if let Some(name) = update.name {
            builder.push(", name = ");
            builder.push_bind(name.into_inner());
        }
        if let Some(description) = update.description {
            builder.push(", description = ");
            builder.push_bind(description);
        }
        if let Some(cover_url) = update.cover_url {
            builder.push(", cover_url = ");
            builder.push_bind(cover_url);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("column not found".into()));
        }

        self.find_by_id(update.id)
            .await?
            .ok_or_else(|| DomainError::NotFound("column not found".into()))
    }

    async fn delete(&self, id: ColumnId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM article_columns WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("column not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ColumnId) -> DomainResult<Option<Column>> {
        let row = sqlx::query_as::<_, ColumnRow>(&format!("{COLUMN_SELECT} WHERE c.id = $1"))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Column::try_from).transpose()
    }

    async fn list_page(&self, page: PageRequest) -> DomainResult<(Vec<Column>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article_columns")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, ColumnRow>(&format!(
            "{COLUMN_SELECT} ORDER BY c.created_at DESC, c.id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok((into_columns(rows)?, to_count(total)))
    }

    async fn list_hot(&self, limit: u32) -> DomainResult<Vec<Column>> {
        let rows = sqlx::query_as::<_, ColumnRow>(&format!(
            "SELECT * FROM ({COLUMN_SELECT}) ranked
             ORDER BY subscriber_count DESC, article_count DESC, id ASC
             LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_columns(rows)
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)> {
        self.page_where(
            "",
            "c.owner_id = $1",
            "c.created_at DESC, c.id DESC",
            owner_id.as_str(),
            page,
        )
        .await
    }

    async fn list_subscribed(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)> {
        self.page_where(
            "JOIN column_subscriptions sub ON sub.column_id = c.id",
            "sub.user_id = $1",
            "sub.created_at DESC, c.id DESC",
            user_id.as_str(),
            page,
        )
        .await
    }

    async fn subscribe(&self, id: ColumnId, user_id: &UserId) -> DomainResult<bool> {
        let result = sqlx::query(
            "INSERT INTO column_subscriptions (column_id, user_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(i64::from(id))
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    async fn unsubscribe(&self, id: ColumnId, user_id: &UserId) -> DomainResult<bool> {
        let result =
            sqlx::query("DELETE FROM column_subscriptions WHERE column_id = $1 AND user_id = $2")
                .bind(i64::from(id))
                .bind(user_id.as_str())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl ColumnEntryRepository for PostgresColumnEntryRepository {
    async fn find(&self, id: ColumnId, article_id: ArticleId) -> DomainResult<Option<ColumnEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(
            "SELECT column_id, article_id, sort, added_at FROM column_articles
             WHERE column_id = $1 AND article_id = $2",
        )
        .bind(i64::from(id))
        .bind(i64::from(article_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(ColumnEntry::try_from).transpose()
    }

    async fn max_sort(&self, id: ColumnId) -> DomainResult<Option<i32>> {
        sqlx::query_scalar("SELECT MAX(sort) FROM column_articles WHERE column_id = $1")
            .bind(i64::from(id))
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn insert(&self, entry: ColumnEntry) -> DomainResult<ColumnEntry> {
        let row = sqlx::query_as::<_, EntryRow>(
            "INSERT INTO column_articles (column_id, article_id, sort, added_at)
             VALUES ($1, $2, $3, $4)
             RETURNING column_id, article_id, sort, added_at",
        )
        .bind(i64::from(entry.column_id))
        .bind(i64::from(entry.article_id))
        .bind(entry.sort)
        .bind(entry.added_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        ColumnEntry::try_from(row)
    }

    async fn remove(&self, id: ColumnId, article_id: ArticleId) -> DomainResult<bool> {
        let result =
            sqlx::query("DELETE FROM column_articles WHERE column_id = $1 AND article_id = $2")
                .bind(i64::from(id))
                .bind(i64::from(article_id))
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_sort(
        &self,
        id: ColumnId,
        article_id: ArticleId,
        sort: i32,
    ) -> DomainResult<ColumnEntry> {
        let row = sqlx::query_as::<_, EntryRow>(
            "UPDATE column_articles SET sort = $3
             WHERE column_id = $1 AND article_id = $2
             RETURNING column_id, article_id, sort, added_at",
        )
        .bind(i64::from(id))
        .bind(i64::from(article_id))
        .bind(sort)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article is not in the column".into()))?;

        ColumnEntry::try_from(row)
    }

    async fn list_articles(
        &self,
        id: ColumnId,
        page: PageRequest,
    ) -> DomainResult<(Vec<(ColumnEntry, Article)>, u64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM column_articles WHERE column_id = $1")
                .bind(i64::from(id))
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, EntryWithArticleRow>(&format!(
            "SELECT e.column_id AS entry_column_id, e.sort AS entry_sort, e.added_at AS entry_added_at,
                    {ARTICLE_COLUMNS}
             FROM column_articles e
             JOIN articles a ON a.id = e.article_id
             WHERE e.column_id = $1
             ORDER BY e.sort ASC, e.added_at ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(i64::from(id))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let entries = rows
            .into_iter()
            .map(EntryWithArticleRow::into_parts)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((entries, to_count(total)))
    }

    async fn touch(&self, id: ColumnId, at: DateTime<Utc>) -> DomainResult<()> {
        sqlx::query("UPDATE article_columns SET updated_at = $2 WHERE id = $1")
            .bind(i64::from(id))
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
