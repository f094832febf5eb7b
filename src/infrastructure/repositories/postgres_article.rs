// src/infrastructure/repositories/postgres_article.rs
use super::{map_sqlx, to_count};
use crate::domain::article::{
    Article, ArticleBody, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug,
    ArticleTitle, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::topic::TopicId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

pub(super) const ARTICLE_COLUMNS: &str = "a.id, a.title, a.slug, a.summary, a.body, a.author_id, \
     a.category_id, a.topic_ids, a.view_count, a.created_at, a.updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ArticleRow {
    id: i64,
    title: String,
    slug: String,
    summary: Option<String>,
    body: String,
    author_id: String,
    category_id: Option<i64>,
    topic_ids: Vec<i64>,
    view_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId::new(row.id)?,
            title: ArticleTitle::new(row.title)?,
            slug: ArticleSlug::new(row.slug)?,
            summary: row.summary,
            body: ArticleBody::new(row.body)?,
            author_id: UserId::new(row.author_id)?,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            topic_ids: row
                .topic_ids
                .into_iter()
                .map(TopicId::new)
                .collect::<Result<_, _>>()?,
            view_count: row.view_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn topic_ids(ids: &[TopicId]) -> Vec<i64> {
    ids.iter().map(|id| id.0).collect()
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            title,
            slug,
            summary,
            body,
            author_id,
            category_id,
            topic_ids: topics,
            created_at,
            updated_at,
        } = article;

        let row = sqlx::query_as::<_, ArticleRow>(
            "INSERT INTO articles AS a (title, slug, summary, body, author_id, category_id, topic_ids, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING a.id, a.title, a.slug, a.summary, a.body, a.author_id, a.category_id, a.topic_ids, a.view_count, a.created_at, a.updated_at",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(summary)
        .bind(body.as_str())
        .bind(author_id.as_str())
        .bind(category_id.map(i64::from))
        .bind(topic_ids(&topics))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Article::try_from(row)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let ArticleUpdate {
            id,
            title,
            slug,
            summary,
            body,
            category_id,
            topic_ids: topics,
            updated_at,
        } = update;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE articles AS a SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(title.into_inner());
        }

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        if let Some(summary) = summary {
            builder.push(", summary = ");
            builder.push_bind(summary);
        }

        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(body.into_inner());
        }

        if let Some(category_id) = category_id {
            builder.push(", category_id = ");
            builder.push_bind(category_id.map(i64::from));
        }

        if let Some(topics) = topics {
            builder.push(", topic_ids = ");
            builder.push_bind(topic_ids(&topics));
        }

        builder.push(" WHERE a.id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING ");
        builder.push(ARTICLE_COLUMNS);

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;

        Article::try_from(row)
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("article not found".into()));
        }
        Ok(())
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<()> {
        sqlx::query("UPDATE articles SET view_count = view_count + 1 WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &'a ArticleFilter) {
        builder.push(" WHERE TRUE");

        if let Some(category_id) = filter.category_id {
            builder.push(" AND a.category_id = ");
            builder.push_bind(i64::from(category_id));
        }

        if let Some(topic_id) = filter.topic_id {
            builder.push(" AND ");
            builder.push_bind(i64::from(topic_id));
            builder.push(" = ANY(a.topic_ids)");
        }

        if let Some(author_id) = &filter.author_id {
            builder.push(" AND a.author_id = ");
            builder.push_bind(author_id.as_str());
        }
    }

    async fn find_one(&self, column: &str, value: ArticleKey<'_>) -> DomainResult<Option<Article>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(" FROM articles a WHERE a.");
        builder.push(column);
        builder.push(" = ");
        match value {
            ArticleKey::Id(id) => builder.push_bind(id),
            ArticleKey::Slug(slug) => builder.push_bind(slug),
        };

        let row = builder
            .build_query_as::<ArticleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }
}

enum ArticleKey<'a> {
    Id(i64),
    Slug(&'a str),
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.find_one("id", ArticleKey::Id(i64::from(id))).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        self.find_one("slug", ArticleKey::Slug(slug.as_str())).await
    }

    async fn list_page(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        Self::apply_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(ARTICLE_COLUMNS);
        builder.push(" FROM articles a");
        Self::apply_filter(&mut builder, filter);
        builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let articles = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((articles, to_count(total)))
    }
}
