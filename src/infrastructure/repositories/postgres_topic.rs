// src/infrastructure/repositories/postgres_topic.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::topic::{NewTopic, Topic, TopicId, TopicName, TopicRepository};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const TOPIC_SELECT: &str = "SELECT t.id, t.name, t.description, t.creator_id, t.created_at,
        (SELECT COUNT(*) FROM topic_follows f WHERE f.topic_id = t.id) AS follower_count,
        (SELECT COUNT(*) FROM articles a WHERE t.id = ANY(a.topic_ids)) AS article_count
     FROM topics t";

#[derive(Clone)]
pub struct PostgresTopicRepository {
    pool: PgPool,
}

impl PostgresTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TopicRow {
    id: i64,
    name: String,
    description: Option<String>,
    creator_id: String,
    created_at: DateTime<Utc>,
    follower_count: i64,
    article_count: i64,
}

impl TryFrom<TopicRow> for Topic {
    type Error = DomainError;

    fn try_from(row: TopicRow) -> Result<Self, Self::Error> {
        Ok(Topic {
            id: TopicId::new(row.id)?,
            name: TopicName::new(row.name)?,
            description: row.description,
            creator_id: UserId::new(row.creator_id)?,
            follower_count: row.follower_count,
            article_count: row.article_count,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    async fn insert(&self, topic: NewTopic) -> DomainResult<Topic> {
        let row = sqlx::query_as::<_, TopicRow>(
            "INSERT INTO topics (name, description, creator_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, creator_id, created_at,
                       0::BIGINT AS follower_count, 0::BIGINT AS article_count",
        )
        .bind(topic.name.as_str())
        .bind(topic.description.as_deref())
        .bind(topic.creator_id.as_str())
        .bind(topic.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Topic::try_from(row)
    }

    async fn find_by_id(&self, id: TopicId) -> DomainResult<Option<Topic>> {
        let row = sqlx::query_as::<_, TopicRow>(&format!("{TOPIC_SELECT} WHERE t.id = $1"))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Topic::try_from).transpose()
    }

    async fn find_by_name(&self, name: &TopicName) -> DomainResult<Option<Topic>> {
        let row =
            sqlx::query_as::<_, TopicRow>(&format!("{TOPIC_SELECT} WHERE LOWER(t.name) = LOWER($1)"))
                .bind(name.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        row.map(Topic::try_from).transpose()
    }

    async fn list_hot(&self, limit: u32) -> DomainResult<Vec<Topic>> {
        let rows = sqlx::query_as::<_, TopicRow>(&format!(
            "SELECT * FROM ({TOPIC_SELECT}) ranked
             ORDER BY follower_count * 2 + article_count DESC, id ASC
             LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Topic::try_from).collect()
    }

    async fn follow(&self, id: TopicId, user_id: &UserId) -> DomainResult<bool> {
        let result = sqlx::query(
            "INSERT INTO topic_follows (topic_id, user_id) VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(i64::from(id))
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    async fn unfollow(&self, id: TopicId, user_id: &UserId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM topic_follows WHERE topic_id = $1 AND user_id = $2")
            .bind(i64::from(id))
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }
}
