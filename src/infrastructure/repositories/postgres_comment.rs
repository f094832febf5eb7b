// src/infrastructure/repositories/postgres_comment.rs
use super::{map_sqlx, to_count};
use crate::domain::article::ArticleId;
use crate::domain::comment::{
    Comment, CommentId, CommentRepository, CommentStats, NewComment, ReactionKind,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

const COMMENT_COLUMNS: &str = "id, article_id, user_id, parent_id, root_id, reply_to_user_id, \
     content, like_count, dislike_count, reply_count, is_pinned, is_featured, is_author_reply, \
     is_folded, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
#[allow(clippy::struct_excessive_bools)]
struct CommentRow {
    id: i64,
    article_id: i64,
    user_id: String,
    parent_id: Option<i64>,
    root_id: Option<i64>,
    reply_to_user_id: Option<String>,
    content: String,
    like_count: i64,
    dislike_count: i64,
    reply_count: i64,
    is_pinned: bool,
    is_featured: bool,
    is_author_reply: bool,
    is_folded: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId::new(row.id)?,
            article_id: ArticleId::new(row.article_id)?,
            user_id: UserId::new(row.user_id)?,
            parent_id: row.parent_id.map(CommentId::new).transpose()?,
            root_id: row.root_id.map(CommentId::new).transpose()?,
            reply_to_user_id: row.reply_to_user_id.map(UserId::new).transpose()?,
            content: row.content,
            like_count: row.like_count,
            dislike_count: row.dislike_count,
            reply_count: row.reply_count,
            is_pinned: row.is_pinned,
            is_featured: row.is_featured,
            is_author_reply: row.is_author_reply,
            is_folded: row.is_folded,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_comments(rows: Vec<CommentRow>) -> DomainResult<Vec<Comment>> {
    rows.into_iter().map(Comment::try_from).collect()
}

fn ids(ids: &[CommentId]) -> Vec<i64> {
    ids.iter().map(|id| id.0).collect()
}

fn counter_column(kind: ReactionKind) -> &'static str {
    match kind {
        ReactionKind::Like => "like_count",
        ReactionKind::Dislike => "dislike_count",
    }
}

/// Deletes one comment with its subtree and fixes the ancestors' reply counters.
/// Returns the number of removed rows, zero when the comment is gone already.
async fn delete_subtree(conn: &mut PgConnection, id: CommentId) -> DomainResult<u64> {
    let position: Option<(Option<i64>, Option<i64>)> =
        sqlx::query_as("SELECT parent_id, root_id FROM comments WHERE id = $1 FOR UPDATE")
            .bind(id.0)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx)?;
    let Some((parent_id, root_id)) = position else {
        return Ok(0);
    };

    let removed: i64 = sqlx::query_scalar(
        "WITH RECURSIVE subtree AS (
             SELECT id FROM comments WHERE id = $1
             UNION ALL
             SELECT c.id FROM comments c JOIN subtree s ON c.parent_id = s.id
         )
         SELECT COUNT(*) FROM subtree",
    )
    .bind(id.0)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id.0)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if let (Some(parent_id), Some(root_id)) = (parent_id, root_id) {
        sqlx::query(
            "UPDATE comments SET reply_count = GREATEST(reply_count - $2, 0) WHERE id = $1",
        )
        .bind(root_id)
        .bind(removed)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

        if parent_id != root_id {
            sqlx::query(
                "UPDATE comments SET reply_count = GREATEST(reply_count - 1, 0) WHERE id = $1",
            )
            .bind(parent_id)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx)?;
        }
    }

    Ok(to_count(removed))
}

impl PostgresCommentRepository {
    async fn set_flag(
        &self,
        column: &str,
        id: CommentId,
        value: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "UPDATE comments SET {column} = $2, updated_at = $3 WHERE id = $1
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id.0)
        .bind(value)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("comment not found".into()))?;

        Comment::try_from(row)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "INSERT INTO comments (article_id, user_id, parent_id, root_id, reply_to_user_id,
                                   content, is_author_reply, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(i64::from(comment.article_id))
        .bind(comment.user_id.as_str())
        .bind(comment.parent_id.map(i64::from))
        .bind(comment.root_id.map(i64::from))
        .bind(comment.reply_to_user_id.as_ref().map(UserId::as_str))
        .bind(&comment.content)
        .bind(comment.is_author_reply)
        .bind(comment.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        if let (Some(parent_id), Some(root_id)) = (comment.parent_id, comment.root_id) {
            sqlx::query(
                "UPDATE comments SET reply_count = reply_count + 1
                 WHERE id = $1 OR id = $2",
            )
            .bind(parent_id.0)
            .bind(root_id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Comment::try_from(row)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Comment::try_from).transpose()
    }

    async fn list_roots(
        &self,
        article_id: ArticleId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE article_id = $1 AND parent_id IS NULL",
        )
        .bind(article_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE article_id = $1 AND parent_id IS NULL
             ORDER BY is_pinned DESC, created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(article_id.0)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok((into_comments(rows)?, to_count(total)))
    }

    async fn list_replies(
        &self,
        id: CommentId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE root_id = $1 OR parent_id = $1")
                .bind(id.0)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;

        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE root_id = $1 OR parent_id = $1
             ORDER BY created_at ASC, id ASC
             LIMIT $2 OFFSET $3"
        ))
        .bind(id.0)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok((into_comments(rows)?, to_count(total)))
    }

    async fn list_thread_replies(&self, root_ids: &[CommentId]) -> DomainResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE root_id = ANY($1)
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(ids(root_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_comments(rows)
    }

    async fn list_hot(&self, article_id: ArticleId, limit: u32) -> DomainResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments
             WHERE article_id = $1
             ORDER BY like_count * 2 + reply_count - dislike_count DESC, created_at DESC
             LIMIT $2"
        ))
        .bind(article_id.0)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        into_comments(rows)
    }

    async fn stats(&self, article_id: ArticleId) -> DomainResult<CommentStats> {
        let (total, roots): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE parent_id IS NULL)
             FROM comments WHERE article_id = $1",
        )
        .bind(article_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let total = to_count(total);
        let root_count = to_count(roots);
        Ok(CommentStats {
            total,
            root_count,
            reply_count: total.saturating_sub(root_count),
        })
    }

    async fn delete(&self, id: CommentId) -> DomainResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let removed = delete_subtree(&mut *tx, id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        if removed == 0 {
            return Err(DomainError::NotFound("comment not found".into()));
        }
        Ok(removed)
    }

    async fn delete_many(&self, ids: &[CommentId]) -> DomainResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let mut removed = 0;
        for id in ids {
            removed += delete_subtree(&mut *tx, *id).await?;
        }
        tx.commit().await.map_err(map_sqlx)?;
        Ok(removed)
    }

    async fn set_pinned(
        &self,
        id: CommentId,
        pinned: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        self.set_flag("is_pinned", id, pinned, at).await
    }

    async fn set_featured(
        &self,
        id: CommentId,
        featured: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        self.set_flag("is_featured", id, featured, at).await
    }

    async fn set_folded(
        &self,
        comment_ids: &[CommentId],
        folded: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let result = sqlx::query(
            "UPDATE comments SET is_folded = $2, updated_at = $3 WHERE id = ANY($1)",
        )
        .bind(ids(comment_ids))
        .bind(folded)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }

    async fn add_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let inserted = sqlx::query(
            "INSERT INTO comment_reactions (comment_id, user_id, kind) VALUES ($1, $2, $3)
             ON CONFLICT DO NOTHING",
        )
        .bind(id.0)
        .bind(user_id.as_str())
        .bind(kind.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .rows_affected()
            == 1;

        if inserted {
            let column = counter_column(kind);
            sqlx::query(&format!(
                "UPDATE comments SET {column} = {column} + 1 WHERE id = $1"
            ))
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(inserted)
    }

    async fn remove_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let removed = sqlx::query(
            "DELETE FROM comment_reactions WHERE comment_id = $1 AND user_id = $2 AND kind = $3",
        )
        .bind(id.0)
        .bind(user_id.as_str())
        .bind(kind.as_str())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .rows_affected()
            == 1;

        if removed {
            let column = counter_column(kind);
            sqlx::query(&format!(
                "UPDATE comments SET {column} = GREATEST({column} - 1, 0) WHERE id = $1"
            ))
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(removed)
    }
}
