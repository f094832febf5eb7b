use crate::domain::article::ArticleId;
use crate::domain::comment::{
    Comment, CommentStats, CommentThread, Report, SensitiveWord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[allow(clippy::struct_excessive_bools)]
pub struct CommentDto {
    pub id: i64,
    pub article_id: i64,
    pub user_id: String,
    pub parent_id: Option<i64>,
    pub root_id: Option<i64>,
    pub reply_to_user_id: Option<String>,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub reply_count: i64,
    pub is_pinned: bool,
    pub is_featured: bool,
    pub is_author_reply: bool,
    pub is_folded: bool,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into(),
            article_id: comment.article_id.into(),
            user_id: comment.user_id.into(),
            parent_id: comment.parent_id.map(Into::into),
            root_id: comment.root_id.map(Into::into),
            reply_to_user_id: comment.reply_to_user_id.map(Into::into),
            content: comment.content,
            like_count: comment.like_count,
            dislike_count: comment.dislike_count,
            reply_count: comment.reply_count,
            is_pinned: comment.is_pinned,
            is_featured: comment.is_featured,
            is_author_reply: comment.is_author_reply,
            is_folded: comment.is_folded,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentThreadDto {
    pub root: CommentDto,
    pub replies: Vec<CommentDto>,
}

impl From<CommentThread> for CommentThreadDto {
    fn from(thread: CommentThread) -> Self {
        Self {
            root: thread.root.into(),
            replies: thread.replies.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentStatsDto {
    pub article_id: i64,
    pub total: u64,
    pub root_count: u64,
    pub reply_count: u64,
}

impl CommentStatsDto {
    pub fn new(article_id: ArticleId, stats: CommentStats) -> Self {
        Self {
            article_id: article_id.into(),
            total: stats.total,
            root_count: stats.root_count,
            reply_count: stats.reply_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: i64,
    pub comment_id: i64,
    pub reporter_id: String,
    pub reason: String,
    pub status: String,
    pub handler_id: Option<String>,
    pub handler_note: Option<String>,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "serde_time::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub handled_at: Option<DateTime<Utc>>,
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id.0,
            comment_id: report.comment_id.into(),
            reporter_id: report.reporter_id.into(),
            reason: report.reason,
            status: report.status.as_str().to_string(),
            handler_id: report.handler_id.map(Into::into),
            handler_note: report.handler_note,
            created_at: report.created_at,
            handled_at: report.handled_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SensitiveWordDto {
    pub id: i64,
    pub word: String,
    #[serde(with = "serde_time")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl From<SensitiveWord> for SensitiveWordDto {
    fn from(word: SensitiveWord) -> Self {
        Self {
            id: word.id.0,
            word: word.word,
            created_at: word.created_at,
        }
    }
}

/// Outcome of a bulk moderation action.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchResultDto {
    pub requested: usize,
    pub affected: u64,
}
