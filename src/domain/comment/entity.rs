use crate::domain::article::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

const MAX_CONTENT_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("comment id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<CommentId> for i64 {
    fn from(value: CommentId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("comment cannot be empty".into()));
        }
        if trimmed.chars().count() > MAX_CONTENT_LEN {
            return Err(DomainError::Validation(format!(
                "comment must be at most {MAX_CONTENT_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub parent_id: Option<CommentId>,
    pub root_id: Option<CommentId>,
    pub reply_to_user_id: Option<UserId>,
    pub content: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub reply_count: i64,
    pub is_pinned: bool,
    pub is_featured: bool,
    pub is_author_reply: bool,
    pub is_folded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Root of the thread this comment belongs to; a root is its own root.
    pub fn thread_root(&self) -> CommentId {
        self.root_id.unwrap_or(self.id)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn hotness(&self) -> i64 {
        self.like_count * 2 + self.reply_count - self.dislike_count
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub parent_id: Option<CommentId>,
    pub root_id: Option<CommentId>,
    pub reply_to_user_id: Option<UserId>,
    pub content: String,
    pub is_author_reply: bool,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn root(
        article_id: ArticleId,
        user_id: UserId,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            article_id,
            user_id,
            parent_id: None,
            root_id: None,
            reply_to_user_id: None,
            content,
            is_author_reply: false,
            created_at,
        }
    }

    /// Reply under `parent`. Unless given, the reply targets the parent's author.
    pub fn reply_to(
        parent: &Comment,
        user_id: UserId,
        reply_to_user_id: Option<UserId>,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            article_id: parent.article_id,
            user_id,
            parent_id: Some(parent.id),
            root_id: Some(parent.thread_root()),
            reply_to_user_id: Some(reply_to_user_id.unwrap_or_else(|| parent.user_id.clone())),
            content,
            is_author_reply: false,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentStats {
    pub total: u64,
    pub root_count: u64,
    pub reply_count: u64,
}

/// Hottest first; ties go to the newer comment.
pub fn rank_by_hotness(comments: &mut [Comment]) {
    comments.sort_by(|a, b| {
        b.hotness()
            .cmp(&a.hotness())
            .then(b.created_at.cmp(&a.created_at))
    });
}
