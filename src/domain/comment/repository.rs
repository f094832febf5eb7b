use crate::domain::article::ArticleId;
use crate::domain::comment::entity::{Comment, CommentId, CommentStats, NewComment, ReactionKind};
use crate::domain::comment::report::{NewReport, Report, ReportId, ReportResolution, ReportStatus};
use crate::domain::comment::sensitive::{SensitiveWord, SensitiveWordId};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Inserting a reply also bumps the parent's and the root's reply counters.
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>>;
    /// Pinned first, then newest.
    async fn list_roots(
        &self,
        article_id: ArticleId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)>;
    /// Replies in the thread of a root, or direct replies of a nested comment. Oldest first.
    async fn list_replies(
        &self,
        id: CommentId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)>;
    async fn list_thread_replies(&self, root_ids: &[CommentId]) -> DomainResult<Vec<Comment>>;
    async fn list_hot(&self, article_id: ArticleId, limit: u32) -> DomainResult<Vec<Comment>>;
    async fn stats(&self, article_id: ArticleId) -> DomainResult<CommentStats>;
    /// Removes the comment and everything beneath it. Returns how many rows went.
    async fn delete(&self, id: CommentId) -> DomainResult<u64>;
    async fn delete_many(&self, ids: &[CommentId]) -> DomainResult<u64>;
    async fn set_pinned(
        &self,
        id: CommentId,
        pinned: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment>;
    async fn set_featured(
        &self,
        id: CommentId,
        featured: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment>;
    async fn set_folded(
        &self,
        ids: &[CommentId],
        folded: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<u64>;
    /// Returns `false` when the reaction already existed.
    async fn add_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool>;
    /// Returns `false` when there was nothing to remove.
    async fn remove_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool>;
}

#[async_trait]
pub trait CommentReportRepository: Send + Sync {
    async fn insert(&self, report: NewReport) -> DomainResult<Report>;
    async fn find_by_id(&self, id: ReportId) -> DomainResult<Option<Report>>;
    async fn has_pending(&self, comment_id: CommentId, reporter_id: &UserId) -> DomainResult<bool>;
    /// Newest first.
    async fn list(
        &self,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> DomainResult<(Vec<Report>, u64)>;
    async fn resolve(&self, resolution: ReportResolution) -> DomainResult<Report>;
}

#[async_trait]
pub trait SensitiveWordRepository: Send + Sync {
    async fn list_all(&self) -> DomainResult<Vec<SensitiveWord>>;
    async fn insert(&self, word: String, created_at: DateTime<Utc>) -> DomainResult<SensitiveWord>;
    /// Returns `false` when no such word existed.
    async fn delete(&self, id: SensitiveWordId) -> DomainResult<bool>;
}
