// src/application/services/moderation.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{
    capability::ensure_capability,
    comments::{clean_content, load_comment},
};
use crate::{
    application::{
        dto::{AuthenticatedUser, BatchResultDto, CommentDto, PageResult, ReportDto, SensitiveWordDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::ArticleReadRepository,
        comment::{
            CommentId, CommentReportRepository, CommentRepository, NewComment, ReportId,
            ReportResolution, ReportStatus, SensitiveWordId, SensitiveWordRepository,
            sensitive::normalize_word,
        },
        errors::DomainError,
        pagination::PageRequest,
    },
};

pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct HandleReportCommand {
    pub status: String,
    pub note: Option<String>,
    pub delete_comment: bool,
}

/// Privileged comment operations. Everything except `author_reply`
/// requires `comments:moderate`.
#[async_trait]
pub trait CommentModerationService: Send + Sync {
    async fn set_pinned(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        pinned: bool,
    ) -> ApplicationResult<CommentDto>;
    async fn set_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        featured: bool,
    ) -> ApplicationResult<CommentDto>;
    /// Reply flagged as coming from the article's author. Open to the
    /// author and to moderators.
    async fn author_reply(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        content: String,
    ) -> ApplicationResult<CommentDto>;
    async fn list_reports(
        &self,
        actor: &AuthenticatedUser,
        status: Option<String>,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ReportDto>>;
    async fn handle_report(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: HandleReportCommand,
    ) -> ApplicationResult<ReportDto>;
    async fn batch_delete(
        &self,
        actor: &AuthenticatedUser,
        ids: Vec<i64>,
    ) -> ApplicationResult<BatchResultDto>;
    async fn batch_fold(
        &self,
        actor: &AuthenticatedUser,
        ids: Vec<i64>,
        folded: bool,
    ) -> ApplicationResult<BatchResultDto>;
    async fn list_sensitive_words(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<SensitiveWordDto>>;
    async fn add_sensitive_word(
        &self,
        actor: &AuthenticatedUser,
        word: String,
    ) -> ApplicationResult<SensitiveWordDto>;
    async fn delete_sensitive_word(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<()>;
}

pub struct DefaultCommentModerationService {
    repo: Arc<dyn CommentRepository>,
    report_repo: Arc<dyn CommentReportRepository>,
    word_repo: Arc<dyn SensitiveWordRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultCommentModerationService {
    pub fn new(
        repo: Arc<dyn CommentRepository>,
        report_repo: Arc<dyn CommentReportRepository>,
        word_repo: Arc<dyn SensitiveWordRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            report_repo,
            word_repo,
            article_repo,
            clock,
        }
    }
}

fn ensure_moderator(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    ensure_capability(actor, "comments", "moderate")
}

fn batch_ids(ids: Vec<i64>) -> ApplicationResult<Vec<CommentId>> {
    if ids.is_empty() {
        return Err(ApplicationError::validation("ids cannot be empty"));
    }
    if ids.len() > MAX_BATCH_SIZE {
        return Err(ApplicationError::validation(format!(
            "at most {MAX_BATCH_SIZE} ids per batch"
        )));
    }
    let mut parsed = ids
        .into_iter()
        .map(CommentId::new)
        .collect::<Result<Vec<_>, _>>()?;
    parsed.sort_unstable();
    parsed.dedup();
    Ok(parsed)
}

#[async_trait]
impl CommentModerationService for DefaultCommentModerationService {
    async fn set_pinned(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        pinned: bool,
    ) -> ApplicationResult<CommentDto> {
        ensure_moderator(actor)?;
        let comment = load_comment(self.repo.as_ref(), id).await?;
        if !comment.is_root() {
            return Err(ApplicationError::validation("only root comments can be pinned"));
        }
        let updated = self
            .repo
            .set_pinned(comment.id, pinned, self.clock.now())
            .await?;
        info!(comment_id = comment.id.0, pinned, actor = %actor.id, "comment pin changed");
        Ok(updated.into())
    }

    async fn set_featured(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        featured: bool,
    ) -> ApplicationResult<CommentDto> {
        ensure_moderator(actor)?;
        let comment = load_comment(self.repo.as_ref(), id).await?;
        let updated = self
            .repo
            .set_featured(comment.id, featured, self.clock.now())
            .await?;
        info!(comment_id = comment.id.0, featured, actor = %actor.id, "comment feature changed");
        Ok(updated.into())
    }

    async fn author_reply(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        content: String,
    ) -> ApplicationResult<CommentDto> {
        let parent = load_comment(self.repo.as_ref(), id).await?;
        let article = self
            .article_repo
            .find_by_id(parent.article_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        if !article.is_authored_by(&actor.id) {
            ensure_moderator(actor)?;
        }

        let content = clean_content(self.word_repo.as_ref(), content).await?;
        let mut reply =
            NewComment::reply_to(&parent, actor.id.clone(), None, content, self.clock.now());
        reply.is_author_reply = true;

        let created = self.repo.insert(reply).await?;
        info!(comment_id = created.id.0, parent_id = parent.id.0, "author reply posted");
        Ok(created.into())
    }

    async fn list_reports(
        &self,
        actor: &AuthenticatedUser,
        status: Option<String>,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ReportDto>> {
        ensure_moderator(actor)?;
        let status = status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ReportStatus>)
            .transpose()?;
        let (reports, total) = self.report_repo.list(status, page).await?;
        Ok(PageResult::new(reports, total, page).map(ReportDto::from))
    }

    async fn handle_report(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: HandleReportCommand,
    ) -> ApplicationResult<ReportDto> {
        ensure_moderator(actor)?;
        let status: ReportStatus = command.status.parse()?;
        if !status.is_final() {
            return Err(ApplicationError::validation(
                "status must be handled or rejected",
            ));
        }

        let id = ReportId::new(id)?;
        let report = self
            .report_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("report not found"))?;
        if report.status.is_final() {
            return Err(ApplicationError::conflict("report was already handled"));
        }

        let resolved = self
            .report_repo
            .resolve(ReportResolution {
                id,
                status,
                handler_id: actor.id.clone(),
                note: command
                    .note
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty()),
                handled_at: self.clock.now(),
            })
            .await?;

        // The report stays resolved even when the comment vanished first.
        if command.delete_comment && status == ReportStatus::Handled {
            match self.repo.delete(report.comment_id).await {
                Ok(removed) => {
                    info!(comment_id = report.comment_id.0, removed, "reported comment deleted");
                }
                Err(DomainError::NotFound(_)) => {
                    warn!(comment_id = report.comment_id.0, "reported comment already gone");
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(report_id = id.0, status = %status, actor = %actor.id, "report handled");
        Ok(resolved.into())
    }

    async fn batch_delete(
        &self,
        actor: &AuthenticatedUser,
        ids: Vec<i64>,
    ) -> ApplicationResult<BatchResultDto> {
        ensure_moderator(actor)?;
        let ids = batch_ids(ids)?;
        let affected = self.repo.delete_many(&ids).await?;
        info!(requested = ids.len(), affected, actor = %actor.id, "comments batch deleted");
        Ok(BatchResultDto {
            requested: ids.len(),
            affected,
        })
    }

    async fn batch_fold(
        &self,
        actor: &AuthenticatedUser,
        ids: Vec<i64>,
        folded: bool,
    ) -> ApplicationResult<BatchResultDto> {
        ensure_moderator(actor)?;
        let ids = batch_ids(ids)?;
        let affected = self.repo.set_folded(&ids, folded, self.clock.now()).await?;
        info!(requested = ids.len(), affected, folded, "comments batch folded");
        Ok(BatchResultDto {
            requested: ids.len(),
            affected,
        })
    }

    async fn list_sensitive_words(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<Vec<SensitiveWordDto>> {
        ensure_moderator(actor)?;
        let words = self.word_repo.list_all().await?;
        Ok(words.into_iter().map(Into::into).collect())
    }

    async fn add_sensitive_word(
        &self,
        actor: &AuthenticatedUser,
        word: String,
    ) -> ApplicationResult<SensitiveWordDto> {
        ensure_moderator(actor)?;
        let word = normalize_word(&word)?;
        let created = self.word_repo.insert(word, self.clock.now()).await?;
        info!(word_id = created.id.0, actor = %actor.id, "sensitive word added");
        Ok(created.into())
    }

    async fn delete_sensitive_word(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<()> {
        ensure_moderator(actor)?;
        let id = SensitiveWordId::new(id)?;
        if !self.word_repo.delete(id).await? {
            return Err(ApplicationError::not_found("sensitive word not found"));
        }
        info!(word_id = id.0, actor = %actor.id, "sensitive word removed");
        Ok(())
    }
}
