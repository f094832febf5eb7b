// src/application/services/comments.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::capability::ensure_spec;
use crate::{
    application::{
        dto::{
            AuthenticatedUser, CommentDto, CommentStatsDto, CommentThreadDto, PageResult,
            ReportDto,
        },
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        comment::{
            Comment, CommentContent, CommentId, CommentReportRepository, CommentRepository,
            NewComment, NewReport, ReactionKind, SensitiveWordFilter, SensitiveWordRepository,
            build_threads, rank_by_hotness, report::validate_reason,
            specifications::CanDeleteCommentSpec,
        },
        errors::DomainResult,
        pagination::PageRequest,
        user::UserId,
    },
};

#[derive(Debug, Clone, Default)]
pub struct CreateCommentCommand {
    pub article_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ReplyCommentCommand {
    pub content: String,
    pub reply_to_user_id: Option<String>,
}

#[async_trait]
pub trait CommentService: Send + Sync {
    async fn get_comment(&self, id: i64) -> ApplicationResult<CommentDto>;
    /// Pinned first, then newest.
    async fn list_root_comments(
        &self,
        article_id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<CommentDto>>;
    /// Oldest first.
    async fn list_replies(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<CommentDto>>;
    /// Roots are paged; each carries its whole thread.
    async fn comment_tree(
        &self,
        article_id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<CommentThreadDto>>;
    async fn hot_comments(&self, article_id: i64, limit: u32)
    -> ApplicationResult<Vec<CommentDto>>;
    async fn comment_stats(&self, article_id: i64) -> ApplicationResult<CommentStatsDto>;
    async fn create_comment(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto>;
    async fn reply_comment(
        &self,
        actor: &AuthenticatedUser,
        parent_id: i64,
        command: ReplyCommentCommand,
    ) -> ApplicationResult<CommentDto>;
    async fn delete_comment(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
    async fn add_reaction(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        kind: ReactionKind,
    ) -> ApplicationResult<()>;
    async fn remove_reaction(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        kind: ReactionKind,
    ) -> ApplicationResult<()>;
    async fn report_comment(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        reason: String,
    ) -> ApplicationResult<ReportDto>;
}

pub struct DefaultCommentService {
    repo: Arc<dyn CommentRepository>,
    report_repo: Arc<dyn CommentReportRepository>,
    word_repo: Arc<dyn SensitiveWordRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultCommentService {
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

    async fn ensure_article(&self, article_id: i64) -> ApplicationResult<ArticleId> {
        let id = ArticleId::new(article_id)?;
        if self.article_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }
        Ok(id)
    }

    async fn load(&self, id: i64) -> ApplicationResult<Comment> {
        load_comment(self.repo.as_ref(), id).await
    }
}

pub(super) async fn load_comment(
    repo: &dyn CommentRepository,
    id: i64,
) -> ApplicationResult<Comment> {
    let id = CommentId::new(id)?;
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("comment not found"))
}

/// Validates comment text and masks every configured sensitive word.
pub(super) async fn clean_content(
    words: &dyn SensitiveWordRepository,
    content: String,
) -> DomainResult<String> {
    let content = CommentContent::new(content)?;
    let filter = SensitiveWordFilter::new(words.list_all().await?.into_iter().map(|w| w.word));
    Ok(filter.mask(content.as_str()))
}

#[async_trait]
impl CommentService for DefaultCommentService {
    async fn get_comment(&self, id: i64) -> ApplicationResult<CommentDto> {
        Ok(self.load(id).await?.into())
    }

    async fn list_root_comments(
        &self,
        article_id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<CommentDto>> {
        let article_id = self.ensure_article(article_id).await?;
        let (roots, total) = self.repo.list_roots(article_id, page).await?;
        Ok(PageResult::new(roots, total, page).map(CommentDto::from))
    }

    async fn list_replies(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<CommentDto>> {
        let comment = self.load(id).await?;
        let (replies, total) = self.repo.list_replies(comment.id, page).await?;
        Ok(PageResult::new(replies, total, page).map(CommentDto::from))
    }

    async fn comment_tree(
        &self,
        article_id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<CommentThreadDto>> {
        let article_id = self.ensure_article(article_id).await?;
        let (roots, total) = self.repo.list_roots(article_id, page).await?;
        let root_ids: Vec<CommentId> = roots.iter().map(|c| c.id).collect();
        let replies = if root_ids.is_empty() {
            Vec::new()
        } else {
            self.repo.list_thread_replies(&root_ids).await?
        };
        let threads = build_threads(roots, replies);
        Ok(PageResult::new(threads, total, page).map(CommentThreadDto::from))
    }

    async fn hot_comments(
        &self,
        article_id: i64,
        limit: u32,
    ) -> ApplicationResult<Vec<CommentDto>> {
        let article_id = self.ensure_article(article_id).await?;
        let mut comments = self.repo.list_hot(article_id, limit).await?;
        rank_by_hotness(&mut comments);
        Ok(comments.into_iter().map(Into::into).collect())
    }

    async fn comment_stats(&self, article_id: i64) -> ApplicationResult<CommentStatsDto> {
        let article_id = self.ensure_article(article_id).await?;
        let stats = self.repo.stats(article_id).await?;
        Ok(CommentStatsDto::new(article_id, stats))
    }

    async fn create_comment(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let article_id = self.ensure_article(command.article_id).await?;
        let content = clean_content(self.word_repo.as_ref(), command.content).await?;

        let created = self
            .repo
            .insert(NewComment::root(
                article_id,
                actor.id.clone(),
                content,
                self.clock.now(),
            ))
            .await?;
        debug!(comment_id = created.id.0, article_id = article_id.0, "comment created");
        Ok(created.into())
    }

    async fn reply_comment(
        &self,
        actor: &AuthenticatedUser,
        parent_id: i64,
        command: ReplyCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let parent = self.load(parent_id).await?;
        let reply_to = command.reply_to_user_id.map(UserId::new).transpose()?;
        let content = clean_content(self.word_repo.as_ref(), command.content).await?;

        let created = self
            .repo
            .insert(NewComment::reply_to(
                &parent,
                actor.id.clone(),
                reply_to,
                content,
                self.clock.now(),
            ))
            .await?;
        debug!(comment_id = created.id.0, parent_id = parent.id.0, "reply created");
        Ok(created.into())
    }

    async fn delete_comment(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let comment = self.load(id).await?;
        ensure_spec(
            &CanDeleteCommentSpec::new(&actor.capabilities, &comment, &actor.id),
            "insufficient privileges to delete comment",
        )?;

        let removed = self.repo.delete(comment.id).await?;
        info!(comment_id = comment.id.0, actor = %actor.id, removed, "comment deleted");
        Ok(())
    }

    async fn add_reaction(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        kind: ReactionKind,
    ) -> ApplicationResult<()> {
        let comment = self.load(id).await?;
        let changed = self.repo.add_reaction(comment.id, &actor.id, kind).await?;
        debug!(comment_id = comment.id.0, kind = kind.as_str(), changed, "reaction added");
        Ok(())
    }

    async fn remove_reaction(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        kind: ReactionKind,
    ) -> ApplicationResult<()> {
        let comment = self.load(id).await?;
        let changed = self
            .repo
            .remove_reaction(comment.id, &actor.id, kind)
            .await?;
        debug!(comment_id = comment.id.0, kind = kind.as_str(), changed, "reaction removed");
        Ok(())
    }

    async fn report_comment(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        reason: String,
    ) -> ApplicationResult<ReportDto> {
        let comment = self.load(id).await?;
        if comment.is_owned_by(&actor.id) {
            return Err(ApplicationError::validation(
                "you cannot report your own comment",
            ));
        }
        let reason = validate_reason(&reason)?;
        if self.report_repo.has_pending(comment.id, &actor.id).await? {
            return Err(ApplicationError::conflict(
                "you already have a pending report for this comment",
            ));
        }

        let report = self
            .report_repo
            .insert(NewReport {
                comment_id: comment.id,
                reporter_id: actor.id.clone(),
                reason,
                created_at: self.clock.now(),
            })
            .await?;
        info!(report_id = report.id.0, comment_id = comment.id.0, "comment reported");
        Ok(report.into())
    }
}
