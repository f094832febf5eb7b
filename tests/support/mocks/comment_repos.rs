// tests/support/mocks/comment_repos.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use inkwell::domain::article::ArticleId;
use inkwell::domain::comment::{
    Comment, CommentId, CommentReportRepository, CommentRepository, CommentStats, NewComment,
    NewReport, ReactionKind, Report, ReportId, ReportResolution, ReportStatus, SensitiveWord,
    SensitiveWordId, SensitiveWordRepository, rank_by_hotness,
};
use inkwell::domain::errors::{DomainError, DomainResult};
use inkwell::domain::pagination::PageRequest;
use inkwell::domain::user::UserId;

use super::store::{MemoryStore, Tables, paginate};

fn oldest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

fn adjust_replies(tables: &mut Tables, id: CommentId, delta: i64) {
    if let Some(comment) = tables.comments.iter_mut().find(|c| c.id == id) {
        comment.reply_count = (comment.reply_count + delta).max(0);
    }
}

fn delete_subtree(tables: &mut Tables, id: CommentId) -> u64 {
    let Some(target) = tables.comments.iter().find(|c| c.id == id).cloned() else {
        return 0;
    };

    let mut doomed = vec![id];
    let mut cursor = 0;
    while cursor < doomed.len() {
        let current = doomed[cursor];
        doomed.extend(
            tables
                .comments
                .iter()
                .filter(|c| c.parent_id == Some(current))
                .map(|c| c.id),
        );
        cursor += 1;
    }

    tables.comments.retain(|c| !doomed.contains(&c.id));
    let removed = doomed.len() as u64;

    if let (Some(parent_id), Some(root_id)) = (target.parent_id, target.root_id) {
        adjust_replies(tables, root_id, -(removed as i64));
        if parent_id != root_id {
            adjust_replies(tables, parent_id, -1);
        }
    }
    removed
}

fn set_flag(
    tables: &mut Tables,
    id: CommentId,
    at: DateTime<Utc>,
    apply: impl FnOnce(&mut Comment),
) -> DomainResult<Comment> {
    let comment = tables
        .comments
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| DomainError::not_found("comment not found"))?;
    apply(comment);
    comment.updated_at = at;
    Ok(comment.clone())
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let mut tables = self.tables();
        let created = Comment {
            id: CommentId(tables.next_id("comments")),
            article_id: comment.article_id,
            user_id: comment.user_id,
            parent_id: comment.parent_id,
            root_id: comment.root_id,
            reply_to_user_id: comment.reply_to_user_id,
            content: comment.content,
            like_count: 0,
            dislike_count: 0,
            reply_count: 0,
            is_pinned: false,
            is_featured: false,
            is_author_reply: comment.is_author_reply,
            is_folded: false,
            created_at: comment.created_at,
            updated_at: comment.created_at,
        };
        if let (Some(parent_id), Some(root_id)) = (created.parent_id, created.root_id) {
            adjust_replies(&mut tables, parent_id, 1);
            if parent_id != root_id {
                adjust_replies(&mut tables, root_id, 1);
            }
        }
        tables.comments.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        Ok(self.tables().comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_roots(
        &self,
        article_id: ArticleId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        let mut roots: Vec<Comment> = self
            .tables()
            .comments
            .iter()
            .filter(|c| c.article_id == article_id && c.is_root())
            .cloned()
            .collect();
        roots.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(paginate(roots, page))
    }

    async fn list_replies(
        &self,
        id: CommentId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        let mut replies: Vec<Comment> = self
            .tables()
            .comments
            .iter()
            .filter(|c| c.root_id == Some(id) || c.parent_id == Some(id))
            .cloned()
            .collect();
        oldest_first(&mut replies);
        Ok(paginate(replies, page))
    }

    async fn list_thread_replies(&self, root_ids: &[CommentId]) -> DomainResult<Vec<Comment>> {
        let mut replies: Vec<Comment> = self
            .tables()
            .comments
            .iter()
            .filter(|c| c.root_id.is_some_and(|root| root_ids.contains(&root)))
            .cloned()
            .collect();
        oldest_first(&mut replies);
        Ok(replies)
    }

    async fn list_hot(&self, article_id: ArticleId, limit: u32) -> DomainResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .tables()
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        rank_by_hotness(&mut comments);
        comments.truncate(limit as usize);
        Ok(comments)
    }

    async fn stats(&self, article_id: ArticleId) -> DomainResult<CommentStats> {
        let tables = self.tables();
        let on_article = tables.comments.iter().filter(|c| c.article_id == article_id);
        let total = on_article.clone().count() as u64;
        let root_count = on_article.filter(|c| c.is_root()).count() as u64;
        Ok(CommentStats {
            total,
            root_count,
            reply_count: total - root_count,
        })
    }

    async fn delete(&self, id: CommentId) -> DomainResult<u64> {
        match delete_subtree(&mut self.tables(), id) {
            0 => Err(DomainError::not_found("comment not found")),
            removed => Ok(removed),
        }
    }

    async fn delete_many(&self, ids: &[CommentId]) -> DomainResult<u64> {
        let mut tables = self.tables();
        Ok(ids.iter().map(|id| delete_subtree(&mut tables, *id)).sum())
    }

    async fn set_pinned(
        &self,
        id: CommentId,
        pinned: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        set_flag(&mut self.tables(), id, at, |c| c.is_pinned = pinned)
    }

    async fn set_featured(
        &self,
        id: CommentId,
        featured: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        set_flag(&mut self.tables(), id, at, |c| c.is_featured = featured)
    }

    async fn set_folded(
        &self,
        ids: &[CommentId],
        folded: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        let mut tables = self.tables();
        let mut affected = 0;
        for comment in tables.comments.iter_mut().filter(|c| ids.contains(&c.id)) {
            comment.is_folded = folded;
            comment.updated_at = at;
            affected += 1;
        }
        Ok(affected)
    }

    async fn add_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool> {
        let mut tables = self.tables();
        let key = (id.0, user_id.to_string(), kind.as_str());
        if tables.reactions.contains(&key) {
            return Ok(false);
        }
        tables.reactions.push(key);
        if let Some(comment) = tables.comments.iter_mut().find(|c| c.id == id) {
            match kind {
                ReactionKind::Like => comment.like_count += 1,
                ReactionKind::Dislike => comment.dislike_count += 1,
            }
        }
        Ok(true)
    }

    async fn remove_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool> {
        let mut tables = self.tables();
        let key = (id.0, user_id.to_string(), kind.as_str());
        let before = tables.reactions.len();
        tables.reactions.retain(|r| r != &key);
        if tables.reactions.len() == before {
            return Ok(false);
        }
        if let Some(comment) = tables.comments.iter_mut().find(|c| c.id == id) {
            match kind {
                ReactionKind::Like => comment.like_count -= 1,
                ReactionKind::Dislike => comment.dislike_count -= 1,
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl CommentReportRepository for MemoryStore {
    async fn insert(&self, report: NewReport) -> DomainResult<Report> {
        let mut tables = self.tables();
        let created = Report {
            id: ReportId(tables.next_id("reports")),
            comment_id: report.comment_id,
            reporter_id: report.reporter_id,
            reason: report.reason,
            status: ReportStatus::Pending,
            handler_id: None,
            handler_note: None,
            created_at: report.created_at,
            handled_at: None,
        };
        tables.reports.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ReportId) -> DomainResult<Option<Report>> {
        Ok(self.tables().reports.iter().find(|r| r.id == id).cloned())
    }

    async fn has_pending(&self, comment_id: CommentId, reporter_id: &UserId) -> DomainResult<bool> {
        Ok(self.tables().reports.iter().any(|r| {
            r.comment_id == comment_id
                && &r.reporter_id == reporter_id
                && r.status == ReportStatus::Pending
        }))
    }

    async fn list(
        &self,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> DomainResult<(Vec<Report>, u64)> {
        let mut reports: Vec<Report> = self
            .tables()
            .reports
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(paginate(reports, page))
    }

    async fn resolve(&self, resolution: ReportResolution) -> DomainResult<Report> {
        let mut tables = self.tables();
        let report = tables
            .reports
            .iter_mut()
            .find(|r| r.id == resolution.id)
            .ok_or_else(|| DomainError::not_found("report not found"))?;
        if report.status != ReportStatus::Pending {
            return Err(DomainError::conflict("report was already handled"));
        }
        report.status = resolution.status;
        report.handler_id = Some(resolution.handler_id);
        report.handler_note = resolution.note;
        report.handled_at = Some(resolution.handled_at);
        Ok(report.clone())
    }
}

#[async_trait]
impl SensitiveWordRepository for MemoryStore {
    async fn list_all(&self) -> DomainResult<Vec<SensitiveWord>> {
        Ok(self.tables().words.clone())
    }

    async fn insert(&self, word: String, created_at: DateTime<Utc>) -> DomainResult<SensitiveWord> {
        let mut tables = self.tables();
        if tables.words.iter().any(|w| w.word.eq_ignore_ascii_case(&word)) {
            return Err(DomainError::conflict("sensitive word already exists"));
        }
        let created = SensitiveWord {
            id: SensitiveWordId(tables.next_id("words")),
            word,
            created_at,
        };
        tables.words.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: SensitiveWordId) -> DomainResult<bool> {
        let mut tables = self.tables();
        let before = tables.words.len();
        tables.words.retain(|w| w.id != id);
        Ok(tables.words.len() != before)
    }
}

/// Comment repository where another writer always removes the comment just
/// before our own delete lands.
#[derive(Clone)]
pub struct RacedCommentDeletes(pub MemoryStore);

#[async_trait]
impl CommentRepository for RacedCommentDeletes {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        CommentRepository::insert(&self.0, comment).await
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        CommentRepository::find_by_id(&self.0, id).await
    }

    async fn list_roots(
        &self,
        article_id: ArticleId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        self.0.list_roots(article_id, page).await
    }

    async fn list_replies(
        &self,
        id: CommentId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Comment>, u64)> {
        self.0.list_replies(id, page).await
    }

    async fn list_thread_replies(&self, root_ids: &[CommentId]) -> DomainResult<Vec<Comment>> {
        self.0.list_thread_replies(root_ids).await
    }

    async fn list_hot(&self, article_id: ArticleId, limit: u32) -> DomainResult<Vec<Comment>> {
        CommentRepository::list_hot(&self.0, article_id, limit).await
    }

    async fn stats(&self, article_id: ArticleId) -> DomainResult<CommentStats> {
        self.0.stats(article_id).await
    }

    async fn delete(&self, id: CommentId) -> DomainResult<u64> {
        CommentRepository::delete(&self.0, id).await?;
        CommentRepository::delete(&self.0, id).await
    }

    async fn delete_many(&self, ids: &[CommentId]) -> DomainResult<u64> {
        self.0.delete_many(ids).await
    }

    async fn set_pinned(
        &self,
        id: CommentId,
        pinned: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        self.0.set_pinned(id, pinned, at).await
    }

    async fn set_featured(
        &self,
        id: CommentId,
        featured: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<Comment> {
        self.0.set_featured(id, featured, at).await
    }

    async fn set_folded(
        &self,
        ids: &[CommentId],
        folded: bool,
        at: DateTime<Utc>,
    ) -> DomainResult<u64> {
        self.0.set_folded(ids, folded, at).await
    }

    async fn add_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool> {
        self.0.add_reaction(id, user_id, kind).await
    }

    async fn remove_reaction(
        &self,
        id: CommentId,
        user_id: &UserId,
        kind: ReactionKind,
    ) -> DomainResult<bool> {
        self.0.remove_reaction(id, user_id, kind).await
    }
}
