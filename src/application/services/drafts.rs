// src/application/services/drafts.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::{
    articles::{ArticleService, CreateArticleCommand, UpdateArticleCommand},
    capability::ensure_spec,
};
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, DraftDto, PageResult},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{
            ArticleId, ArticleReadRepository, normalize_summary,
            specifications::CanUpdateArticleSpec,
        },
        category::CategoryId,
        draft::{Draft, DraftId, DraftRepository, DraftUpdate, NewDraft},
        errors::DomainError,
        pagination::PageRequest,
        topic::TopicId,
    },
};

const MAX_DRAFT_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct SaveDraftCommand {
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub category_id: Option<i64>,
    pub topic_ids: Vec<i64>,
    pub article_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDraftCommand {
    pub title: Option<String>,
    pub summary: Option<Option<String>>,
    pub body: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub topic_ids: Option<Vec<i64>>,
}

/// Drafts are private: another user's draft reads as missing.
#[async_trait]
pub trait DraftService: Send + Sync {
    async fn save_draft(
        &self,
        actor: &AuthenticatedUser,
        command: SaveDraftCommand,
    ) -> ApplicationResult<DraftDto>;
    async fn list_drafts(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<DraftDto>>;
    async fn get_draft(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<DraftDto>;
    async fn update_draft(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateDraftCommand,
    ) -> ApplicationResult<DraftDto>;
    /// Creates or updates the article and removes the draft.
    async fn publish_draft(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<ArticleDto>;
    async fn delete_draft(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
}

pub struct DefaultDraftService {
    repo: Arc<dyn DraftRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    articles: Arc<dyn ArticleService>,
    clock: Arc<dyn Clock>,
}

impl DefaultDraftService {
    pub fn new(
        repo: Arc<dyn DraftRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        articles: Arc<dyn ArticleService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            article_repo,
            articles,
            clock,
        }
    }

    async fn load_owned(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<Draft> {
        let id = DraftId::new(id)?;
        match self.repo.find_by_id(id).await? {
            Some(draft) if draft.is_owned_by(&actor.id) => Ok(draft),
            _ => Err(ApplicationError::not_found("draft not found")),
        }
    }
}

fn draft_title(title: String) -> ApplicationResult<String> {
    let trimmed = title.trim();
    if trimmed.chars().count() > MAX_DRAFT_TITLE_LEN {
        return Err(ApplicationError::validation(format!(
            "title must be at most {MAX_DRAFT_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn category(id: Option<i64>) -> Result<Option<CategoryId>, DomainError> {
    id.map(CategoryId::new).transpose()
}

fn topics(ids: Vec<i64>) -> Result<Vec<TopicId>, DomainError> {
    ids.into_iter().map(TopicId::new).collect()
}

#[async_trait]
impl DraftService for DefaultDraftService {
    async fn save_draft(
        &self,
        actor: &AuthenticatedUser,
        command: SaveDraftCommand,
    ) -> ApplicationResult<DraftDto> {
        let article_id = match command.article_id {
            Some(raw) => {
                let id = ArticleId::new(raw)?;
                let article = self
                    .article_repo
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("article not found"))?;
                ensure_spec(
                    &CanUpdateArticleSpec::new(&actor.capabilities, &article, &actor.id),
                    "insufficient privileges to edit article",
                )?;
                Some(id)
            }
            None => None,
        };

        let now = self.clock.now();
        let draft = self
            .repo
            .insert(NewDraft {
                owner_id: actor.id.clone(),
                title: draft_title(command.title)?,
                summary: normalize_summary(command.summary)?,
                body: command.body,
                category_id: category(command.category_id)?,
                topic_ids: topics(command.topic_ids)?,
                article_id,
                created_at: now,
            })
            .await?;
        Ok(draft.into())
    }

    async fn list_drafts(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<DraftDto>> {
        let (drafts, total) = self.repo.list_by_owner(&actor.id, page).await?;
        Ok(PageResult::new(drafts, total, page).map(DraftDto::from))
    }

    async fn get_draft(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<DraftDto> {
        Ok(self.load_owned(actor, id).await?.into())
    }

    async fn update_draft(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateDraftCommand,
    ) -> ApplicationResult<DraftDto> {
        let draft = self.load_owned(actor, id).await?;
        let update = DraftUpdate {
            id: draft.id,
            title: command.title.map(draft_title).transpose()?,
            summary: command.summary.map(normalize_summary).transpose()?,
            body: command.body,
            category_id: command.category_id.map(category).transpose()?,
            topic_ids: command.topic_ids.map(topics).transpose()?,
            updated_at: self.clock.now(),
        };
        Ok(self.repo.update(update).await?.into())
    }

    async fn publish_draft(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<ArticleDto> {
        let draft = self.load_owned(actor, id).await?;
        let category_id = draft.category_id.map(i64::from);
        let topic_ids: Vec<i64> = draft.topic_ids.iter().copied().map(i64::from).collect();

        let article = match draft.article_id {
            Some(article_id) => {
                self.articles
                    .update_article(
                        actor,
                        article_id.into(),
                        UpdateArticleCommand {
                            title: Some(draft.title),
                            body: Some(draft.body),
                            summary: Some(draft.summary),
                            category_id: Some(category_id),
                            topic_ids: Some(topic_ids),
                        },
                    )
                    .await?
            }
            None => {
                self.articles
                    .create_article(
                        actor,
                        CreateArticleCommand {
                            title: draft.title,
                            body: draft.body,
                            summary: draft.summary,
                            category_id,
                            topic_ids,
                        },
                    )
                    .await?
            }
        };

        self.repo.delete(draft.id).await?;
        info!(draft_id = draft.id.0, article_id = article.id, "draft published");
        Ok(article)
    }

    async fn delete_draft(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let draft = self.load_owned(actor, id).await?;
        self.repo.delete(draft.id).await?;
        Ok(())
    }
}
