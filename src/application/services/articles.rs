// src/application/services/articles.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::capability::{ensure_capability, ensure_spec};
use crate::{
    application::{
        dto::{ArticleDto, ArticleRevisionDto, AuthenticatedUser, PageResult},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{
            Article, ArticleBody, ArticleFilter, ArticleId, ArticleReadRepository,
            ArticleRevisionRepository, ArticleTitle, ArticleUpdate, ArticleWriteRepository,
            NewArticle, normalize_summary,
            services::ArticleSlugService,
            specifications::{CanDeleteArticleSpec, CanUpdateArticleSpec},
        },
        category::{CategoryId, CategoryRepository},
        pagination::PageRequest,
        topic::{TopicId, TopicRepository},
    },
};

const MAX_TOPICS_PER_ARTICLE: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct CreateArticleCommand {
    pub title: String,
    pub body: String,
    pub summary: Option<String>,
    pub category_id: Option<i64>,
    pub topic_ids: Vec<i64>,
}

/// `None` leaves a field as is. For `summary` and `category_id`,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    pub topic_ids: Option<Vec<i64>>,
}

#[async_trait]
pub trait ArticleService: Send + Sync {
    async fn list_articles(
        &self,
        filter: ArticleFilter,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ArticleDto>>;
    /// Counts as a view.
    async fn get_article(&self, id: i64) -> ApplicationResult<ArticleDto>;
    async fn list_history(&self, id: i64) -> ApplicationResult<Vec<ArticleRevisionDto>>;
    async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto>;
    async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto>;
    async fn delete_article(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
}

pub struct DefaultArticleService {
    write_repo: Arc<dyn ArticleWriteRepository>,
    read_repo: Arc<dyn ArticleReadRepository>,
    revision_repo: Arc<dyn ArticleRevisionRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    topic_repo: Arc<dyn TopicRepository>,
    slug_service: Arc<ArticleSlugService>,
    clock: Arc<dyn Clock>,
}

impl DefaultArticleService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        revision_repo: Arc<dyn ArticleRevisionRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        topic_repo: Arc<dyn TopicRepository>,
        slug_service: Arc<ArticleSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            revision_repo,
            category_repo,
            topic_repo,
            slug_service,
            clock,
        }
    }

    async fn resolve_category(&self, id: Option<i64>) -> ApplicationResult<Option<CategoryId>> {
        let Some(raw) = id else {
            return Ok(None);
        };
        let id = CategoryId::new(raw)?;
        if self.category_repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::validation(format!(
                "category {raw} does not exist"
            )));
        }
        Ok(Some(id))
    }

    async fn resolve_topics(&self, ids: Vec<i64>) -> ApplicationResult<Vec<TopicId>> {
        let mut resolved: Vec<TopicId> = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = TopicId::new(raw)?;
            if resolved.contains(&id) {
                continue;
            }
            if self.topic_repo.find_by_id(id).await?.is_none() {
                return Err(ApplicationError::validation(format!(
                    "topic {raw} does not exist"
                )));
            }
            resolved.push(id);
        }
        if resolved.len() > MAX_TOPICS_PER_ARTICLE {
            return Err(ApplicationError::validation(format!(
                "an article may carry at most {MAX_TOPICS_PER_ARTICLE} topics"
            )));
        }
        Ok(resolved)
    }

    async fn load(&self, id: ArticleId) -> ApplicationResult<Article> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))
    }
}

#[async_trait]
impl ArticleService for DefaultArticleService {
    async fn list_articles(
        &self,
        filter: ArticleFilter,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ArticleDto>> {
        let (articles, total) = self.read_repo.list_page(&filter, page).await?;
        Ok(PageResult::new(articles, total, page).map(ArticleDto::from))
    }

    async fn get_article(&self, id: i64) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;
        let mut article = self.load(id).await?;
        self.write_repo.increment_views(id).await?;
        article.view_count += 1;
        Ok(article.into())
    }

    async fn list_history(&self, id: i64) -> ApplicationResult<Vec<ArticleRevisionDto>> {
        let id = ArticleId::new(id)?;
        self.load(id).await?;
        let revisions = self.revision_repo.list_by_article(id).await?;
        Ok(revisions.into_iter().map(Into::into).collect())
    }

    async fn create_article(
        &self,
        actor: &AuthenticatedUser,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;

        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let summary = normalize_summary(command.summary)?;
        let category_id = self.resolve_category(command.category_id).await?;
        let topic_ids = self.resolve_topics(command.topic_ids).await?;
        let now = self.clock.now();

        let slug = self.slug_service.generate_unique_slug(&title, None).await?;

        let created = self
            .write_repo
            .insert(NewArticle {
                title,
                slug,
                summary,
                body,
                author_id: actor.id.clone(),
                category_id,
                topic_ids,
                created_at: now,
                updated_at: now,
            })
            .await?;
        self.revision_repo.append(&created, &actor.id).await?;

        info!(article_id = created.id.0, author = %actor.id, "article created");
        Ok(created.into())
    }

    async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(id)?;
        let article = self.load(id).await?;
        ensure_spec(
            &CanUpdateArticleSpec::new(&actor.capabilities, &article, &actor.id),
            "insufficient privileges to update article",
        )?;

        let mut update = ArticleUpdate::new(id, self.clock.now());
        if let Some(title) = command.title {
            let title = ArticleTitle::new(title)?;
            if title != article.title {
                let slug = self
                    .slug_service
                    .generate_unique_slug(&title, Some(id))
                    .await?;
                update = update.with_title(title).with_slug(slug);
            }
        }
        if let Some(body) = command.body {
            update = update.with_body(ArticleBody::new(body)?);
        }
        if let Some(summary) = command.summary {
            update = update.with_summary(normalize_summary(summary)?);
        }
        if let Some(category_id) = command.category_id {
            update = update.with_category(self.resolve_category(category_id).await?);
        }
        if let Some(topic_ids) = command.topic_ids {
            update = update.with_topics(self.resolve_topics(topic_ids).await?);
        }

        if update.is_empty() {
            return Ok(article.into());
        }

        let updated = self.write_repo.update(update).await?;
        self.revision_repo.append(&updated, &actor.id).await?;

        info!(article_id = updated.id.0, editor = %actor.id, "article updated");
        Ok(updated.into())
    }

    async fn delete_article(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let id = ArticleId::new(id)?;
        let article = self.load(id).await?;
        ensure_spec(
            &CanDeleteArticleSpec::new(&actor.capabilities, &article, &actor.id),
            "insufficient privileges to delete article",
        )?;

        self.write_repo.delete(id).await?;
        info!(article_id = id.0, actor = %actor.id, "article deleted");
        Ok(())
    }
}
