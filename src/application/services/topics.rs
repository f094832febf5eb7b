// src/application/services/topics.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::capability::ensure_capability;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, PageResult, TopicDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleFilter, ArticleReadRepository},
        pagination::PageRequest,
        topic::{NewTopic, Topic, TopicId, TopicName, TopicRepository, rank_by_hotness},
    },
};

#[derive(Debug, Clone, Default)]
pub struct CreateTopicCommand {
    pub name: String,
    pub description: Option<String>,
}

#[async_trait]
pub trait TopicService: Send + Sync {
    async fn hot_topics(&self, limit: u32) -> ApplicationResult<Vec<TopicDto>>;
    async fn get_topic(&self, id: i64) -> ApplicationResult<TopicDto>;
    async fn list_topic_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ArticleDto>>;
    async fn create_topic(
        &self,
        actor: &AuthenticatedUser,
        command: CreateTopicCommand,
    ) -> ApplicationResult<TopicDto>;
    /// Following twice is a no-op.
    async fn follow_topic(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
    async fn unfollow_topic(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
}

pub struct DefaultTopicService {
    repo: Arc<dyn TopicRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultTopicService {
    pub fn new(
        repo: Arc<dyn TopicRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            article_repo,
            clock,
        }
    }

    async fn load(&self, id: i64) -> ApplicationResult<Topic> {
        let id = TopicId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("topic not found"))
    }
}

#[async_trait]
impl TopicService for DefaultTopicService {
    async fn hot_topics(&self, limit: u32) -> ApplicationResult<Vec<TopicDto>> {
        let mut topics = self.repo.list_hot(limit).await?;
        rank_by_hotness(&mut topics);
        Ok(topics.into_iter().map(Into::into).collect())
    }

    async fn get_topic(&self, id: i64) -> ApplicationResult<TopicDto> {
        Ok(self.load(id).await?.into())
    }

    async fn list_topic_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ArticleDto>> {
        let topic = self.load(id).await?;
        let filter = ArticleFilter {
            topic_id: Some(topic.id),
            ..ArticleFilter::default()
        };
        let (articles, total) = self.article_repo.list_page(&filter, page).await?;
        Ok(PageResult::new(articles, total, page).map(ArticleDto::from))
    }

    async fn create_topic(
        &self,
        actor: &AuthenticatedUser,
        command: CreateTopicCommand,
    ) -> ApplicationResult<TopicDto> {
        ensure_capability(actor, "topics", "create")?;

        let name = TopicName::new(command.name)?;
        if self.repo.find_by_name(&name).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "topic '{}' already exists",
                name.as_str()
            )));
        }

        let created = self
            .repo
            .insert(NewTopic {
                name,
                description: command
                    .description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
                creator_id: actor.id.clone(),
                created_at: self.clock.now(),
            })
            .await?;

        info!(topic_id = created.id.0, actor = %actor.id, "topic created");
        Ok(created.into())
    }

    async fn follow_topic(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let topic = self.load(id).await?;
        let changed = self.repo.follow(topic.id, &actor.id).await?;
        debug!(topic_id = topic.id.0, user = %actor.id, changed, "follow topic");
        Ok(())
    }

    async fn unfollow_topic(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let topic = self.load(id).await?;
        let changed = self.repo.unfollow(topic.id, &actor.id).await?;
        debug!(topic_id = topic.id.0, user = %actor.id, changed, "unfollow topic");
        Ok(())
    }
}
