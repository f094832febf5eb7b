// src/application/services/columns.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::capability::{ensure_capability, ensure_spec};
use crate::{
    application::{
        dto::{AuthenticatedUser, ColumnArticleDto, ColumnDto, ColumnEntryDto, PageResult},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        article::{ArticleId, ArticleReadRepository},
        column::{
            CanManageColumnSpec, Column, ColumnEntry, ColumnEntryRepository, ColumnId,
            ColumnName, ColumnRepository, ColumnUpdate, NewColumn, next_sort,
            normalize_cover_url, normalize_description,
        },
        pagination::PageRequest,
        user::UserId,
    },
};

#[derive(Debug, Clone, Default)]
pub struct CreateColumnCommand {
    pub name: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateColumnCommand {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub cover_url: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct AddColumnArticleCommand {
    pub article_id: i64,
    pub sort: Option<i32>,
}

#[async_trait]
pub trait ColumnService: Send + Sync {
    async fn list_columns(&self, page: PageRequest) -> ApplicationResult<PageResult<ColumnDto>>;
    async fn get_column(&self, id: i64) -> ApplicationResult<ColumnDto>;
    /// Most subscribed first.
    async fn hot_columns(&self, limit: u32) -> ApplicationResult<Vec<ColumnDto>>;
    async fn list_user_columns(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnDto>>;
    /// Ordered by sort key.
    async fn list_column_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnArticleDto>>;
    async fn create_column(
        &self,
        actor: &AuthenticatedUser,
        command: CreateColumnCommand,
    ) -> ApplicationResult<ColumnDto>;
    async fn update_column(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateColumnCommand,
    ) -> ApplicationResult<ColumnDto>;
    async fn delete_column(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
    async fn subscribe(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
    async fn unsubscribe(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()>;
    async fn list_subscribed(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnDto>>;
    async fn add_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: AddColumnArticleCommand,
    ) -> ApplicationResult<ColumnEntryDto>;
    async fn remove_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        article_id: i64,
    ) -> ApplicationResult<()>;
    async fn reposition_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        article_id: i64,
        sort: i32,
    ) -> ApplicationResult<ColumnEntryDto>;
}

pub struct DefaultColumnService {
    repo: Arc<dyn ColumnRepository>,
    entry_repo: Arc<dyn ColumnEntryRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    clock: Arc<dyn Clock>,
}

impl DefaultColumnService {
    pub fn new(
        repo: Arc<dyn ColumnRepository>,
        entry_repo: Arc<dyn ColumnEntryRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            entry_repo,
            article_repo,
            clock,
        }
    }

    async fn load(&self, id: i64) -> ApplicationResult<Column> {
        let id = ColumnId::new(id)?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("column not found"))
    }

    async fn load_managed(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<Column> {
        let column = self.load(id).await?;
        ensure_spec(
            &CanManageColumnSpec::new(&actor.capabilities, &column, &actor.id),
            "insufficient privileges to manage column",
        )?;
        Ok(column)
    }
}

#[async_trait]
impl ColumnService for DefaultColumnService {
    async fn list_columns(&self, page: PageRequest) -> ApplicationResult<PageResult<ColumnDto>> {
        let (columns, total) = self.repo.list_page(page).await?;
        Ok(PageResult::new(columns, total, page).map(ColumnDto::from))
    }

    async fn get_column(&self, id: i64) -> ApplicationResult<ColumnDto> {
        Ok(self.load(id).await?.into())
    }

    async fn hot_columns(&self, limit: u32) -> ApplicationResult<Vec<ColumnDto>> {
        let columns = self.repo.list_hot(limit).await?;
        Ok(columns.into_iter().map(Into::into).collect())
    }

    async fn list_user_columns(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnDto>> {
        let owner = UserId::new(user_id)?;
        let (columns, total) = self.repo.list_by_owner(&owner, page).await?;
        Ok(PageResult::new(columns, total, page).map(ColumnDto::from))
    }

    async fn list_column_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnArticleDto>> {
        let column = self.load(id).await?;
        let (entries, total) = self.entry_repo.list_articles(column.id, page).await?;
        Ok(PageResult::new(entries, total, page).map(ColumnArticleDto::from))
    }

    async fn create_column(
        &self,
        actor: &AuthenticatedUser,
        command: CreateColumnCommand,
    ) -> ApplicationResult<ColumnDto> {
        if !actor.has_capability("columns", "manage:any") {
            ensure_capability(actor, "columns", "manage:own")?;
        }

        let created = self
            .repo
            .insert(NewColumn {
                owner_id: actor.id.clone(),
                name: ColumnName::new(command.name)?,
                description: normalize_description(command.description)?,
                cover_url: normalize_cover_url(command.cover_url)?,
                created_at: self.clock.now(),
            })
            .await?;

        info!(column_id = created.id.0, owner = %actor.id, "column created");
        Ok(created.into())
    }

    async fn update_column(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateColumnCommand,
    ) -> ApplicationResult<ColumnDto> {
        let column = self.load_managed(actor, id).await?;
        let update = ColumnUpdate {
            id: column.id,
            name: command.name.map(ColumnName::new).transpose()?,
            description: command
                .description
                .map(normalize_description)
                .transpose()?,
            cover_url: command.cover_url.map(normalize_cover_url).transpose()?,
            updated_at: self.clock.now(),
        };
        let updated = self.repo.update(update).await?;
        info!(column_id = updated.id.0, actor = %actor.id, "column updated");
        Ok(updated.into())
    }

    async fn delete_column(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let column = self.load_managed(actor, id).await?;
        self.repo.delete(column.id).await?;
        info!(column_id = column.id.0, actor = %actor.id, "column deleted");
        Ok(())
    }

    async fn subscribe(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let column = self.load(id).await?;
        let changed = self.repo.subscribe(column.id, &actor.id).await?;
        debug!(column_id = column.id.0, user = %actor.id, changed, "column subscribe");
        Ok(())
    }

    async fn unsubscribe(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        let column = self.load(id).await?;
        let changed = self.repo.unsubscribe(column.id, &actor.id).await?;
        debug!(column_id = column.id.0, user = %actor.id, changed, "column unsubscribe");
        Ok(())
    }

    async fn list_subscribed(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnDto>> {
        let (columns, total) = self.repo.list_subscribed(&actor.id, page).await?;
        Ok(PageResult::new(columns, total, page).map(ColumnDto::from))
    }

    async fn add_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: AddColumnArticleCommand,
    ) -> ApplicationResult<ColumnEntryDto> {
        let column = self.load_managed(actor, id).await?;
        let article_id = ArticleId::new(command.article_id)?;
        if self.article_repo.find_by_id(article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article not found"));
        }
        if self.entry_repo.find(column.id, article_id).await?.is_some() {
            return Err(ApplicationError::conflict("article is already in the column"));
        }

        let sort = match command.sort {
            Some(sort) => sort,
            None => next_sort(self.entry_repo.max_sort(column.id).await?),
        };
        let now = self.clock.now();
        let entry = self
            .entry_repo
            .insert(ColumnEntry {
                column_id: column.id,
                article_id,
                sort,
                added_at: now,
            })
            .await?;
        self.entry_repo.touch(column.id, now).await?;

        info!(column_id = column.id.0, article_id = article_id.0, sort, "article added to column");
        Ok(entry.into())
    }

    async fn remove_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        article_id: i64,
    ) -> ApplicationResult<()> {
        let column = self.load_managed(actor, id).await?;
        let article_id = ArticleId::new(article_id)?;
        if !self.entry_repo.remove(column.id, article_id).await? {
            return Err(ApplicationError::not_found("article is not in the column"));
        }
        self.entry_repo.touch(column.id, self.clock.now()).await?;
        info!(column_id = column.id.0, article_id = article_id.0, "article removed from column");
        Ok(())
    }

    async fn reposition_article(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        article_id: i64,
        sort: i32,
    ) -> ApplicationResult<ColumnEntryDto> {
        let column = self.load_managed(actor, id).await?;
        let article_id = ArticleId::new(article_id)?;
        if self.entry_repo.find(column.id, article_id).await?.is_none() {
            return Err(ApplicationError::not_found("article is not in the column"));
        }
        let entry = self.entry_repo.set_sort(column.id, article_id, sort).await?;
        self.entry_repo.touch(column.id, self.clock.now()).await?;
        Ok(entry.into())
    }
}
