// src/application/services/categories.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::capability::ensure_capability;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser, CategoryDto, CategoryTreeDto, PageResult},
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::SlugGenerator},
    },
    domain::{
        article::{ArticleFilter, ArticleReadRepository},
        category::{CategoryId, CategoryName, CategoryRepository, NewCategory, build_tree},
        pagination::PageRequest,
    },
};

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub sort_order: Option<i32>,
}

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn category_tree(&self) -> ApplicationResult<Vec<CategoryTreeDto>>;
    async fn list_category_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ArticleDto>>;
    async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto>;
}

pub struct DefaultCategoryService {
    repo: Arc<dyn CategoryRepository>,
    article_repo: Arc<dyn ArticleReadRepository>,
    slugger: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
}

impl DefaultCategoryService {
    pub fn new(
        repo: Arc<dyn CategoryRepository>,
        article_repo: Arc<dyn ArticleReadRepository>,
        slugger: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            article_repo,
            slugger,
            clock,
        }
    }
}

#[async_trait]
impl CategoryService for DefaultCategoryService {
    async fn category_tree(&self) -> ApplicationResult<Vec<CategoryTreeDto>> {
        let categories = self.repo.list_all().await?;
        Ok(build_tree(categories).into_iter().map(Into::into).collect())
    }

    async fn list_category_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ArticleDto>> {
        let id = CategoryId::new(id)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("category not found"));
        }

        let filter = ArticleFilter {
            category_id: Some(id),
            ..ArticleFilter::default()
        };
        let (articles, total) = self.article_repo.list_page(&filter, page).await?;
        Ok(PageResult::new(articles, total, page).map(ArticleDto::from))
    }

    async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "categories", "manage")?;

        let name = CategoryName::new(command.name)?;
        let parent_id = match command.parent_id {
            Some(raw) => {
                let parent = CategoryId::new(raw)?;
                if self.repo.find_by_id(parent).await?.is_none() {
                    return Err(ApplicationError::not_found("parent category not found"));
                }
                Some(parent)
            }
            None => None,
        };

        let slug = self.slugger.slugify(name.as_str());
        if slug.is_empty() {
            return Err(ApplicationError::validation(
                "category name must contain letters or digits",
            ));
        }
        if self.repo.find_by_slug(&slug).await?.is_some() {
            return Err(ApplicationError::conflict(format!(
                "category '{slug}' already exists"
            )));
        }

        let description = command
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let created = self
            .repo
            .insert(NewCategory {
                name,
                slug,
                description,
                parent_id,
                sort_order: command.sort_order.unwrap_or(0),
                created_at: self.clock.now(),
            })
            .await?;

        info!(category_id = created.id.0, actor = %actor.id, "category created");
        Ok(created.into())
    }
}
