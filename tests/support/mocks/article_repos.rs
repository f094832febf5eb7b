// tests/support/mocks/article_repos.rs
use async_trait::async_trait;

use inkwell::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleRevision,
    ArticleRevisionRepository, ArticleSlug, ArticleUpdate, ArticleWriteRepository, NewArticle,
};
use inkwell::domain::errors::{DomainError, DomainResult};
use inkwell::domain::pagination::PageRequest;
use inkwell::domain::user::UserId;

use super::store::{MemoryStore, paginate};

#[async_trait]
impl ArticleWriteRepository for MemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut tables = self.tables();
        if tables.articles.iter().any(|a| a.slug == article.slug) {
            return Err(DomainError::conflict("slug already exists"));
        }
        let created = Article {
            id: ArticleId(tables.next_id("articles")),
            title: article.title,
            slug: article.slug,
            summary: article.summary,
            body: article.body,
            author_id: article.author_id,
            category_id: article.category_id,
            topic_ids: article.topic_ids,
            view_count: 0,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        tables.articles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut tables = self.tables();
        let article = tables
            .articles
            .iter_mut()
            .find(|a| a.id == update.id)
            .ok_or_else(|| DomainError::not_found("article not found"))?;
        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(summary) = update.summary {
            article.summary = summary;
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(category_id) = update.category_id {
            article.category_id = category_id;
        }
        if let Some(topic_ids) = update.topic_ids {
            article.topic_ids = topic_ids;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut tables = self.tables();
        let before = tables.articles.len();
        tables.articles.retain(|a| a.id != id);
        if tables.articles.len() == before {
            return Err(DomainError::not_found("article not found"));
        }
        tables.entries.retain(|e| e.article_id != id);
        tables.comments.retain(|c| c.article_id != id);
        tables.revisions.retain(|r| r.article_id != id);
        Ok(())
    }

    async fn increment_views(&self, id: ArticleId) -> DomainResult<()> {
        let mut tables = self.tables();
        if let Some(article) = tables.articles.iter_mut().find(|a| a.id == id) {
            article.view_count += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for MemoryStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.tables().articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        Ok(self
            .tables()
            .articles
            .iter()
            .find(|a| &a.slug == slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: &ArticleFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<Article>, u64)> {
        let mut matching: Vec<Article> = self
            .tables()
            .articles
            .iter()
            .filter(|a| filter.category_id.is_none_or(|c| a.category_id == Some(c)))
            .filter(|a| filter.topic_id.is_none_or(|t| a.topic_ids.contains(&t)))
            .filter(|a| filter.author_id.as_ref().is_none_or(|u| &a.author_id == u))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(paginate(matching, page))
    }
}

#[async_trait]
impl ArticleRevisionRepository for MemoryStore {
    async fn append(&self, article: &Article, edited_by: &UserId) -> DomainResult<()> {
        let mut tables = self.tables();
        let version = tables
            .revisions
            .iter()
            .filter(|r| r.article_id == article.id)
            .map(|r| r.version)
            .max()
            .unwrap_or(0)
            + 1;
        tables.revisions.push(ArticleRevision {
            article_id: article.id,
            version,
            title: article.title.clone(),
            summary: article.summary.clone(),
            body: article.body.clone(),
            edited_by: edited_by.clone(),
            recorded_at: article.updated_at,
        });
        Ok(())
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<ArticleRevision>> {
        let mut revisions: Vec<ArticleRevision> = self
            .tables()
            .revisions
            .iter()
            .filter(|r| r.article_id == article_id)
            .cloned()
            .collect();
        revisions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(revisions)
    }
}
