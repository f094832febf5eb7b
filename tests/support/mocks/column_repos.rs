// tests/support/mocks/column_repos.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use inkwell::domain::article::{Article, ArticleId};
use inkwell::domain::column::{
    Column, ColumnEntry, ColumnEntryRepository, ColumnId, ColumnRepository, ColumnUpdate,
    NewColumn,
};
use inkwell::domain::errors::{DomainError, DomainResult};
use inkwell::domain::pagination::PageRequest;
use inkwell::domain::user::UserId;

use super::store::{MemoryStore, Tables, paginate};

fn with_counts(tables: &Tables, column: &Column) -> Column {
    let mut column = column.clone();
    column.subscriber_count = tables
        .subscriptions
        .iter()
        .filter(|(id, _)| *id == column.id.0)
        .count() as i64;
    column.article_count = tables
        .entries
        .iter()
        .filter(|e| e.column_id == column.id)
        .count() as i64;
    column
}

fn newest_first(columns: &mut [Column]) {
    columns.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ColumnRepository for MemoryStore {
    async fn insert(&self, column: NewColumn) -> DomainResult<Column> {
        let mut tables = self.tables();
        let created = Column {
            id: ColumnId(tables.next_id("columns")),
            owner_id: column.owner_id,
            name: column.name,
            description: column.description,
            cover_url: column.cover_url,
            subscriber_count: 0,
            article_count: 0,
            created_at: column.created_at,
            updated_at: column.created_at,
        };
        tables.columns.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ColumnUpdate) -> DomainResult<Column> {
        let mut tables = self.tables();
        let column = tables
            .columns
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or_else(|| DomainError::not_found("column not found"))?;
        if let Some(name) = update.name {
            column.name = name;
        }
        if let Some(description) = update.description {
            column.description = description;
        }
        if let Some(cover_url) = update.cover_url {
            column.cover_url = cover_url;
        }
        column.updated_at = update.updated_at;
        let column = column.clone();
        Ok(with_counts(&tables, &column))
    }

    async fn delete(&self, id: ColumnId) -> DomainResult<()> {
        let mut tables = self.tables();
        let before = tables.columns.len();
        tables.columns.retain(|c| c.id != id);
        if tables.columns.len() == before {
            return Err(DomainError::not_found("column not found"));
        }
        tables.subscriptions.retain(|(column_id, _)| *column_id != id.0);
        tables.entries.retain(|e| e.column_id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: ColumnId) -> DomainResult<Option<Column>> {
        let tables = self.tables();
        Ok(tables
            .columns
            .iter()
            .find(|c| c.id == id)
            .map(|c| with_counts(&tables, c)))
    }

    async fn list_page(&self, page: PageRequest) -> DomainResult<(Vec<Column>, u64)> {
        let tables = self.tables();
        let mut columns: Vec<Column> = tables
            .columns
            .iter()
            .map(|c| with_counts(&tables, c))
            .collect();
        newest_first(&mut columns);
        Ok(paginate(columns, page))
    }

    async fn list_hot(&self, limit: u32) -> DomainResult<Vec<Column>> {
        let tables = self.tables();
        let mut columns: Vec<Column> = tables
            .columns
            .iter()
            .map(|c| with_counts(&tables, c))
            .collect();
        columns.sort_by(|a, b| {
            b.subscriber_count
                .cmp(&a.subscriber_count)
                .then(b.article_count.cmp(&a.article_count))
                .then(a.id.cmp(&b.id))
        });
        columns.truncate(limit as usize);
        Ok(columns)
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)> {
        let tables = self.tables();
        let mut columns: Vec<Column> = tables
            .columns
            .iter()
            .filter(|c| c.is_owned_by(owner_id))
            .map(|c| with_counts(&tables, c))
            .collect();
        newest_first(&mut columns);
        Ok(paginate(columns, page))
    }

    async fn list_subscribed(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Column>, u64)> {
        let tables = self.tables();
        let columns: Vec<Column> = tables
            .subscriptions
            .iter()
            .rev()
            .filter(|(_, user)| user == user_id.as_str())
            .filter_map(|(column_id, _)| tables.columns.iter().find(|c| c.id.0 == *column_id))
            .map(|c| with_counts(&tables, c))
            .collect();
        Ok(paginate(columns, page))
    }

    async fn subscribe(&self, id: ColumnId, user_id: &UserId) -> DomainResult<bool> {
        let mut tables = self.tables();
        let key = (id.0, user_id.to_string());
        if tables.subscriptions.contains(&key) {
            return Ok(false);
        }
        tables.subscriptions.push(key);
        Ok(true)
    }

    async fn unsubscribe(&self, id: ColumnId, user_id: &UserId) -> DomainResult<bool> {
        let mut tables = self.tables();
        let key = (id.0, user_id.to_string());
        let before = tables.subscriptions.len();
        tables.subscriptions.retain(|s| s != &key);
        Ok(tables.subscriptions.len() != before)
    }
}

#[async_trait]
impl ColumnEntryRepository for MemoryStore {
    async fn find(&self, id: ColumnId, article_id: ArticleId) -> DomainResult<Option<ColumnEntry>> {
        Ok(self
            .tables()
            .entries
            .iter()
            .find(|e| e.column_id == id && e.article_id == article_id)
            .cloned())
    }

    async fn max_sort(&self, id: ColumnId) -> DomainResult<Option<i32>> {
        Ok(self
            .tables()
            .entries
            .iter()
            .filter(|e| e.column_id == id)
            .map(|e| e.sort)
            .max())
    }

    async fn insert(&self, entry: ColumnEntry) -> DomainResult<ColumnEntry> {
        let mut tables = self.tables();
        if tables
            .entries
            .iter()
            .any(|e| e.column_id == entry.column_id && e.article_id == entry.article_id)
        {
            return Err(DomainError::conflict("article is already in the column"));
        }
        tables.entries.push(entry.clone());
        Ok(entry)
    }

    async fn remove(&self, id: ColumnId, article_id: ArticleId) -> DomainResult<bool> {
        let mut tables = self.tables();
        let before = tables.entries.len();
        tables
            .entries
            .retain(|e| !(e.column_id == id && e.article_id == article_id));
        Ok(tables.entries.len() != before)
    }

    async fn set_sort(
        &self,
        id: ColumnId,
        article_id: ArticleId,
        sort: i32,
    ) -> DomainResult<ColumnEntry> {
        let mut tables = self.tables();
        let entry = tables
            .entries
            .iter_mut()
            .find(|e| e.column_id == id && e.article_id == article_id)
            .ok_or_else(|| DomainError::not_found("article is not in the column"))?;
        entry.sort = sort;
        Ok(entry.clone())
    }

    async fn list_articles(
        &self,
        id: ColumnId,
        page: PageRequest,
    ) -> DomainResult<(Vec<(ColumnEntry, Article)>, u64)> {
        let tables = self.tables();
        let mut entries: Vec<&ColumnEntry> =
            tables.entries.iter().filter(|e| e.column_id == id).collect();
        entries.sort_by(|a, b| a.sort.cmp(&b.sort).then(a.added_at.cmp(&b.added_at)));
        let joined: Vec<(ColumnEntry, Article)> = entries
            .into_iter()
            .filter_map(|entry| {
                tables
                    .articles
                    .iter()
                    .find(|a| a.id == entry.article_id)
                    .map(|article| (entry.clone(), article.clone()))
            })
            .collect();
        Ok(paginate(joined, page))
    }

    async fn touch(&self, id: ColumnId, at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(column) = self.tables().columns.iter_mut().find(|c| c.id == id) {
            column.updated_at = at;
        }
        Ok(())
    }
}
