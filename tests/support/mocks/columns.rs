// tests/support/mocks/columns.rs
use std::sync::Mutex;

use async_trait::async_trait;
use inkwell::application::{
    ApplicationResult,
    dto::{AuthenticatedUser, ColumnArticleDto, ColumnDto, ColumnEntryDto, PageResult},
    services::{AddColumnArticleCommand, ColumnService, CreateColumnCommand, UpdateColumnCommand},
};
use inkwell::domain::pagination::PageRequest;

/// One call observed by [`RecordingColumnService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnCall {
    List { page: u32, page_size: u32 },
    Get(i64),
    Hot(u32),
    ListByUser(String),
    ListArticles(i64),
    Create { actor: String, name: String },
    Update(i64),
    Delete(i64),
    Subscribe(i64),
    Unsubscribe(i64),
    ListSubscribed(String),
    AddArticle { id: i64, article_id: i64, sort: Option<i32> },
    RemoveArticle { id: i64, article_id: i64 },
    Reposition { id: i64, article_id: i64, sort: i32 },
}

/// Column service double that records what the HTTP layer asked for and
/// answers with canned data.
#[derive(Default)]
pub struct RecordingColumnService {
    calls: Mutex<Vec<ColumnCall>>,
}

impl RecordingColumnService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ColumnCall> {
        self.calls.lock().expect("calls poisoned").clone()
    }

    fn record(&self, call: ColumnCall) {
        self.calls.lock().expect("calls poisoned").push(call);
    }
}

fn column(id: i64, owner: &str, name: &str) -> ColumnDto {
    let now = super::time::fixed_now();
    ColumnDto {
        id,
        owner_id: owner.into(),
        name: name.into(),
        description: None,
        cover_url: None,
        subscriber_count: 0,
        article_count: 0,
        created_at: now,
        updated_at: now,
    }
}

fn entry(id: i64, article_id: i64, sort: i32) -> ColumnEntryDto {
    ColumnEntryDto {
        column_id: id,
        article_id,
        sort,
        added_at: super::time::fixed_now(),
    }
}

#[async_trait]
impl ColumnService for RecordingColumnService {
    async fn list_columns(&self, page: PageRequest) -> ApplicationResult<PageResult<ColumnDto>> {
        self.record(ColumnCall::List {
            page: page.page(),
            page_size: page.page_size(),
        });
        Ok(PageResult::new(vec![column(1, "u-member", "recorded")], 1, page))
    }

    async fn get_column(&self, id: i64) -> ApplicationResult<ColumnDto> {
        self.record(ColumnCall::Get(id));
        Ok(column(id, "u-member", "recorded"))
    }

    async fn hot_columns(&self, limit: u32) -> ApplicationResult<Vec<ColumnDto>> {
        self.record(ColumnCall::Hot(limit));
        Ok(vec![])
    }

    async fn list_user_columns(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnDto>> {
        self.record(ColumnCall::ListByUser(user_id.to_string()));
        Ok(PageResult::new(vec![], 0, page))
    }

    async fn list_column_articles(
        &self,
        id: i64,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnArticleDto>> {
        self.record(ColumnCall::ListArticles(id));
        Ok(PageResult::new(vec![], 0, page))
    }

    async fn create_column(
        &self,
        actor: &AuthenticatedUser,
        command: CreateColumnCommand,
    ) -> ApplicationResult<ColumnDto> {
        self.record(ColumnCall::Create {
            actor: actor.id.to_string(),
            name: command.name.clone(),
        });
        Ok(column(1, actor.id.as_str(), &command.name))
    }

    async fn update_column(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateColumnCommand,
    ) -> ApplicationResult<ColumnDto> {
        self.record(ColumnCall::Update(id));
        let name = command.name.unwrap_or_else(|| "recorded".into());
        Ok(column(id, actor.id.as_str(), &name))
    }

    async fn delete_column(&self, _actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        self.record(ColumnCall::Delete(id));
        Ok(())
    }

    async fn subscribe(&self, _actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        self.record(ColumnCall::Subscribe(id));
        Ok(())
    }

    async fn unsubscribe(&self, _actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        self.record(ColumnCall::Unsubscribe(id));
        Ok(())
    }

    async fn list_subscribed(
        &self,
        actor: &AuthenticatedUser,
        page: PageRequest,
    ) -> ApplicationResult<PageResult<ColumnDto>> {
        self.record(ColumnCall::ListSubscribed(actor.id.to_string()));
        Ok(PageResult::new(vec![], 0, page))
    }

    async fn add_article(
        &self,
        _actor: &AuthenticatedUser,
        id: i64,
        command: AddColumnArticleCommand,
    ) -> ApplicationResult<ColumnEntryDto> {
        self.record(ColumnCall::AddArticle {
            id,
            article_id: command.article_id,
            sort: command.sort,
        });
        Ok(entry(id, command.article_id, command.sort.unwrap_or(0)))
    }

    async fn remove_article(
        &self,
        _actor: &AuthenticatedUser,
        id: i64,
        article_id: i64,
    ) -> ApplicationResult<()> {
        self.record(ColumnCall::RemoveArticle { id, article_id });
        Ok(())
    }

    async fn reposition_article(
        &self,
        _actor: &AuthenticatedUser,
        id: i64,
        article_id: i64,
        sort: i32,
    ) -> ApplicationResult<ColumnEntryDto> {
        self.record(ColumnCall::Reposition {
            id,
            article_id,
            sort,
        });
        Ok(entry(id, article_id, sort))
    }
}
