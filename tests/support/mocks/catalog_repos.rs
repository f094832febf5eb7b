// tests/support/mocks/catalog_repos.rs
use async_trait::async_trait;

use inkwell::domain::category::{Category, CategoryId, CategoryRepository, NewCategory};
use inkwell::domain::draft::{Draft, DraftId, DraftRepository, DraftUpdate, NewDraft};
use inkwell::domain::errors::{DomainError, DomainResult};
use inkwell::domain::pagination::PageRequest;
use inkwell::domain::topic::{NewTopic, Topic, TopicId, TopicName, TopicRepository, rank_by_hotness};
use inkwell::domain::user::UserId;

use super::store::{MemoryStore, Tables, paginate};

#[async_trait]
impl DraftRepository for MemoryStore {
    async fn insert(&self, draft: NewDraft) -> DomainResult<Draft> {
        let mut tables = self.tables();
        let created = Draft {
            id: DraftId(tables.next_id("drafts")),
            owner_id: draft.owner_id,
            title: draft.title,
            summary: draft.summary,
            body: draft.body,
            category_id: draft.category_id,
            topic_ids: draft.topic_ids,
            article_id: draft.article_id,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        };
        tables.drafts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: DraftUpdate) -> DomainResult<Draft> {
        let mut tables = self.tables();
        let draft = tables
            .drafts
            .iter_mut()
            .find(|d| d.id == update.id)
            .ok_or_else(|| DomainError::not_found("draft not found"))?;
        if let Some(title) = update.title {
            draft.title = title;
        }
        if let Some(summary) = update.summary {
            draft.summary = summary;
        }
        if let Some(body) = update.body {
            draft.body = body;
        }
        if let Some(category_id) = update.category_id {
            draft.category_id = category_id;
        }
        if let Some(topic_ids) = update.topic_ids {
            draft.topic_ids = topic_ids;
        }
        draft.updated_at = update.updated_at;
        Ok(draft.clone())
    }

    async fn find_by_id(&self, id: DraftId) -> DomainResult<Option<Draft>> {
        Ok(self.tables().drafts.iter().find(|d| d.id == id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: PageRequest,
    ) -> DomainResult<(Vec<Draft>, u64)> {
        let mut drafts: Vec<Draft> = self
            .tables()
            .drafts
            .iter()
            .filter(|d| &d.owner_id == owner_id)
            .cloned()
            .collect();
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.0.cmp(&a.id.0)));
        Ok(paginate(drafts, page))
    }

    async fn delete(&self, id: DraftId) -> DomainResult<()> {
        let mut tables = self.tables();
        let before = tables.drafts.len();
        tables.drafts.retain(|d| d.id != id);
        if tables.drafts.len() == before {
            return Err(DomainError::not_found("draft not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut tables = self.tables();
        if tables.categories.iter().any(|c| c.slug == category.slug) {
            return Err(DomainError::conflict("category slug already exists"));
        }
        let created = Category {
            id: CategoryId(tables.next_id("categories")),
            name: category.name,
            slug: category.slug,
            description: category.description,
            parent_id: category.parent_id,
            sort_order: category.sort_order,
            created_at: category.created_at,
        };
        tables.categories.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(self.tables().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        Ok(self
            .tables()
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn list_all(&self) -> DomainResult<Vec<Category>> {
        Ok(self.tables().categories.clone())
    }
}

fn with_counts(tables: &Tables, topic: &Topic) -> Topic {
    let mut topic = topic.clone();
    topic.follower_count = tables
        .topic_follows
        .iter()
        .filter(|(id, _)| *id == topic.id.0)
        .count() as i64;
    topic.article_count = tables
        .articles
        .iter()
        .filter(|a| a.topic_ids.contains(&topic.id))
        .count() as i64;
    topic
}

#[async_trait]
impl TopicRepository for MemoryStore {
    async fn insert(&self, topic: NewTopic) -> DomainResult<Topic> {
        let mut tables = self.tables();
        if tables.topics.iter().any(|t| t.name == topic.name) {
            return Err(DomainError::conflict("topic already exists"));
        }
        let created = Topic {
            id: TopicId(tables.next_id("topics")),
            name: topic.name,
            description: topic.description,
            creator_id: topic.creator_id,
            follower_count: 0,
            article_count: 0,
            created_at: topic.created_at,
        };
        tables.topics.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: TopicId) -> DomainResult<Option<Topic>> {
        let tables = self.tables();
        Ok(tables
            .topics
            .iter()
            .find(|t| t.id == id)
            .map(|t| with_counts(&tables, t)))
    }

    async fn find_by_name(&self, name: &TopicName) -> DomainResult<Option<Topic>> {
        let tables = self.tables();
        Ok(tables
            .topics
            .iter()
            .find(|t| &t.name == name)
            .map(|t| with_counts(&tables, t)))
    }

    async fn list_hot(&self, limit: u32) -> DomainResult<Vec<Topic>> {
        let tables = self.tables();
        let mut topics: Vec<Topic> = tables.topics.iter().map(|t| with_counts(&tables, t)).collect();
        rank_by_hotness(&mut topics);
        topics.truncate(limit as usize);
        Ok(topics)
    }

    async fn follow(&self, id: TopicId, user_id: &UserId) -> DomainResult<bool> {
        let mut tables = self.tables();
        let key = (id.0, user_id.to_string());
        if tables.topic_follows.contains(&key) {
            return Ok(false);
        }
        tables.topic_follows.push(key);
        Ok(true)
    }

    async fn unfollow(&self, id: TopicId, user_id: &UserId) -> DomainResult<bool> {
        let mut tables = self.tables();
        let before = tables.topic_follows.len();
        tables
            .topic_follows
            .retain(|(topic, user)| !(*topic == id.0 && user == user_id.as_str()));
        Ok(tables.topic_follows.len() != before)
    }
}
