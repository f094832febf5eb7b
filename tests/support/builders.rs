// tests/support/builders.rs
use chrono::Duration;
use inkwell::domain::article::{Article, ArticleBody, ArticleId, ArticleSlug, ArticleTitle};
use inkwell::domain::category::{Category, CategoryId, CategoryName};
use inkwell::domain::comment::{SensitiveWord, SensitiveWordId};
use inkwell::domain::topic::{Topic, TopicId, TopicName};
use inkwell::domain::user::UserId;

use super::mocks::{MemoryStore, fixed_now};

/// Insert an article straight into the store. `minutes` offsets the
/// timestamps so listings have a stable order.
pub fn seed_article(store: &MemoryStore, author: &str, title: &str, minutes: i64) -> Article {
    let mut tables = store.tables();
    let id = tables.next_id("articles");
    let at = fixed_now() + Duration::minutes(minutes);
    let article = Article {
        id: ArticleId(id),
        title: ArticleTitle::new(title).expect("valid title"),
        slug: ArticleSlug::new(format!("article-{id}")).expect("valid slug"),
        summary: None,
        body: ArticleBody::new(format!("body of {title}")).expect("valid body"),
        author_id: UserId::new(author).expect("valid user id"),
        category_id: None,
        topic_ids: vec![],
        view_count: 0,
        created_at: at,
        updated_at: at,
    };
    tables.articles.push(article.clone());
    article
}

pub fn seed_article_in(
    store: &MemoryStore,
    author: &str,
    title: &str,
    category: Option<CategoryId>,
    topics: &[TopicId],
) -> Article {
    let article = seed_article(store, author, title, 0);
    let mut tables = store.tables();
    let stored = tables
        .articles
        .iter_mut()
        .find(|a| a.id == article.id)
        .expect("seeded article");
    stored.category_id = category;
    stored.topic_ids = topics.to_vec();
    stored.clone()
}

pub fn seed_category(
    store: &MemoryStore,
    name: &str,
    parent: Option<CategoryId>,
    sort_order: i32,
) -> Category {
    let mut tables = store.tables();
    let category = Category {
        id: CategoryId(tables.next_id("categories")),
        name: CategoryName::new(name).expect("valid category name"),
        slug: name.to_ascii_lowercase().replace(' ', "-"),
        description: None,
        parent_id: parent,
        sort_order,
        created_at: fixed_now(),
    };
    tables.categories.push(category.clone());
    category
}

pub fn seed_topic(store: &MemoryStore, name: &str, creator: &str) -> Topic {
    let mut tables = store.tables();
    let topic = Topic {
        id: TopicId(tables.next_id("topics")),
        name: TopicName::new(name).expect("valid topic name"),
        description: None,
        creator_id: UserId::new(creator).expect("valid user id"),
        follower_count: 0,
        article_count: 0,
        created_at: fixed_now(),
    };
    tables.topics.push(topic.clone());
    topic
}

pub fn seed_sensitive_word(store: &MemoryStore, word: &str) -> SensitiveWord {
    let mut tables = store.tables();
    let entry = SensitiveWord {
        id: SensitiveWordId(tables.next_id("words")),
        word: word.into(),
        created_at: fixed_now(),
    };
    tables.words.push(entry.clone());
    entry
}
