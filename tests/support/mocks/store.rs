// tests/support/mocks/store.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use inkwell::domain::article::{Article, ArticleRevision};
use inkwell::domain::category::Category;
use inkwell::domain::column::{Column, ColumnEntry};
use inkwell::domain::comment::{Comment, Report, SensitiveWord};
use inkwell::domain::draft::Draft;
use inkwell::domain::pagination::PageRequest;
use inkwell::domain::topic::Topic;

/// Rows kept by the in-memory repositories. Derived counters (followers,
/// subscribers, member articles) are computed on read.
#[derive(Default)]
pub struct Tables {
    pub articles: Vec<Article>,
    pub revisions: Vec<ArticleRevision>,
    pub drafts: Vec<Draft>,
    pub categories: Vec<Category>,
    pub topics: Vec<Topic>,
    pub topic_follows: Vec<(i64, String)>,
    pub comments: Vec<Comment>,
    pub reactions: Vec<(i64, String, &'static str)>,
    pub reports: Vec<Report>,
    pub words: Vec<SensitiveWord>,
    pub columns: Vec<Column>,
    pub subscriptions: Vec<(i64, String)>,
    pub entries: Vec<ColumnEntry>,
    sequences: HashMap<&'static str, i64>,
}

impl Tables {
    pub fn next_id(&mut self, table: &'static str) -> i64 {
        let value = self.sequences.entry(table).or_insert(0);
        *value += 1;
        *value
    }
}

/// One shared store implementing every repository trait, so that the
/// services see a consistent picture across domains.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }
}

/// Slice `items` the way an OFFSET/LIMIT query would.
pub fn paginate<T>(items: Vec<T>, page: PageRequest) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    (items.into_iter().skip(offset).take(limit).collect(), total)
}
