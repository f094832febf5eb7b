// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod article_repos;
pub mod catalog_repos;
pub mod column_repos;
pub mod columns;
pub mod comment_repos;
pub mod security;
pub mod store;
pub mod time;
pub mod util;

pub use columns::{ColumnCall, RecordingColumnService};
pub use comment_repos::RacedCommentDeletes;
pub use security::{
    ADMIN_TOKEN, DummyTokenManager, EXPIRED_TOKEN, MEMBER_TOKEN, MODERATOR_TOKEN, OTHER_TOKEN,
    user_for,
};
pub use store::MemoryStore;
pub use time::fixed_now;
pub use util::{DummyClock, DummySlug};
