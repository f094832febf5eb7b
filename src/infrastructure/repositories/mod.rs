// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_article;
mod postgres_article_revision;
mod postgres_category;
mod postgres_column;
mod postgres_comment;
mod postgres_comment_report;
mod postgres_draft;
mod postgres_sensitive_word;
mod postgres_topic;

use error::{map_sqlx, to_count};

pub use postgres_article::{PostgresArticleReadRepository, PostgresArticleWriteRepository};
pub use postgres_article_revision::PostgresArticleRevisionRepository;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_column::{PostgresColumnEntryRepository, PostgresColumnRepository};
pub use postgres_comment::PostgresCommentRepository;
pub use postgres_comment_report::PostgresCommentReportRepository;
pub use postgres_draft::PostgresDraftRepository;
pub use postgres_sensitive_word::PostgresSensitiveWordRepository;
pub use postgres_topic::PostgresTopicRepository;
