// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        dto::AuthenticatedUser,
        ports::{security::TokenManager, time::Clock, util::SlugGenerator},
    },
    domain::{
        article::{
            ArticleReadRepository, ArticleRevisionRepository, ArticleWriteRepository,
            services::ArticleSlugService,
        },
        category::CategoryRepository,
        column::{ColumnEntryRepository, ColumnRepository},
        comment::{CommentReportRepository, CommentRepository, SensitiveWordRepository},
        draft::DraftRepository,
        topic::TopicRepository,
    },
};

mod capability;

pub mod articles;
pub mod categories;
pub mod columns;
pub mod comments;
pub mod drafts;
pub mod moderation;
pub mod topics;

pub use articles::{ArticleService, CreateArticleCommand, DefaultArticleService, UpdateArticleCommand};
pub use categories::{CategoryService, CreateCategoryCommand, DefaultCategoryService};
pub use columns::{
    AddColumnArticleCommand, ColumnService, CreateColumnCommand, DefaultColumnService,
    UpdateColumnCommand,
};
pub use comments::{
    CommentService, CreateCommentCommand, DefaultCommentService, ReplyCommentCommand,
};
pub use drafts::{DefaultDraftService, DraftService, SaveDraftCommand, UpdateDraftCommand};
pub use moderation::{
    CommentModerationService, DefaultCommentModerationService, HandleReportCommand,
};
pub use topics::{CreateTopicCommand, DefaultTopicService, TopicService};

/// Every repository the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub article_revisions: Arc<dyn ArticleRevisionRepository>,
    pub drafts: Arc<dyn DraftRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub topics: Arc<dyn TopicRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub comment_reports: Arc<dyn CommentReportRepository>,
    pub sensitive_words: Arc<dyn SensitiveWordRepository>,
    pub columns: Arc<dyn ColumnRepository>,
    pub column_entries: Arc<dyn ColumnEntryRepository>,
}

pub struct ApplicationServices {
    pub articles: Arc<dyn ArticleService>,
    pub drafts: Arc<dyn DraftService>,
    pub categories: Arc<dyn CategoryService>,
    pub topics: Arc<dyn TopicService>,
    pub comments: Arc<dyn CommentService>,
    pub moderation: Arc<dyn CommentModerationService>,
    pub columns: Arc<dyn ColumnService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(
        repos: Repositories,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_service = Arc::new(ArticleSlugService::new(
            Arc::clone(&repos.article_read),
            Arc::clone(&slugger),
        ));

        let articles: Arc<dyn ArticleService> = Arc::new(DefaultArticleService::new(
            Arc::clone(&repos.article_write),
            Arc::clone(&repos.article_read),
            Arc::clone(&repos.article_revisions),
            Arc::clone(&repos.categories),
            Arc::clone(&repos.topics),
            slug_service,
            Arc::clone(&clock),
        ));

        let drafts = Arc::new(DefaultDraftService::new(
            Arc::clone(&repos.drafts),
            Arc::clone(&repos.article_read),
            Arc::clone(&articles),
            Arc::clone(&clock),
        ));

        let categories = Arc::new(DefaultCategoryService::new(
            Arc::clone(&repos.categories),
            Arc::clone(&repos.article_read),
            slugger,
            Arc::clone(&clock),
        ));

        let topics = Arc::new(DefaultTopicService::new(
            Arc::clone(&repos.topics),
            Arc::clone(&repos.article_read),
            Arc::clone(&clock),
        ));

        let comments = Arc::new(DefaultCommentService::new(
            Arc::clone(&repos.comments),
            Arc::clone(&repos.comment_reports),
            Arc::clone(&repos.sensitive_words),
            Arc::clone(&repos.article_read),
            Arc::clone(&clock),
        ));

        let moderation = Arc::new(DefaultCommentModerationService::new(
            Arc::clone(&repos.comments),
            Arc::clone(&repos.comment_reports),
            Arc::clone(&repos.sensitive_words),
            Arc::clone(&repos.article_read),
            Arc::clone(&clock),
        ));

        let columns = Arc::new(DefaultColumnService::new(
            Arc::clone(&repos.columns),
            Arc::clone(&repos.column_entries),
            Arc::clone(&repos.article_read),
            clock,
        ));

        Self {
            articles,
            drafts,
            categories,
            topics,
            comments,
            moderation,
            columns,
            token_manager,
        }
    }

    /// Swap the column service, e.g. for a recording double.
    #[must_use]
    pub fn with_column_service(mut self, columns: Arc<dyn ColumnService>) -> Self {
        self.columns = columns;
        self
    }

    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
