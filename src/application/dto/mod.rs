pub mod articles;
pub mod auth;
pub mod categories;
pub mod columns;
pub mod comments;
pub mod drafts;
pub mod pagination;
pub mod serde_time;
pub mod topics;

pub use articles::{ArticleDto, ArticleRevisionDto};
pub use auth::AuthenticatedUser;
pub use categories::{CategoryDto, CategoryTreeDto};
pub use columns::{ColumnArticleDto, ColumnDto, ColumnEntryDto};
pub use comments::{
    BatchResultDto, CommentDto, CommentStatsDto, CommentThreadDto, ReportDto, SensitiveWordDto,
};
pub use drafts::DraftDto;
pub use pagination::PageResult;
pub use topics::TopicDto;
