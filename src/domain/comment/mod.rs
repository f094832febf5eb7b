pub mod entity;
pub mod report;
pub mod repository;
pub mod sensitive;
pub mod specifications;
pub mod tree;

pub use entity::{
    Comment, CommentContent, CommentId, CommentStats, NewComment, ReactionKind, rank_by_hotness,
};
pub use report::{NewReport, Report, ReportId, ReportResolution, ReportStatus};
pub use repository::{CommentReportRepository, CommentRepository, SensitiveWordRepository};
pub use sensitive::{SensitiveWord, SensitiveWordFilter, SensitiveWordId};
pub use tree::{CommentThread, build_threads};
