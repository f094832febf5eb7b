// src/infrastructure/repositories/postgres_comment_report.rs
use super::{map_sqlx, to_count};
use crate::domain::comment::{
    CommentId, CommentReportRepository, NewReport, Report, ReportId, ReportResolution,
    ReportStatus,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::PageRequest;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const REPORT_COLUMNS: &str = "id, comment_id, reporter_id, reason, status, handler_id, \
     handler_note, created_at, handled_at";

#[derive(Clone)]
pub struct PostgresCommentReportRepository {
    pool: PgPool,
}

impl PostgresCommentReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReportRow {
    id: i64,
    comment_id: i64,
    reporter_id: String,
    reason: String,
    status: String,
    handler_id: Option<String>,
    handler_note: Option<String>,
    created_at: DateTime<Utc>,
    handled_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReportRow> for Report {
    type Error = DomainError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Report {
            id: ReportId::new(row.id)?,
            comment_id: CommentId::new(row.comment_id)?,
            reporter_id: UserId::new(row.reporter_id)?,
            reason: row.reason,
            status: row.status.parse()?,
            handler_id: row.handler_id.map(UserId::new).transpose()?,
            handler_note: row.handler_note,
            created_at: row.created_at,
            handled_at: row.handled_at,
        })
    }
}

fn push_status<'a>(builder: &mut QueryBuilder<'a, Postgres>, status: Option<ReportStatus>) {
    if let Some(status) = status {
        builder.push(" WHERE status = ");
        builder.push_bind(status.as_str());
    }
}

#[async_trait]
impl CommentReportRepository for PostgresCommentReportRepository {
    async fn insert(&self, report: NewReport) -> DomainResult<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "INSERT INTO comment_reports (comment_id, reporter_id, reason, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(report.comment_id.0)
        .bind(report.reporter_id.as_str())
        .bind(&report.reason)
        .bind(report.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Report::try_from(row)
    }

    async fn find_by_id(&self, id: ReportId) -> DomainResult<Option<Report>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM comment_reports WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Report::try_from).transpose()
    }

    async fn has_pending(&self, comment_id: CommentId, reporter_id: &UserId) -> DomainResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM comment_reports
                 WHERE comment_id = $1 AND reporter_id = $2 AND status = 'pending'
             )",
        )
        .bind(comment_id.0)
        .bind(reporter_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn list(
        &self,
        status: Option<ReportStatus>,
        page: PageRequest,
    ) -> DomainResult<(Vec<Report>, u64)> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM comment_reports");
        push_status(&mut count, status);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(REPORT_COLUMNS);
        builder.push(" FROM comment_reports");
        push_status(&mut builder, status);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(page.limit());
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());

        let rows = builder
            .build_query_as::<ReportRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let reports = rows
            .into_iter()
            .map(Report::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((reports, to_count(total)))
    }

    async fn resolve(&self, resolution: ReportResolution) -> DomainResult<Report> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "UPDATE comment_reports
             SET status = $2, handler_id = $3, handler_note = $4, handled_at = $5
             WHERE id = $1 AND status = 'pending'
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(resolution.id.0)
        .bind(resolution.status.as_str())
        .bind(resolution.handler_id.as_str())
        .bind(resolution.note.as_deref())
        .bind(resolution.handled_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::Conflict("report was already handled".into()))?;

        Report::try_from(row)
    }
}
