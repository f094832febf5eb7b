use std::fmt;
use std::str::FromStr;

use crate::domain::comment::entity::CommentId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

const MAX_REASON_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportId(pub i64);

impl ReportId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("report id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Pending,
    Handled,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Handled => "handled",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub fn is_final(self) -> bool {
        !matches!(self, ReportStatus::Pending)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "handled" => Ok(ReportStatus::Handled),
            "rejected" => Ok(ReportStatus::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown report status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub id: ReportId,
    pub comment_id: CommentId,
    pub reporter_id: UserId,
    pub reason: String,
    pub status: ReportStatus,
    pub handler_id: Option<UserId>,
    pub handler_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub handled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub comment_id: CommentId,
    pub reporter_id: UserId,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReportResolution {
    pub id: ReportId,
    pub status: ReportStatus,
    pub handler_id: UserId,
    pub note: Option<String>,
    pub handled_at: DateTime<Utc>,
}

pub fn validate_reason(reason: &str) -> DomainResult<String> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("report reason cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_REASON_LEN {
        return Err(DomainError::Validation(format!(
            "report reason must be at most {MAX_REASON_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
