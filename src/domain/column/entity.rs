use crate::domain::article::ArticleId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 1000;
const MAX_COVER_URL_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub i64);

impl ColumnId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("column id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ColumnId> for i64 {
    fn from(value: ColumnId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("column name cannot be empty".into()));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "column name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub fn normalize_description(value: Option<String>) -> DomainResult<Option<String>> {
    normalize_optional(value, MAX_DESCRIPTION_LEN, "description")
}

pub fn normalize_cover_url(value: Option<String>) -> DomainResult<Option<String>> {
    let url = normalize_optional(value, MAX_COVER_URL_LEN, "cover url")?;
    match url {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
            DomainError::Validation("cover url must be an http(s) url".into()),
        ),
        other => Ok(other),
    }
}

fn normalize_optional(
    value: Option<String>,
    max_len: usize,
    field: &str,
) -> DomainResult<Option<String>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

#[derive(Debug, Clone)]
pub struct Column {
    pub id: ColumnId,
    pub owner_id: UserId,
    pub name: ColumnName,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub subscriber_count: i64,
    pub article_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewColumn {
    pub owner_id: UserId,
    pub name: ColumnName,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ColumnUpdate {
    pub id: ColumnId,
    pub name: Option<ColumnName>,
    pub description: Option<Option<String>>,
    pub cover_url: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

/// Membership of an article inside a column. Lower `sort` comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    pub column_id: ColumnId,
    pub article_id: ArticleId,
    pub sort: i32,
    pub added_at: DateTime<Utc>,
}

/// Sort key for an appended entry: one past the current maximum, or zero.
pub fn next_sort(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}
