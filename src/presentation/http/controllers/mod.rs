// src/presentation/http/controllers/mod.rs
pub mod articles;
pub mod categories;
pub mod columns;
pub mod comments;
pub mod drafts;
pub mod moderation;
pub mod topics;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

pub(crate) const ARTICLE_PAGE_SIZE: u32 = 10;
pub(crate) const COMMENT_PAGE_SIZE: u32 = 20;
pub(crate) const DEFAULT_LIMIT: u32 = 10;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
