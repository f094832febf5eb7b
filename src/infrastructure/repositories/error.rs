use crate::domain::errors::DomainError;

const CNT_ARTICLE_SLUG: &str = "articles_slug_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_TOPIC_NAME: &str = "topics_name_key";
const CNT_SENSITIVE_WORD: &str = "sensitive_words_word_key";
const CNT_PENDING_REPORT: &str = "comment_reports_pending_key";
const CNT_COLUMN_ENTRY: &str = "column_articles_pkey";
const CNT_COMMENT_ARTICLE: &str = "comments_article_id_fkey";
const CNT_COLUMN_ENTRY_ARTICLE: &str = "column_articles_article_id_fkey";
const CNT_ARTICLE_CATEGORY: &str = "articles_category_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ARTICLE_SLUG => DomainError::Conflict("slug already exists".into()),
                    CNT_CATEGORY_SLUG => DomainError::Conflict("category already exists".into()),
                    CNT_TOPIC_NAME => DomainError::Conflict("topic already exists".into()),
                    CNT_SENSITIVE_WORD => {
                        DomainError::Conflict("sensitive word already exists".into())
                    }
                    CNT_PENDING_REPORT => {
                        DomainError::Conflict("a pending report already exists".into())
                    }
                    CNT_COLUMN_ENTRY => {
                        DomainError::Conflict("article is already in the column".into())
                    }
                    CNT_COMMENT_ARTICLE | CNT_COLUMN_ENTRY_ARTICLE => {
                        DomainError::NotFound("article not found".into())
                    }
                    CNT_ARTICLE_CATEGORY => DomainError::NotFound("category not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Row counts come back as `i64`; a negative count never happens in practice.
pub fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
