use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

const MAX_WORD_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensitiveWordId(pub i64);

impl SensitiveWordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "sensitive word id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

#[derive(Debug, Clone)]
pub struct SensitiveWord {
    pub id: SensitiveWordId,
    pub word: String,
    pub created_at: DateTime<Utc>,
}

pub fn normalize_word(word: &str) -> DomainResult<String> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("sensitive word cannot be empty".into()));
    }
    if trimmed.chars().count() > MAX_WORD_LEN {
        return Err(DomainError::Validation(format!(
            "sensitive word must be at most {MAX_WORD_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive substring masking. Each matched character becomes `*`.
pub struct SensitiveWordFilter {
    words: Vec<Vec<char>>,
}

impl SensitiveWordFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<Vec<char>> = words
            .into_iter()
            .map(|w| fold(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        // Longer words first so overlapping entries mask the widest span.
        words.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn mask(&self, text: &str) -> String {
        if self.words.is_empty() {
            return text.to_string();
        }

        let original: Vec<char> = text.chars().collect();
        // Lowercasing may expand a char (`İ` folds to two), so each folded
        // char keeps the index of the original char it came from.
        let folded: Vec<(usize, char)> = original
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.to_lowercase().map(move |l| (i, l)))
            .collect();

        let mut masked = vec![false; original.len()];
        for word in &self.words {
            if word.len() > folded.len() {
                continue;
            }
            for start in 0..=folded.len() - word.len() {
                let window = &folded[start..start + word.len()];
                if window.iter().map(|(_, c)| c).eq(word.iter()) {
                    for (index, _) in window {
                        masked[*index] = true;
                    }
                }
            }
        }

        original
            .iter()
            .zip(masked)
            .map(|(c, hit)| if hit { '*' } else { *c })
            .collect()
    }
}

fn fold(value: &str) -> Vec<char> {
    value.chars().flat_map(char::to_lowercase).collect()
}
