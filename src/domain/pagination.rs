// src/domain/pagination.rs
pub const MAX_PAGE_SIZE: u32 = 50;

/// Offset pagination request. Always holds `page >= 1` and
/// `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build from raw, possibly absent or out-of-range inputs.
    ///
    /// A page below one becomes one. A page size outside `1..=MAX_PAGE_SIZE`
    /// falls back to `default_size` rather than being clamped to the edge.
    pub fn normalized(page: Option<i64>, page_size: Option<i64>, default_size: u32) -> Self {
        let page = match page {
            Some(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
            _ => 1,
        };

        Self {
            page,
            page_size: normalize_limit(page_size, default_size),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

/// Same rule as a page size; used for top-N listings.
pub fn normalize_limit(limit: Option<i64>, default: u32) -> u32 {
    match limit {
        Some(value) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&value) => value as u32,
        _ => default,
    }
}
