//! Listing pagination and the tri-state trust filter.

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE: i64 = 200;

/// Normalized page window for list queries.
///
/// `page` is 1-based. Page 0 is accepted on input and treated as page 1;
/// pages beyond [`MAX_PAGE`] are clamped. `page_size` is floored at zero,
/// and a zero page size yields an empty page while the total is still
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).clamp(0, MAX_PAGE).max(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(0);
        Self { page, page_size }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip. Saturates instead of overflowing on huge page sizes.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Filter on the `is_not_trusted` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrustFilter {
    /// No constraint on the column.
    #[default]
    Any,
    /// Only rows whose `is_not_trusted` equals the value.
    Only(bool),
}

impl TrustFilter {
    /// Parse a query-string value.
    ///
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`, ignoring
    /// surrounding whitespace. Any other value, including an absent one,
    /// leaves the filter unset.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("1" | "t" | "T" | "TRUE" | "true" | "True") => Self::Only(true),
            Some("0" | "f" | "F" | "FALSE" | "false" | "False") => Self::Only(false),
            _ => Self::Any,
        }
    }
}
