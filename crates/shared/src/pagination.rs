//! Offset-based pagination utilities.

use serde::{Deserialize, Serialize};

use crate::validation::parse_positive_int;

/// Page used when the client omits `page` or sends something unusable.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client omits `limit` or sends something unusable.
pub const DEFAULT_LIMIT: i64 = 10;

/// A normalized page request. Both fields are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Creates a page request, clamping both values to a minimum of 1.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Builds a page request from raw query string values.
    ///
    /// Missing, non-numeric and sub-1 values fall back to
    /// [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive_int(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive_int(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Total number of pages for `total` records at this page size.
    pub fn total_pages(&self, total: i64) -> i64 {
        total_pages(total, self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Integer ceiling division of `total` by `limit`.
///
/// Returns 0 for a non-positive limit or total.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 || total <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}
