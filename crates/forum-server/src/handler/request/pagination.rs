//! Page-based pagination for list endpoints.

use forum_postgres::query::Pagination;
use serde::{Deserialize, Serialize};

/// `?page&limit` query parameters.
///
/// Out-of-range values are clamped rather than rejected: the page is at least
/// 1 and the limit stays within 5 to 30.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Number of items per page.
    pub limit: Option<i64>,
}

impl PageParams {
    const DEFAULT_LIMIT: i64 = 10;
    const MIN_LIMIT: i64 = 5;
    const MAX_LIMIT: i64 = 30;

    /// Returns parameters for the given page and limit.
    #[inline]
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Page number, at least 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Page size, clamped to 5..=30 and 10 when absent.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(Self::MIN_LIMIT, Self::MAX_LIMIT)
    }

    /// Database offset and limit for this page.
    pub fn to_pagination(self) -> Pagination {
        Pagination::from_page(self.page(), self.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.to_pagination().offset, 0);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(PageParams::new(0, 1).page(), 1);
        assert_eq!(PageParams::new(-3, 1).limit(), 5);
        assert_eq!(PageParams::new(2, 500).limit(), 30);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let pagination = PageParams::new(3, 20).to_pagination();
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 40);
    }
}
