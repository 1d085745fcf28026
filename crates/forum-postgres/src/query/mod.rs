//! Repository traits implemented for [`PgConnection`].
//!
//! [`PgConnection`]: crate::PgConnection

mod account;
mod comment;
mod post;

pub use account::AccountRepository;
pub use comment::CommentRepository;
pub use post::PostRepository;
use serde::{Deserialize, Serialize};

/// Maximum number of records a single page may hold.
const MAX_LIMIT: i64 = 1000;

/// Offset pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Creates pagination from a 1-based page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_LIMIT);
        Self::new(page_size, (page - 1).saturating_mul(page_size))
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_page_computes_offset() {
        let pagination = Pagination::from_page(3, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 20);
        assert_eq!(pagination.page_number(), 3);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let pagination = Pagination::from_page(0, 5000);
        assert_eq!(pagination.limit, MAX_LIMIT);
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::new(0, -4);
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let pagination = Pagination::from_page(i64::MAX, 30);
        assert_eq!(pagination.offset, i64::MAX);
    }
}
