//! Response types for HTTP handlers.

use serde::{Deserialize, Serialize};

mod accounts;
mod authentication;
mod comments;
mod errors;
mod monitors;
mod posts;

pub use accounts::*;
pub use authentication::*;
pub use comments::*;
pub use errors::*;
pub use monitors::*;
pub use posts::*;

/// One page of a paginated list.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 1-based page number.
    pub page: i64,
    /// Requested page size.
    pub limit: i64,
    /// Total number of items across all pages.
    pub total: i64,
    /// Items on this page.
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(page: i64, limit: i64, total: i64, data: Vec<T>) -> Self {
        Self {
            page,
            limit,
            total,
            data,
        }
    }
}
