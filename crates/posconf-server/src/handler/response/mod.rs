//! Response types for HTTP handlers.

use posconf_postgres::types::{OffsetPage, OffsetPagination};
use serde::{Deserialize, Serialize};

mod authentication;
mod error_response;
mod monitors;
mod submissions;

pub use authentication::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
pub use submissions::*;

/// Pagination block attached to every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Effective 1-based page number.
    pub page: i64,
    /// Effective page size.
    pub limit: i64,
    /// Number of matching records across all pages.
    pub total: i64,
    /// `ceil(total / limit)`.
    pub pages: i64,
}

impl PageInfo {
    /// Describes `page` as fetched with `pagination`.
    pub fn new<T>(page: &OffsetPage<T>, pagination: &OffsetPagination) -> Self {
        Self {
            page: pagination.page_number(),
            limit: pagination.limit,
            total: page.total,
            pages: page.total_pages(pagination),
        }
    }
}
