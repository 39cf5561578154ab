use posconf_postgres::types::OffsetPagination;
use serde::{Deserialize, Serialize};

/// Page-based pagination query parameters.
///
/// `page` is 1-based and defaults to 1; `limit` defaults to 10. Pages below 1
/// are treated as the first page and the limit is clamped to `1..=100`.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct PaginationRequest {
    /// The 1-based page number.
    pub page: Option<i64>,
    /// The maximum number of records per page.
    pub limit: Option<i64>,
}

impl PaginationRequest {
    /// Default page number.
    const DEFAULT_PAGE: i64 = 1;

    /// Returns a [`PaginationRequest`] for the given page and limit.
    #[inline]
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Returns the requested page number.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    /// Returns the requested limit.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(OffsetPagination::DEFAULT_LIMIT)
    }
}

impl From<PaginationRequest> for OffsetPagination {
    fn from(pagination: PaginationRequest) -> Self {
        OffsetPagination::from_page(pagination.page(), pagination.limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let pagination = OffsetPagination::from(PaginationRequest::default());
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn second_page_skips_first_ten() {
        let pagination = OffsetPagination::from(PaginationRequest::new(2, 10));
        assert_eq!(pagination.offset, 10);
        assert_eq!(pagination.page_number(), 2);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let pagination = OffsetPagination::from(PaginationRequest::new(0, 1_000));
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, 100);

        let pagination = OffsetPagination::from(PaginationRequest::new(-3, -1));
        assert_eq!(pagination.page_number(), 1);
        assert_eq!(pagination.limit, 1);
    }
}
