//! Offset-based pagination for listing queries.

use serde::{Deserialize, Serialize};

/// Maximum number of items per page.
pub const MAX_LIMIT: i64 = 100;

/// Offset-based pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Default page size.
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Returns the highest page whose offset fits in an `i64` for `page_size`.
    #[inline]
    pub fn max_page(page_size: i64) -> i64 {
        let page_size = page_size.clamp(1, MAX_LIMIT);
        i64::MAX / page_size + 1
    }

    /// Creates pagination from a 1-based page number and page size.
    ///
    /// The page size is clamped to `1..=MAX_LIMIT` and the page to
    /// `1..=max_page(page_size)`, so [`page_number`] always reports the page
    /// that is actually fetched.
    ///
    /// [`page_number`]: Self::page_number
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page_size = page_size.clamp(1, MAX_LIMIT);
        let page = page.clamp(1, Self::max_page(page_size));
        Self {
            limit: page_size,
            offset: (page - 1) * page_size,
        }
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Result of an offset-paginated query.
#[derive(Debug, Clone)]
pub struct OffsetPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of items matching the query across all pages.
    pub total: i64,
}

impl<T> OffsetPage<T> {
    /// Creates a new offset page.
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    /// Returns the total number of pages, `ceil(total / limit)`.
    pub fn total_pages(&self, pagination: &OffsetPagination) -> i64 {
        (self.total + pagination.limit - 1) / pagination.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_from_page() {
        let pagination = OffsetPagination::from_page(1, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);

        let pagination = OffsetPagination::from_page(2, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 10);

        let pagination = OffsetPagination::from_page(0, 20);
        assert_eq!(pagination.offset, 0);

        let pagination = OffsetPagination::from_page(-3, 500);
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, MAX_LIMIT);

        let pagination = OffsetPagination::from_page(4, 0);
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.offset, 3);
    }

    #[test]
    fn pagination_page_number() {
        assert_eq!(OffsetPagination::from_page(1, 10).page_number(), 1);
        assert_eq!(OffsetPagination::from_page(3, 10).page_number(), 3);
        assert_eq!(OffsetPagination::default().page_number(), 1);
    }

    #[test]
    fn huge_page_is_capped_without_overflow() {
        for limit in [1, 7, 10, MAX_LIMIT] {
            let pagination = OffsetPagination::from_page(i64::MAX, limit);
            let max_page = OffsetPagination::max_page(limit);

            assert_eq!(pagination.page_number(), max_page);
            assert_eq!(pagination.offset, (max_page - 1) * limit);
            assert_eq!(
                OffsetPagination::from_page(max_page, limit).page_number(),
                max_page
            );
        }
    }

    #[test]
    fn offset_page_total_pages() {
        let pagination = OffsetPagination::from_page(2, 10);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 25);
        assert_eq!(page.total_pages(&pagination), 3);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 30);
        assert_eq!(page.total_pages(&pagination), 3);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 0);
        assert_eq!(page.total_pages(&pagination), 0);
    }
}
