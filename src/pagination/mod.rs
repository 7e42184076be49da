//! Listing pagination
//!
//! [`window`] turns `(current, count, radius)` into the slots of a
//! pagination bar. [`Pagination`] carries the offset/limit bookkeeping a
//! listing page does around it: how many pages a result set spans, which
//! rows to request, whether next/previous are enabled.

pub mod window;

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::error::PaginationError;

pub use window::{compute_window, render_window, PageRequest, PageSlot, DEFAULT_RADIUS};

/// Number of pages needed for `total_items` at `page_size` per page
pub fn page_count(total_items: u64, page_size: u32) -> Result<u32, PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::InvalidPageSize { page_size });
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    Ok(u32::try_from(pages).unwrap_or(u32::MAX))
}

/// Position of a listing page within a result set.
///
/// Deserializing goes through [`Pagination::new`], so a zero page or page
/// size is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPagination")]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total_items: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPagination {
    page: u32,
    page_size: u32,
    total_items: u64,
}

impl TryFrom<RawPagination> for Pagination {
    type Error = PaginationError;

    fn try_from(raw: RawPagination) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.page_size, raw.total_items)
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidCurrentPage { current_page: page });
        }
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize { page_size });
        }
        Ok(Self {
            page,
            page_size,
            total_items,
        })
    }

    /// First page using the configured page size
    pub fn first_page(config: &PaginationConfig, total_items: u64) -> Result<Self, PaginationError> {
        Self::new(1, config.page_size, total_items)
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        page_count(self.total_items, self.page_size).unwrap_or(0)
    }

    /// Rows to skip when fetching this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 1-based inclusive range of items on this page, `None` when the page is empty
    pub fn item_range(&self) -> Option<(u64, u64)> {
        let first = self.offset() + 1;
        if first > self.total_items {
            return None;
        }
        let last = (self.offset() + u64::from(self.page_size)).min(self.total_items);
        Some((first, last))
    }

    /// Same listing, another page
    pub fn go_to(&self, page: u32) -> Result<Self, PaginationError> {
        Self::new(page, self.page_size, self.total_items)
    }

    /// Slots of the pagination bar for this page
    pub fn window(&self, radius: u32) -> Result<Vec<PageSlot>, PaginationError> {
        compute_window(self.page, self.total_pages(), radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(0, 20), Ok(0));
        assert_eq!(page_count(1, 20), Ok(1));
        assert_eq!(page_count(20, 20), Ok(1));
        assert_eq!(page_count(21, 20), Ok(2));
        assert_eq!(
            page_count(5, 0),
            Err(PaginationError::InvalidPageSize { page_size: 0 })
        );
    }

    #[test]
    fn test_page_count_saturates() {
        assert_eq!(page_count(u64::MAX, 1), Ok(u32::MAX));
    }

    #[test]
    fn test_offsets_and_navigation() {
        let pagination = Pagination::new(3, 20, 95).unwrap();
        assert_eq!(pagination.total_pages(), 5);
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
        assert!(pagination.has_previous());
        assert!(pagination.has_next());
        assert_eq!(pagination.item_range(), Some((41, 60)));

        let last = pagination.go_to(5).unwrap();
        assert!(!last.has_next());
        assert_eq!(last.item_range(), Some((81, 95)));
    }

    #[test]
    fn test_empty_result_set() {
        let pagination = Pagination::first_page(&PaginationConfig::default(), 0).unwrap();
        assert_eq!(pagination.total_pages(), 0);
        assert!(!pagination.has_previous());
        assert!(!pagination.has_next());
        assert_eq!(pagination.item_range(), None);
        assert!(pagination.window(2).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_zero_page_and_size() {
        assert!(Pagination::new(0, 20, 10).is_err());
        assert!(Pagination::new(1, 0, 10).is_err());
    }

    #[test]
    fn test_deserialize_goes_through_new() {
        let pagination: Pagination =
            serde_json::from_str(r#"{"page": 3, "pageSize": 20, "totalItems": 95}"#).unwrap();
        assert_eq!(pagination, Pagination::new(3, 20, 95).unwrap());
        assert_eq!(pagination.offset(), 40);

        let zero_page =
            serde_json::from_str::<Pagination>(r#"{"page": 0, "pageSize": 20, "totalItems": 100}"#);
        assert!(zero_page.is_err());
        let zero_size =
            serde_json::from_str::<Pagination>(r#"{"page": 1, "pageSize": 0, "totalItems": 100}"#);
        assert!(zero_size.is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::new(2, 10, 35).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "pageSize": 10, "totalItems": 35})
        );
    }

    #[test]
    fn test_window_from_totals() {
        let pagination = Pagination::new(10, 10, 200).unwrap();
        assert_eq!(
            render_window(&pagination.window(2).unwrap()),
            "1 2 … 8 9 [10] 11 12 … 19 20"
        );
    }
}
