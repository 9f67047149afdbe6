use serde::Serialize;

/// Largest page size a list operation returns.
pub const MAX_PAGE_LIMIT: u32 = 100;

const DEFAULT_PAGE_LIMIT: u32 = 10;

/// 1-based page selection with a bounded page size.
///
/// Built only through [`PageRequest::new`], so page and limit are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Builds a page request from optional query values.
    ///
    /// Missing or zero page becomes 1; missing or zero limit becomes 10;
    /// limits above [`MAX_PAGE_LIMIT`] are clamped.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|value| *value > 0).unwrap_or(1);
        let limit = limit
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);

        Self { page, limit }
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the unpaginated total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: u64,
    /// Page that was requested.
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Returns the number of pages needed for `total` items.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.request.limit()))
    }

    /// Maps page items while keeping totals.
    pub fn map<U>(self, mapper: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(mapper).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_PAGE_LIMIT, Page, PageRequest};

    #[test]
    fn defaults_to_first_page_of_ten() {
        let request = PageRequest::new(None, None);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 10);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn limit_is_capped() {
        let request = PageRequest::new(Some(3), Some(5_000));
        assert_eq!(request.limit(), MAX_PAGE_LIMIT);
        assert_eq!(request.offset(), 200);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let request = PageRequest::new(Some(0), Some(0));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 10);

        let page: Page<u8> = Page {
            items: Vec::new(),
            total: 0,
            request,
        };
        assert_eq!(request.offset(), 0);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page {
            items: Vec::new(),
            total: 21,
            request: PageRequest::new(Some(1), Some(10)),
        };
        assert_eq!(page.total_pages(), 3);
    }
}
