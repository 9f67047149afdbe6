use hrdesk_domain::Page;
use serde::Serialize;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// One page of list results.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T, S> From<Page<S>> for PageResponse<T>
where
    T: From<S>,
{
    fn from(page: Page<S>) -> Self {
        let total_pages = page.total_pages();
        let request = page.request;
        let page = page.map(T::from);

        Self {
            items: page.items,
            total: page.total,
            page: request.page(),
            limit: request.limit(),
            total_pages,
        }
    }
}

/// Parses an optional numeric query value; unparsable input counts as absent.
pub(super) fn lenient_number(value: Option<&str>) -> Option<u32> {
    value.and_then(|value| value.trim().parse::<u32>().ok())
}
