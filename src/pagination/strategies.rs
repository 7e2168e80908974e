//! Pagination strategy implementations

use super::link::{LinkHeader, Relation};
use super::types::{NextPage, PaginationState, Paginator};
use crate::types::{StringMap, MAX_PAGE_SIZE, PAGE_SIZE_PARAM};
use reqwest::header::HeaderMap;

fn page_size_params(page_size: Option<u32>) -> StringMap {
    let mut params = StringMap::new();
    if let Some(size) = page_size {
        params.insert(PAGE_SIZE_PARAM.to_string(), size.to_string());
    }
    params
}

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 8288)
///
/// Extracts the next page URL from the `Link` header.
/// Format: `Link: <https://api.github.com/...?page=2>; rel="next", ...`
///
/// A header that names the relation without a readable target ends the walk
/// with [`NextPage::Unresolved`] instead of failing it.
#[derive(Debug, Clone)]
pub struct LinkHeaderPaginator {
    /// Relation to follow (default: next)
    pub rel: Relation,
    /// Page size requested on every page
    pub page_size: Option<u32>,
}

impl Default for LinkHeaderPaginator {
    fn default() -> Self {
        Self {
            rel: Relation::Next,
            page_size: Some(MAX_PAGE_SIZE),
        }
    }
}

impl LinkHeaderPaginator {
    /// Create a new link header paginator
    pub fn new(rel: Relation) -> Self {
        Self {
            rel,
            ..Default::default()
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}

impl Paginator for LinkHeaderPaginator {
    fn request_params(&self) -> StringMap {
        page_size_params(self.page_size)
    }

    fn process_response(
        &self,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);

        let Some(links) = LinkHeader::from_headers(headers) else {
            state.mark_done();
            return NextPage::Done;
        };

        if let Some(url) = links.get(&self.rel) {
            return NextPage::with_url(url);
        }

        state.mark_done();
        if links.claims(&self.rel) {
            NextPage::Unresolved {
                header: links.raw().to_string(),
            }
        } else {
            NextPage::Done
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator {
    /// Page size requested
    pub page_size: Option<u32>,
}

impl NoPaginator {
    /// Single page of the given size
    pub fn with_page_size(size: u32) -> Self {
        Self {
            page_size: Some(size),
        }
    }
}

impl Paginator for NoPaginator {
    fn request_params(&self) -> StringMap {
        page_size_params(self.page_size)
    }

    fn process_response(
        &self,
        _headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(records_count as u64);
        state.mark_done();
        NextPage::Done
    }
}
