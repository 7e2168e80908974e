//! Paginated fetch loop
//!
//! Requests one page at a time, normalizes each body and follows the
//! paginator's continuation until the collection is exhausted.

use super::types::{FetchOutcome, FetchWarning, NextPage, PaginationState, Paginator};
use super::LinkHeaderPaginator;
use crate::decode::ShapeNormalizer;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::JsonValue;
use tracing::{debug, info, warn};

/// Walks a paginated collection and concatenates its items
///
/// Error policy:
/// - a failed page request fails the whole walk and nothing gathered so far
///   is returned;
/// - an unreadable continuation or page shape is recorded as a
///   [`FetchWarning`] and the walk keeps what it has.
pub struct PaginatedFetcher<'a> {
    client: &'a HttpClient,
    paginator: Box<dyn Paginator>,
    normalizer: ShapeNormalizer,
    max_pages: Option<u32>,
}

impl<'a> PaginatedFetcher<'a> {
    /// Follow `rel="next"` links, 100 items per page
    pub fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            paginator: Box::new(LinkHeaderPaginator::default()),
            normalizer: ShapeNormalizer::default(),
            max_pages: None,
        }
    }

    /// Use a different pagination strategy
    #[must_use]
    pub fn with_paginator(mut self, paginator: Box<dyn Paginator>) -> Self {
        self.paginator = paginator;
        self
    }

    /// Use a different shape normalizer
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: ShapeNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Stop after this many pages
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch every item reachable from `start`
    pub async fn fetch_all(&self, start: &str) -> Result<Vec<JsonValue>> {
        Ok(self.fetch_pages(start).await?.into_items())
    }

    /// Fetch every item reachable from `start`, with page count and warnings
    pub async fn fetch_pages(&self, start: &str) -> Result<FetchOutcome> {
        let mut outcome = FetchOutcome::default();
        let mut state = PaginationState::new();
        let mut current = start.to_string();

        info!("Starting paginated fetch from: {current}");

        loop {
            if let Some(max_pages) = self.max_pages {
                if state.page >= max_pages {
                    warn!("Stopping after {max_pages} pages; more pages remain");
                    outcome.warnings.push(FetchWarning::PageLimit { max_pages });
                    break;
                }
            }

            debug!("Fetching page {}: {current}", state.page + 1);

            let mut request = RequestConfig::new();
            for (key, value) in self.paginator.request_params() {
                request = request.query(key, value);
            }

            let response = self.client.get_with_config(&current, request).await?;
            let headers = response.headers().clone();
            let body = response.text().await?;
            state.next_page();

            let page = self.normalizer.normalize_text(&body);
            if let Some(warning) = page.warning {
                warn!("Could not extract items from {current}: {warning}");
                outcome.warnings.push(FetchWarning::Shape {
                    url: current.clone(),
                    warning,
                });
            }

            let count = page.items.len();
            outcome.items.extend(page.items);
            info!("Fetched {count} items from page {}", state.page);

            match self.paginator.process_response(&headers, count, &mut state) {
                NextPage::Continue { url } => {
                    debug!("Next page URL: {url}");
                    current = url;
                }
                NextPage::Done => {
                    debug!("No more pages to fetch");
                    state.mark_done();
                }
                NextPage::Unresolved { header } => {
                    warn!("Could not extract next page URL from Link header: {header}");
                    outcome.warnings.push(FetchWarning::Continuation {
                        url: current.clone(),
                        header,
                    });
                    state.mark_done();
                }
            }

            if state.done {
                break;
            }
        }

        outcome.pages = state.page;
        info!(
            "Fetched a total of {} items across {} pages",
            state.total_fetched, outcome.pages
        );
        Ok(outcome)
    }
}

impl std::fmt::Debug for PaginatedFetcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFetcher")
            .field("client", &self.client)
            .field("normalizer", &self.normalizer)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}
