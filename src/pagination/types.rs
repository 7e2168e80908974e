//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies and the
//! result of a full walk.

use super::link::Relation;
use crate::decode::ShapeWarning;
use crate::types::{JsonValue, StringMap, MAX_PAGE_SIZE};
use reqwest::header::HeaderMap;
use std::fmt;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page exists at this locator
    Continue {
        /// Locator of the next page
        url: String,
    },
    /// No more pages
    Done,
    /// The response claims another page but its locator could not be read
    Unresolved {
        /// Raw continuation metadata
        header: String,
    },
}

impl NextPage {
    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }
}

/// Configuration for pagination behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationConfig {
    /// Fetch the first page only
    SinglePage {
        /// Page size to request
        page_size: u32,
    },

    /// Follow `Link` header relations
    LinkHeader {
        /// Relation to follow
        rel: Relation,
        /// Page size to request
        page_size: u32,
    },
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::link_header(MAX_PAGE_SIZE)
    }
}

impl PaginationConfig {
    /// First page only
    pub fn single_page(page_size: u32) -> Self {
        Self::SinglePage { page_size }
    }

    /// Follow `rel="next"` links
    pub fn link_header(page_size: u32) -> Self {
        Self::LinkHeader {
            rel: Relation::Next,
            page_size,
        }
    }

    /// Build the paginator for this config
    pub fn build(&self) -> Box<dyn Paginator> {
        match self {
            Self::SinglePage { page_size } => {
                Box::new(super::NoPaginator::with_page_size(*page_size))
            }
            Self::LinkHeader { rel, page_size } => Box::new(
                super::LinkHeaderPaginator::new(rel.clone()).with_page_size(*page_size),
            ),
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub page: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page count
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters sent with every page request
    fn request_params(&self) -> StringMap;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        headers: &HeaderMap,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Non-fatal condition met during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchWarning {
    /// A page body had an unrecognised shape and contributed no items
    Shape {
        /// Page locator
        url: String,
        /// What was wrong with it
        warning: ShapeWarning,
    },
    /// A page claimed a continuation that could not be parsed; the walk stopped there
    Continuation {
        /// Page locator
        url: String,
        /// Raw `Link` header
        header: String,
    },
    /// The configured page cap was reached before the collection was exhausted
    PageLimit {
        /// Configured cap
        max_pages: u32,
    },
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { url, warning } => write!(f, "{url}: {warning}"),
            Self::Continuation { url, header } => {
                write!(f, "{url}: could not extract next page URL from Link header: {header}")
            }
            Self::PageLimit { max_pages } => {
                write!(f, "stopped after {max_pages} pages, more remain")
            }
        }
    }
}

/// Result of a paginated walk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Items of every page, in request order
    pub items: Vec<JsonValue>,
    /// Number of pages requested
    pub pages: u32,
    /// Non-fatal warnings, in the order they occurred
    pub warnings: Vec<FetchWarning>,
}

impl FetchOutcome {
    /// True unless the walk stopped before the collection was exhausted
    pub fn is_complete(&self) -> bool {
        !self.warnings.iter().any(|w| {
            matches!(
                w,
                FetchWarning::Continuation { .. } | FetchWarning::PageLimit { .. }
            )
        })
    }

    /// Consume into the item list
    pub fn into_items(self) -> Vec<JsonValue> {
        self.items
    }
}
