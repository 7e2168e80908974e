//! Pagination module
//!
//! Supports: Link Header, single page
//!
//! # Overview
//!
//! The [`PaginatedFetcher`] drives the request loop. A [`Paginator`]
//! strategy inspects each response and decides whether and where to
//! continue; the [`link`] parser gives it a typed view of `Link` headers.

mod fetcher;
pub mod link;
mod strategies;
mod types;

pub use fetcher::PaginatedFetcher;
pub use link::{Link, LinkHeader, Relation};
pub use strategies::{LinkHeaderPaginator, NoPaginator};
pub use types::{
    FetchOutcome, FetchWarning, NextPage, PaginationConfig, PaginationState, Paginator,
};
