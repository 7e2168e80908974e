//! GitHub REST API operations
//!
//! Repository listing (all pages or first page only) and repository
//! deletion, on top of the crate's HTTP client and paginated fetcher.

mod client;
mod types;

pub use client::{full_names, GitHubClient, RepoDeleter};
pub use types::{DeletionRecord, RepoName, Repository};
