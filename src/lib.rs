// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # repo-janitor
//!
//! List every repository a GitHub user owns, and bulk-delete repositories
//! named in a local file.
//!
//! ## Features
//!
//! - **Paginated listing**: follows `Link: <…>; rel="next"` headers until the
//!   collection is exhausted
//! - **Shape tolerant**: pages may be bare arrays or keyed wrappers such as
//!   `{"total_count": 2, "repositories": [...]}`
//! - **Best-effort deletion**: every target is attempted; failures are
//!   reported, not fatal
//! - **Rate limiting**: optional request pacing for large batches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repo_janitor::{Config, GitHubClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config {
//!         token: Some("ghp_...".to_string()),
//!         ..Config::default()
//!     };
//!     let client = GitHubClient::new(&config)?;
//!
//!     let names = client.list_repo_names("octocat").await?;
//!     println!("{} repositories", names.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             CLI                                 │
//! │        list → my-repos.json      delete → deletion report       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴──────────────────────────────────┐
//! │                          GitHubClient                           │
//! │   list_user_repos()   first_page_user_repos()   delete_repo()   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │   Batch     │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Bearer   │ GET/DELETE│ Link Header   │ Array     │ Sequential  │
//! │ Anonymous│ Rate Limit│ Single Page   │ Wrapper   │ Per-task    │
//! │          │ Base URL  │ Page Limit    │ Empty     │ Result      │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Request authentication
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Pagination strategies and the paginated fetcher
pub mod pagination;

/// Response shape normalization
pub mod decode;

/// GitHub repository operations
pub mod github;

/// Sequential batch execution
pub mod batch;

/// Runtime configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::Config;
pub use github::{GitHubClient, RepoName};
pub use pagination::{FetchOutcome, FetchWarning, PaginatedFetcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
