//! Authentication module
//!
//! Supports: anonymous access and Bearer tokens (personal access tokens,
//! fine-grained tokens, app installation tokens).
//!
//! The `Authenticator` applies the configured credential to every request
//! built by the HTTP client.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
