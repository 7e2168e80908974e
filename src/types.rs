//! Common types used throughout repo-janitor
//!
//! Shared type aliases and API constants.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// API Constants
// ============================================================================

/// Default REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// REST API version pinned on every request
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Header carrying the API version
pub const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Media type requested on every call
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Largest page the API will serve
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameter controlling page size
pub const PAGE_SIZE_PARAM: &str = "per_page";

// ============================================================================
// Log Level
// ============================================================================

/// Log level selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
