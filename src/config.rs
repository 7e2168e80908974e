//! Runtime configuration
//!
//! A [`Config`] is assembled once by the binary and passed by value to the
//! clients that need it. Layers, lowest to highest precedence:
//!
//! 1. [`Config::default`]
//! 2. an optional JSON config file
//! 3. environment variables (`GITHUB_ACCESS_TOKEN`, `GITHUB_USERNAME`,
//!    `GITHUB_API_URL`), read through the CLI
//! 4. command-line flags

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{
    ACCEPT_MEDIA_TYPE, API_VERSION_HEADER, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION,
    MAX_PAGE_SIZE,
};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Settings shared by every command
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// REST API root
    pub api_base_url: String,
    /// Value of the API version header
    pub api_version: String,
    /// Bearer token; anonymous when unset
    pub token: Option<String>,
    /// Account whose repositories are listed
    pub username: Option<String>,
    /// Items requested per page (1..=100)
    pub page_size: u32,
    /// Stop listing after this many pages
    pub max_pages: Option<u32>,
    /// Pace requests to at most this many per second
    pub requests_per_second: Option<u32>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Override the User-Agent header
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token: None,
            username: None,
            page_size: MAX_PAGE_SIZE,
            max_pages: None,
            requests_per_second: None,
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl Config {
    /// Load a JSON config file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON config document
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api_base_url)
            .map_err(|e| Error::invalid_value("api_base_url", e.to_string()))?;

        if self.api_version.trim().is_empty() {
            return Err(Error::invalid_value("api_version", "must not be empty"));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size),
            ));
        }

        if self.max_pages == Some(0) {
            return Err(Error::invalid_value("max_pages", "must be at least 1"));
        }

        if self.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Username, or an error naming the missing setting
    pub fn require_username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::missing_field("username (set GITHUB_USERNAME or --username)"))
    }

    /// Token, or an error naming the missing setting
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_field("token (set GITHUB_ACCESS_TOKEN or --token)"))
    }

    /// Credential to attach to requests
    pub fn auth(&self) -> AuthConfig {
        AuthConfig::from_token(self.token.as_deref())
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.api_base_url)
            .header("Accept", ACCEPT_MEDIA_TYPE)
            .header(API_VERSION_HEADER, &self.api_version);

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(rps) = self.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("requests_per_second", &self.requests_per_second)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.api_version, "2022-11-28");
        assert_eq!(config.page_size, 100);
        assert!(config.validate().is_ok());
        assert_eq!(config.auth(), AuthConfig::None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            Config::from_json_str(r#"{"username": "octocat", "requests_per_second": 2}"#)
                .unwrap();

        assert_eq!(config.username.as_deref(), Some("octocat"));
        assert_eq!(config.requests_per_second, Some(2));
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_json_str(r#"{"usernmae": "typo"}"#).unwrap_err();
        assert!(matches!(err, Error::JsonParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_base_url": "https://ghe.example.com/api/v3"}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "page_size"
        ));

        let config = Config {
            page_size: 101,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_pages: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_username_and_token() {
        let config = Config::default();
        assert!(matches!(
            config.require_username(),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(config.require_token().is_err());

        let config = Config {
            username: Some("octocat".to_string()),
            token: Some("ghp_x".to_string()),
            ..Config::default()
        };
        assert_eq!(config.require_username().unwrap(), "octocat");
        assert_eq!(config.require_token().unwrap(), "ghp_x");
        assert_eq!(config.auth(), AuthConfig::bearer("ghp_x"));
    }

    #[test]
    fn test_http_config() {
        let config = Config {
            requests_per_second: Some(3),
            timeout_secs: Some(10),
            user_agent: Some("janitor-test".to_string()),
            ..Config::default()
        };

        let http = config.http_config();
        assert_eq!(http.base_url.as_deref(), Some("https://api.github.com"));
        assert_eq!(
            http.default_headers.get("X-GitHub-Api-Version"),
            Some(&"2022-11-28".to_string())
        );
        assert_eq!(
            http.default_headers.get("Accept"),
            Some(&"application/vnd.github+json".to_string())
        );
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::per_second(3)));
        assert_eq!(http.timeout, Some(Duration::from_secs(10)));
        assert_eq!(http.user_agent, "janitor-test");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            token: Some("ghp_secret".to_string()),
            ..Config::default()
        };
        assert!(!format!("{config:?}").contains("ghp_secret"));
    }
}
