//! GitHub data types

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static REPO_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<owner>[A-Za-z0-9][A-Za-z0-9_-]*)/(?P<name>[A-Za-z0-9._-]+)$").unwrap()
});

/// `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoName {
    owner: String,
    name: String,
}

impl RepoName {
    /// Build from parts, validating both
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        format!("{}/{}", owner.into(), name.into()).parse()
    }

    /// Account that owns the repository
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// API path of the repository
    pub fn api_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let caps = REPO_NAME_REGEX
            .captures(trimmed)
            .ok_or_else(|| Error::invalid_repo_name(s, "expected 'owner/repo'"))?;

        let name = &caps["name"];
        if name == "." || name == ".." {
            return Err(Error::invalid_repo_name(s, "reserved repository name"));
        }

        Ok(Self {
            owner: caps["owner"].to_string(),
            name: name.to_string(),
        })
    }
}

impl TryFrom<String> for RepoName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RepoName> for String {
    fn from(repo: RepoName) -> Self {
        repo.to_string()
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository as returned by the list endpoints (fields used here only)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    pub html_url: Option<String>,
    pub default_branch: Option<String>,
}

/// One row of the deletion report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionRecord {
    /// Identifier as it appeared in the input
    pub repo: String,
    /// HTTP status of the delete call, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When the outcome was recorded
    pub at: DateTime<Utc>,
}

impl DeletionRecord {
    /// Successful deletion
    pub fn deleted(repo: impl Into<String>, status: u16) -> Self {
        Self {
            repo: repo.into(),
            status: Some(status),
            error: None,
            at: Utc::now(),
        }
    }

    /// Failed deletion
    pub fn failed(repo: impl Into<String>, error: &Error) -> Self {
        Self {
            repo: repo.into(),
            status: error.status(),
            error: Some(error.to_string()),
            at: Utc::now(),
        }
    }

    /// Whether the deletion succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
