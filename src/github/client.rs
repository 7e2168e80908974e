//! GitHub REST client
//!
//! Thin layer over [`HttpClient`] and [`PaginatedFetcher`] for the two
//! endpoints the tool needs: listing a user's repositories and deleting
//! a repository.

use super::types::RepoName;
use crate::batch::TaskHandler;
use crate::config::Config;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::{FetchOutcome, PaginatedFetcher, PaginationConfig};
use crate::types::JsonValue;
use async_trait::async_trait;
use tracing::{info, warn};

/// Client for the repository endpoints
#[derive(Debug)]
pub struct GitHubClient {
    http: HttpClient,
    page_size: u32,
    max_pages: Option<u32>,
}

impl GitHubClient {
    /// Validate `config` and build a client from it
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_config(), config.auth())?;

        Ok(Self {
            http,
            page_size: config.page_size,
            max_pages: config.max_pages,
        })
    }

    /// Collection path of a user's repositories
    pub fn user_repos_path(username: &str) -> String {
        format!("/users/{}/repos", username.trim())
    }

    fn fetcher(&self, pagination: &PaginationConfig) -> PaginatedFetcher<'_> {
        PaginatedFetcher::new(&self.http)
            .with_paginator(pagination.build())
            .with_max_pages(self.max_pages)
    }

    /// Every repository of `username`, following `next` links
    pub async fn list_user_repos(&self, username: &str) -> Result<FetchOutcome> {
        let path = Self::user_repos_path(username);
        self.fetcher(&PaginationConfig::link_header(self.page_size))
            .fetch_pages(&path)
            .await
    }

    /// First page of `username`'s repositories only
    pub async fn first_page_user_repos(&self, username: &str) -> Result<FetchOutcome> {
        let path = Self::user_repos_path(username);
        self.fetcher(&PaginationConfig::single_page(self.page_size))
            .fetch_pages(&path)
            .await
    }

    /// Full names of every repository of `username`
    pub async fn list_repo_names(&self, username: &str) -> Result<Vec<String>> {
        let outcome = self.list_user_repos(username).await?;
        Ok(full_names(&outcome.items))
    }

    /// Full names from the first page only
    pub async fn first_page_repo_names(&self, username: &str) -> Result<Vec<String>> {
        let outcome = self.first_page_user_repos(username).await?;
        Ok(full_names(&outcome.items))
    }

    /// Delete a repository, returning the response status
    pub async fn delete_repo(&self, repo: &RepoName) -> Result<u16> {
        let response = self.http.delete(&repo.api_path()).await?;
        let status = response.status().as_u16();
        info!("Deleted {repo} (HTTP {status})");
        Ok(status)
    }
}

/// `full_name` of each item; items without one are skipped
pub fn full_names(items: &[JsonValue]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.get("full_name").and_then(JsonValue::as_str) {
            Some(name) => Some(name.to_string()),
            None => {
                warn!("Skipping item {index}: no string full_name");
                None
            }
        })
        .collect()
}

/// Batch handler deleting one `owner/name` per task
#[derive(Debug, Clone, Copy)]
pub struct RepoDeleter<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepoDeleter<'a> {
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> TaskHandler<String> for RepoDeleter<'a> {
    type Output = u16;

    async fn handle(&self, task: &String) -> Result<u16> {
        let repo: RepoName = task.parse()?;
        self.client.delete_repo(&repo).await
    }
}
