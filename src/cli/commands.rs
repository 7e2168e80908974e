//! CLI commands and argument parsing

use crate::types::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List and bulk-delete GitHub repositories
#[derive(Parser, Debug)]
#[command(name = "repo-janitor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Personal access token
    #[arg(long, env = "GITHUB_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Account whose repositories are listed
    #[arg(short, long, env = "GITHUB_USERNAME", global = true)]
    pub username: Option<String>,

    /// REST API root (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, env = "GITHUB_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Maximum requests per second
    #[arg(long, global = true)]
    pub rate_limit: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Level the log subscriber should start at
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            self.log_level.unwrap_or_default().into()
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the full names of a user's repositories to a JSON file
    List {
        /// Output file
        #[arg(short, long, default_value = "my-repos.json")]
        output: PathBuf,

        /// Fetch only the first page (at most 100 repositories)
        #[arg(long)]
        first_page_only: bool,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Delete every repository named in a JSON file
    Delete {
        /// JSON array of "owner/name" strings
        #[arg(short, long, default_value = "repos-for-deletion.json")]
        input: PathBuf,

        /// Write a JSON report of every deletion here
        #[arg(long)]
        report: Option<PathBuf>,

        /// Validate the input and show what would be deleted
        #[arg(long)]
        dry_run: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON message per line
    Json,
    /// Human-readable, colored output
    Pretty,
}
