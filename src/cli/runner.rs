//! CLI runner - executes commands

use crate::batch::BatchRunner;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::github::{full_names, DeletionRecord, GitHubClient, RepoDeleter, RepoName, Repository};
use crate::pagination::FetchOutcome;
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List {
                output,
                first_page_only,
                ..
            } => self.list(output, *first_page_only).await,
            Commands::Delete {
                input,
                report,
                dry_run,
            } => self.delete(input, report.as_deref(), *dry_run).await,
        }
    }

    /// Merge the config file, environment and flags into one [`Config`]
    pub fn build_config(&self) -> Result<Config> {
        let mut config = match &self.cli.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(token) = &self.cli.token {
            config.token = Some(token.clone());
        }
        if let Some(username) = &self.cli.username {
            config.username = Some(username.clone());
        }
        if let Some(api_url) = &self.cli.api_url {
            config.api_base_url = api_url.clone();
        }
        if let Some(rps) = self.cli.rate_limit {
            config.requests_per_second = Some(rps);
        }
        if let Some(secs) = self.cli.timeout {
            config.timeout_secs = Some(secs);
        }
        if let Commands::List {
            max_pages: Some(max_pages),
            ..
        } = &self.cli.command
        {
            config.max_pages = Some(*max_pages);
        }

        config.validate()?;
        Ok(config)
    }

    // ========================================================================
    // list
    // ========================================================================

    async fn list(&self, output: &Path, first_page_only: bool) -> Result<()> {
        let config = self.build_config()?;
        let username = config.require_username()?.to_string();
        let client = GitHubClient::new(&config)?;

        if !config.auth().is_authenticated() {
            warn!("No token configured; only public repositories will be listed");
        }
        info!("Listing repositories of {username}");
        let outcome = if first_page_only {
            client.first_page_user_repos(&username).await?
        } else {
            client.list_user_repos(&username).await?
        };

        let names = full_names(&outcome.items);
        write_json_file(output, &names)?;
        info!("Wrote {} repository names to {}", names.len(), output.display());

        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "LIST",
                "list": {
                    "username": username,
                    "count": names.len(),
                    "pages": outcome.pages,
                    "complete": outcome.is_complete(),
                    "output": output.display().to_string(),
                    "warnings": warning_strings(&outcome),
                }
            })),
            OutputFormat::Pretty => print_listing(&username, &outcome, names.len(), output),
        }

        Ok(())
    }

    // ========================================================================
    // delete
    // ========================================================================

    async fn delete(&self, input: &Path, report_path: Option<&Path>, dry_run: bool) -> Result<()> {
        let config = self.build_config()?;
        let targets = read_targets(input)?;

        if targets.is_empty() {
            info!("No repositories listed in {}", input.display());
            if let Some(path) = report_path {
                write_json_file(path, &Vec::<DeletionRecord>::new())?;
            }
            match self.cli.format {
                OutputFormat::Json => self.output_message(&json!({
                    "type": "DELETE",
                    "delete": { "total": 0, "succeeded": 0, "failed": 0, "results": [] }
                })),
                OutputFormat::Pretty => println!("Nothing to delete"),
            }
            return Ok(());
        }

        if dry_run {
            self.dry_run(&targets);
            return Ok(());
        }

        config.require_token()?;
        let client = GitHubClient::new(&config)?;

        let report = BatchRunner::new("delete")
            .run(targets, &RepoDeleter::new(&client))
            .await;

        let records: Vec<DeletionRecord> = report
            .outcomes()
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(status) => DeletionRecord::deleted(&outcome.task, *status),
                Err(e) => DeletionRecord::failed(&outcome.task, e),
            })
            .collect();

        if let Some(path) = report_path {
            write_json_file(path, &records)?;
            info!("Wrote deletion report to {}", path.display());
        }

        match self.cli.format {
            OutputFormat::Json => self.output_message(&json!({
                "type": "DELETE",
                "delete": {
                    "total": report.len(),
                    "succeeded": report.success_count(),
                    "failed": report.failure_count(),
                    "results": records,
                }
            })),
            OutputFormat::Pretty => print_deletions(&records),
        }

        if report.is_success() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{} of {} deletions failed",
                report.failure_count(),
                report.len()
            )))
        }
    }

    fn dry_run(&self, targets: &[String]) {
        let parsed: Vec<(&String, Result<RepoName>)> =
            targets.iter().map(|t| (t, t.parse::<RepoName>())).collect();

        match self.cli.format {
            OutputFormat::Json => {
                let valid: Vec<String> = parsed
                    .iter()
                    .filter_map(|(_, r)| r.as_ref().ok().map(ToString::to_string))
                    .collect();
                let invalid: Vec<Value> = parsed
                    .iter()
                    .filter_map(|(raw, r)| {
                        r.as_ref()
                            .err()
                            .map(|e| json!({ "repo": raw, "error": e.to_string() }))
                    })
                    .collect();
                self.output_message(&json!({
                    "type": "DRY_RUN",
                    "dryRun": { "targets": valid, "invalid": invalid }
                }));
            }
            OutputFormat::Pretty => {
                println!("{}", "Dry run, nothing will be deleted".yellow().bold());
                for (raw, result) in &parsed {
                    match result {
                        Ok(repo) => println!("  {} {repo}", "would delete".red()),
                        Err(e) => println!("  {} {raw}: {e}", "invalid".yellow()),
                    }
                }
            }
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Read the deletion targets; a `null` document means no targets
fn read_targets(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let targets: Option<Vec<String>> = serde_json::from_str(&content)
        .with_context(|| {
            format!(
                "{} must hold a JSON array of \"owner/name\" strings",
                path.display()
            )
        })?;
    Ok(targets.unwrap_or_default())
}

fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

fn warning_strings(outcome: &FetchOutcome) -> Vec<String> {
    outcome.warnings.iter().map(ToString::to_string).collect()
}

fn print_listing(username: &str, outcome: &FetchOutcome, count: usize, output: &Path) {
    for item in &outcome.items {
        match serde_json::from_value::<Repository>(item.clone()) {
            Ok(repo) => {
                let mut tags = Vec::new();
                if repo.private {
                    tags.push("private".yellow().to_string());
                }
                if repo.fork {
                    tags.push("fork".cyan().to_string());
                }
                if repo.archived {
                    tags.push("archived".dimmed().to_string());
                }
                if tags.is_empty() {
                    println!("  {}", repo.full_name);
                } else {
                    println!("  {} [{}]", repo.full_name, tags.join(", "));
                }
            }
            Err(e) => warn!("Unrecognised repository object: {e}"),
        }
    }

    for warning in &outcome.warnings {
        println!("{} {warning}", "warning:".yellow().bold());
    }

    println!(
        "{} {count} repositories of {} across {} pages, saved to {}",
        "✓".green().bold(),
        username.bold(),
        outcome.pages,
        output.display()
    );
}

fn print_deletions(records: &[DeletionRecord]) {
    for record in records {
        match &record.error {
            None => println!("  {} {}", "✓ deleted".green(), record.repo),
            Some(error) => println!("  {} {}: {error}", "✗ failed".red(), record.repo),
        }
    }

    let failed = records.iter().filter(|r| !r.is_success()).count();
    let summary = format!("{} deleted, {failed} failed", records.len() - failed);
    if failed == 0 {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
}
