//! Tests for CLI argument parsing and config layering

use super::*;
use crate::error::Error;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("repo-janitor").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_list_defaults() {
    let cli = parse(&["list"]);
    match cli.command {
        Commands::List {
            output,
            first_page_only,
            max_pages,
        } => {
            assert_eq!(output, PathBuf::from("my-repos.json"));
            assert!(!first_page_only);
            assert_eq!(max_pages, None);
        }
        Commands::Delete { .. } => panic!("expected list"),
    }
    assert_eq!(cli.format, OutputFormat::Pretty);
}

#[test]
fn test_delete_args() {
    let cli = parse(&[
        "delete",
        "--input",
        "targets.json",
        "--report",
        "report.json",
        "--dry-run",
        "--format",
        "json",
    ]);
    match cli.command {
        Commands::Delete {
            input,
            report,
            dry_run,
        } => {
            assert_eq!(input, PathBuf::from("targets.json"));
            assert_eq!(report, Some(PathBuf::from("report.json")));
            assert!(dry_run);
        }
        Commands::List { .. } => panic!("expected delete"),
    }
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["repo-janitor", "archive"]).is_err());
}

#[test]
fn test_log_level() {
    assert_eq!(parse(&["list"]).log_level(), tracing::Level::INFO);
    assert_eq!(parse(&["-v", "list"]).log_level(), tracing::Level::DEBUG);
    assert_eq!(
        parse(&["list", "--log-level", "warn"]).log_level(),
        tracing::Level::WARN
    );
}

#[test]
fn test_flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"username": "from-file", "api_base_url": "https://ghe.example.com/api/v3", "page_size": 50}}"#
    )
    .unwrap();
    let config_path = file.path().to_str().unwrap();

    let cli = parse(&[
        "-C",
        config_path,
        "--username",
        "from-flag",
        "--token",
        "ghp_flag",
        "--rate-limit",
        "5",
        "list",
        "--max-pages",
        "3",
    ]);
    let config = Runner::new(cli).build_config().unwrap();

    assert_eq!(config.username.as_deref(), Some("from-flag"));
    assert_eq!(config.token.as_deref(), Some("ghp_flag"));
    assert_eq!(config.api_base_url, "https://ghe.example.com/api/v3");
    assert_eq!(config.page_size, 50);
    assert_eq!(config.requests_per_second, Some(5));
    assert_eq!(config.max_pages, Some(3));
}

#[test]
fn test_invalid_flag_value_fails_validation() {
    let cli = parse(&["--api-url", "not a url", "--token", "t", "list"]);
    let err = Runner::new(cli).build_config().unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_missing_config_file() {
    let cli = parse(&["-C", "/no/such/config.json", "list"]);
    let err = Runner::new(cli).build_config().unwrap_err();
    assert!(err.to_string().contains("/no/such/config.json"));
}
