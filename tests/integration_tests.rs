//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: CLI arguments → HTTP requests → JSON files

use clap::Parser;
use pretty_assertions::assert_eq;
use repo_janitor::cli::{Cli, Runner};
use repo_janitor::http::{HttpClient, HttpClientConfig};
use repo_janitor::pagination::{FetchWarning, PaginatedFetcher};
use repo_janitor::Error;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runner(server: &MockServer, args: &[&str]) -> Runner {
    let base = server.uri();
    let mut argv = vec![
        "repo-janitor",
        "--api-url",
        base.as_str(),
        "--token",
        "ghp_integration",
        "--username",
        "octocat",
        "--format",
        "json",
    ];
    argv.extend_from_slice(args);
    Runner::new(Cli::try_parse_from(argv).unwrap())
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn repo(full_name: &str) -> Value {
    json!({ "id": 1, "name": full_name.split('/').nth(1).unwrap(), "full_name": full_name })
}

// ============================================================================
// list
// ============================================================================

#[tokio::test]
async fn test_list_writes_all_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("per_page", "100"))
        .and(header("Authorization", "Bearer ghp_integration"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{base}/user/583231/repos?per_page=100&page=2>; rel="next""#).as_str(),
                )
                .set_body_json(json!([repo("octocat/alpha"), repo("octocat/beta")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/583231/repos"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo("octocat/gamma")])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("my-repos.json");

    runner(&server, &["list", "--output", output.to_str().unwrap()])
        .run()
        .await
        .unwrap();

    assert_eq!(
        read_json(&output),
        json!(["octocat/alpha", "octocat/beta", "octocat/gamma"])
    );
}

#[tokio::test]
async fn test_list_first_page_only() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!(r#"<{base}/next-page>; rel="next""#).as_str())
                .set_body_json(json!([repo("octocat/alpha")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(path("/next-page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo("octocat/beta")])))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("first.json");

    runner(
        &server,
        &["list", "--first-page-only", "--output", output.to_str().unwrap()],
    )
    .run()
    .await
    .unwrap();

    assert_eq!(read_json(&output), json!(["octocat/alpha"]));
}

#[tokio::test]
async fn test_list_empty_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("none.json");

    runner(&server, &["list", "--output", output.to_str().unwrap()])
        .run()
        .await
        .unwrap();

    assert_eq!(read_json(&output), json!([]));
}

#[tokio::test]
async fn test_list_failure_writes_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!(r#"<{base}/page-2>; rel="next""#).as_str())
                .set_body_json(json!([repo("octocat/alpha")])),
        )
        .mount(&server)
        .await;

    Mock::given(path("/page-2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("partial.json");

    let err = runner(&server, &["list", "--output", output.to_str().unwrap()])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_list_requires_username() {
    let server = MockServer::start().await;
    let cli = Cli::try_parse_from([
        "repo-janitor",
        "--api-url",
        server.uri().as_str(),
        "--username",
        "  ",
        "list",
    ])
    .unwrap();

    let err = Runner::new(cli).run().await.unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

// ============================================================================
// delete
// ============================================================================

#[tokio::test]
async fn test_delete_batch_with_report() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/alpha"))
        .and(header("Authorization", "Bearer ghp_integration"))
        .and(header("X-GitHub-Api-Version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/beta"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("repos-for-deletion.json");
    let report = dir.path().join("report.json");
    std::fs::write(&input, r#"["octocat/alpha", "octocat/beta"]"#).unwrap();

    runner(
        &server,
        &[
            "delete",
            "--input",
            input.to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
        ],
    )
    .run()
    .await
    .unwrap();

    let records = read_json(&report);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["repo"], "octocat/alpha");
    assert_eq!(records[0]["status"], 204);
    assert!(records[0].get("error").is_none());
    assert_eq!(records[1]["repo"], "octocat/beta");
}

#[tokio::test]
async fn test_delete_partial_failure_still_reports() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/alpha"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/gamma"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("targets.json");
    let report = dir.path().join("report.json");
    std::fs::write(&input, r#"["octocat/alpha", "no-slash", "octocat/gamma"]"#).unwrap();

    let err = runner(
        &server,
        &[
            "delete",
            "--input",
            input.to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
        ],
    )
    .run()
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "2 of 3 deletions failed");

    let records = read_json(&report);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["status"], 404);
    assert!(records[0]["error"].as_str().unwrap().contains("404"));
    assert!(records[1].get("status").is_none());
    assert!(records[1]["error"]
        .as_str()
        .unwrap()
        .contains("Invalid repository name"));
    assert_eq!(records[2]["status"], 204);
}

#[tokio::test]
async fn test_delete_null_document_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("targets.json");
    let report = dir.path().join("report.json");
    std::fs::write(&input, "null").unwrap();

    runner(
        &server,
        &[
            "delete",
            "--input",
            input.to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
        ],
    )
    .run()
    .await
    .unwrap();

    assert_eq!(read_json(&report), json!([]));
}

#[tokio::test]
async fn test_delete_dry_run_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("targets.json");
    std::fs::write(&input, r#"["octocat/alpha", "bad name"]"#).unwrap();

    runner(
        &server,
        &["delete", "--dry-run", "--input", input.to_str().unwrap()],
    )
    .run()
    .await
    .unwrap();
}

#[tokio::test]
async fn test_delete_missing_input_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.json");

    let err = runner(&server, &["delete", "--input", input.to_str().unwrap()])
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[tokio::test]
async fn test_delete_rejects_non_array_input() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("targets.json");
    std::fs::write(&input, r#"{"repos": ["octocat/alpha"]}"#).unwrap();

    let err = runner(&server, &["delete", "--input", input.to_str().unwrap()])
        .run()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("JSON array"));
}

// ============================================================================
// Fetcher against wrapped responses
// ============================================================================

#[tokio::test]
async fn test_fetcher_wrapped_installation_listing() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/installation/repositories"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!(r#"<{base}/installation/repositories?page=2>; rel="next""#).as_str())
                .set_body_json(json!({
                    "total_count": 3,
                    "repository_selection": "all",
                    "repositories": [repo("org/one"), repo("org/two")]
                })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/installation/repositories"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "repositories": [repo("org/three")]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::builder().base_url(base).build()).unwrap();
    let outcome = PaginatedFetcher::new(&client)
        .fetch_pages("/installation/repositories")
        .await
        .unwrap();

    let names: Vec<&str> = outcome
        .items
        .iter()
        .map(|r| r["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["org/one", "org/two", "org/three"]);
    assert_eq!(outcome.pages, 2);
    assert!(outcome.warnings.is_empty());
}

#[tokio::test]
async fn test_fetcher_broken_continuation_keeps_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", r#"<>; rel="next""#)
                .set_body_json(json!([repo("octocat/alpha")])),
        )
        .mount(&server)
        .await;

    let client =
        HttpClient::with_config(HttpClientConfig::builder().base_url(server.uri()).build()).unwrap();
    let outcome = PaginatedFetcher::new(&client)
        .fetch_pages("/users/octocat/repos")
        .await
        .unwrap();

    assert_eq!(outcome.items.len(), 1);
    assert!(!outcome.is_complete());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [FetchWarning::Continuation { .. }]
    ));
}
