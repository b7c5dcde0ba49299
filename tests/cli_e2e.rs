//! End-to-end CLI tests for the derivative-downloader binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod support;
use support::platform::{
    CLIENT_ID, CLIENT_SECRET, DOC_URN, doc_resource, manifest, mount_manifest, mount_resource,
    mount_token, resource_node, thumbnail_node, viewable,
};
use support::socket_guard::start_mock_server_or_skip;

fn downloader() -> Command {
    let mut cmd = Command::cargo_bin("derivative-downloader").unwrap();
    cmd.env_remove("FORGE_CLIENT_ID")
        .env_remove("FORGE_CLIENT_SECRET")
        .env_remove("APS_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    downloader()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF pages and thumbnails"))
        .stdout(predicate::str::contains("--urn"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    downloader()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("derivative-downloader"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    downloader()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_timeout_out_of_range_is_rejected() {
    downloader()
        .args(["--connect-timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("connect-timeout"));
}

/// Missing credentials fail before any request is made.
#[test]
fn test_binary_missing_credentials_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    downloader()
        .args(["--urn", DOC_URN, "--base-url", "http://127.0.0.1:9"])
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FORGE_CLIENT_ID").or(predicate::str::contains("client id")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_downloads_document_from_urn() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_token(&mock_server).await;
    mount_manifest(
        &mock_server,
        DOC_URN,
        manifest(vec![viewable(
            "Page 1",
            vec![resource_node("pdf-page", &doc_resource("p1.pdf"))],
        )]),
    )
    .await;
    mount_resource(&mock_server, &doc_resource("p1.pdf"), 200, b"%PDF page").await;
    let temp_dir = TempDir::new().unwrap();

    downloader()
        .env("FORGE_CLIENT_ID", CLIENT_ID)
        .env("FORGE_CLIENT_SECRET", CLIENT_SECRET)
        .env("APS_BASE_URL", mock_server.uri())
        .args(["--urn", DOC_URN])
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .success();

    let written = std::fs::read(temp_dir.path().join(DOC_URN).join("p1.pdf")).unwrap();
    assert_eq!(written, b"%PDF page");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_partial_download_exits_with_two() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_token(&mock_server).await;
    mount_manifest(
        &mock_server,
        DOC_URN,
        manifest(vec![viewable(
            "Page 1",
            vec![resource_node("pdf-page", &doc_resource("p1.pdf"))],
        )]),
    )
    .await;
    mount_resource(&mock_server, &doc_resource("p1.pdf"), 404, b"").await;
    let temp_dir = TempDir::new().unwrap();

    downloader()
        .env("FORGE_CLIENT_ID", CLIENT_ID)
        .env("FORGE_CLIENT_SECRET", CLIENT_SECRET)
        .args(["--urn", DOC_URN, "--base-url", &mock_server.uri(), "-q"])
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to download the PDF file for page `Page 1`"));
}

/// Thumbnail failures are reported at the same level as PDF failures, so
/// they still show under -q.
#[tokio::test(flavor = "multi_thread")]
async fn test_binary_quiet_still_reports_failed_thumbnail() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_token(&mock_server).await;
    mount_manifest(
        &mock_server,
        DOC_URN,
        manifest(vec![viewable(
            "Page 1",
            vec![
                resource_node("pdf-page", &doc_resource("p1.pdf")),
                thumbnail_node(&doc_resource("p1_thumb.png"), 200),
            ],
        )]),
    )
    .await;
    mount_resource(&mock_server, &doc_resource("p1.pdf"), 200, b"%PDF page").await;
    mount_resource(&mock_server, &doc_resource("p1_thumb.png"), 503, b"").await;
    let temp_dir = TempDir::new().unwrap();

    downloader()
        .env("FORGE_CLIENT_ID", CLIENT_ID)
        .env("FORGE_CLIENT_SECRET", CLIENT_SECRET)
        .args(["--urn", DOC_URN, "--base-url", &mock_server.uri(), "-q"])
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Failed to download the thumbnail `200x200` for page `Page 1`",
        ));
}
