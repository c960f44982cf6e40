//! Command-line behavior of the `sonidb-submit` binary

mod common;

use assert_cmd::Command;
use common::fixtures::{TIO2_DOCUMENT, TIO2_IDENTITY};
use predicates::prelude::*;
use std::path::PathBuf;
use uuid::Uuid;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("sonidb-submit").unwrap();
    for var in [
        "SONIDB_REPOSITORY",
        "SONIDB_COMMITTER",
        "SONIDB_BASE_BRANCH",
        "SONIDB_API_URL",
        "SONIDB_BIND",
        "SONIDB_TIMEOUT_SECS",
        "SONIDB_LOG_JSON",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Writes `contents` to a fresh file in the temp dir
fn scratch_file(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sonidb-{}.json", Uuid::new_v4()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("auth"));
}

#[test]
fn test_auth_setup_names_token_variables() {
    cmd()
        .args(["auth", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SONIDB_GH_TOKEN"))
        .stdout(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_invalid_repository_is_rejected() {
    cmd()
        .args(["--repository", "not a repo", "auth", "setup"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_bind_address_is_rejected() {
    cmd()
        .args(["--bind", "localhost-ish", "serve", "--dry-run"])
        .assert()
        .failure();
}

#[test]
fn test_publish_dry_run_reports_target() {
    let file = scratch_file(TIO2_DOCUMENT);

    cmd()
        .args(["publish", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "data/{TIO2_IDENTITY}.json"
        )));

    let _ = std::fs::remove_file(file);
}

#[test]
fn test_publish_rejects_malformed_record() {
    let file = scratch_file(r#"{"name": "TiO2"}"#);

    cmd()
        .args(["publish", "--dry-run"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));

    let _ = std::fs::remove_file(file);
}
