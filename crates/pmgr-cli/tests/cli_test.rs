//! Integration tests for the `pmgr` binary.
//!
//! Validate argument parsing, help output, and credential handling
//! without a live service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Build a command for the `pmgr` binary with env isolation.
fn pmgr_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pmgr");
    cmd.env_remove("PMGR_URL")
        .env_remove("PMGR_USERNAME")
        .env_remove("PMGR_PASSWORD")
        .env_remove("PMGR_TIMEOUT");
    cmd
}

#[test]
fn no_args_shows_help() {
    let output = pmgr_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = String::from_utf8_lossy(&output.stderr).to_string()
        + &String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Usage"), "expected usage text:\n{text}");
}

#[test]
fn help_lists_the_commands() {
    pmgr_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("movies")
            .and(predicate::str::contains("rate"))
            .and(predicate::str::contains("populate")),
    );
}

#[test]
fn version_flag_works() {
    pmgr_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pmgr"));
}

#[test]
fn missing_credentials_exit_with_auth_code() {
    pmgr_cmd()
        .arg("list")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn rate_requires_stars_or_no_opinion_to_conflict() {
    // Both at once is a clap-level usage error.
    pmgr_cmd()
        .args(["rate", "1", "--stars", "4", "--no-opinion"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn movie_add_requires_its_flags() {
    pmgr_cmd()
        .args(["movie", "add", "--imdb", "tt0120737"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}
