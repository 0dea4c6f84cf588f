#![allow(clippy::unwrap_used)]
// End-to-end CLI tests. These exercise argument parsing, config
// handling, and local validation only; nothing here needs a live
// backend.

use assert_cmd::Command;
use predicates::prelude::*;

/// A command with its config and credentials isolated from the host.
fn spacebook(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("spacebook").unwrap();
    cmd.env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("SPACEBOOK_TOKEN", "test-token")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_top_level_commands() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("spaces"))
        .stdout(predicate::str::contains("bookings"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("flags"));
}

#[test]
fn no_arguments_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn completions_generate_for_bash() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_spacebook"));
}

#[test]
fn config_show_works_without_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default"));
}

#[test]
fn config_set_then_profiles_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args(["config", "set", "staging", "https://staging.spacebook.test"])
        .assert()
        .success();

    spacebook(dir.path())
        .args(["config", "profiles", "--output", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging"));
}

#[test]
fn config_use_rejects_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args(["config", "use", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn book_rejects_malformed_date_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args([
            "--base-url",
            "http://127.0.0.1:1",
            "book",
            "s1",
            "--date",
            "June 1st",
            "--start",
            "10:00",
            "--end",
            "12:00",
            "--name",
            "Avery",
            "--email",
            "avery@example.com",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn book_rejects_malformed_time() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args([
            "--base-url",
            "http://127.0.0.1:1",
            "book",
            "s1",
            "--date",
            "2025-06-01",
            "--start",
            "10am",
            "--end",
            "12:00",
            "--name",
            "Avery",
            "--email",
            "avery@example.com",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("HH:MM"));
}

#[test]
fn flags_set_rejects_invalid_state() {
    let dir = tempfile::tempdir().unwrap();
    spacebook(dir.path())
        .args(["flags", "set", "instant-booking", "maybe"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn whoami_without_session_exits_with_auth_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = spacebook(dir.path());
    // No token: init resolves anonymous without touching the network.
    cmd.env_remove("SPACEBOOK_TOKEN");
    cmd.args(["--base-url", "http://127.0.0.1:1", "auth", "whoami"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Not signed in"));
}
