//
//  confluence-client
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Binary tests that never touch the network.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `cfl` with an isolated home and no `CONFLUENCE_*` variables.
fn cfl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cfl").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("CONFLUENCE_URL")
        .env_remove("CONFLUENCE_USER")
        .env_remove("CONFLUENCE_TOKEN")
        .env_remove("CONFLUENCE_PASSWORD");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("descendants"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cfl version "));
}

#[test]
fn test_convert_rejects_unknown_representation() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["convert", "-", "--to", "invalid", "--url", "https://example.com"])
        .write_stdin("<p>Hi</p>")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported representation: invalid"));
}

#[test]
fn test_missing_url_is_reported() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["get", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Confluence URL configured"));
}

#[test]
fn test_invalid_id_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    cfl(&home).args(["get", "not-a-number"]).assert().code(2);
}

#[cfg(unix)]
#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["config", "set", "default_space", "DOCS"])
        .assert()
        .success();

    cfl(&home)
        .args(["config", "get", "default_space"])
        .assert()
        .success()
        .stdout("DOCS\n");

    cfl(&home)
        .args(["config", "set", "password", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}
