//! CLI surface tests: argument parsing and pre-flight validation.
//!
//! Nothing here touches the network; every scenario fails (or prints help)
//! before the first request would go out.

use assert_cmd::Command;
use predicates::prelude::*;

fn wcs_deploy() -> Command {
    let mut cmd = Command::cargo_bin("wcs-deploy").unwrap();
    // Isolate from any real user configuration and credentials.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("wcs-no-config"));
    cmd.env_remove("WCS_SOURCE__USERNAME");
    cmd.env_remove("WCS_TARGET__USERNAME");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    wcs_deploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("copy-dialog"))
        .stdout(predicate::str::contains("load-entities"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn test_copy_dialog_requires_workspace_arguments() {
    wcs_deploy()
        .args(["copy-dialog", "--root-node", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--source-workspace"));
}

#[test]
fn test_missing_credentials_fail_before_any_request() {
    wcs_deploy()
        .args([
            "copy-dialog",
            "--root-node",
            "a",
            "--source-workspace",
            "ws-src",
            "--target-workspace",
            "ws-dst",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a value"));
}

#[test]
fn test_unrecognized_insert_mode_is_rejected() {
    wcs_deploy()
        .args([
            "copy-dialog",
            "--root-node",
            "a",
            "--source-workspace",
            "ws-src",
            "--target-workspace",
            "ws-dst",
            "--source-username",
            "u",
            "--source-password",
            "p",
            "--target-username",
            "u",
            "--target-password",
            "p",
            "--insert-as",
            "cousin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid insertion mode 'cousin'"));
}

#[test]
fn test_load_entities_requires_csv_file_argument() {
    wcs_deploy()
        .args(["load-entities", "--workspace", "ws-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--csv-file"));
}
