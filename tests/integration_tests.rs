//! Integration tests for the pvsadm CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// pvsadm with a clean environment, run inside a scratch directory
fn pvsadm(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pvsadm").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("IBMCLOUD_API_KEY")
        .env_remove("RUST_LOG")
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Power Systems Virtual Server"))
        .stdout(predicate::str::contains("--api-key"))
        .stdout(predicate::str::contains("--audit-file"))
        .stdout(predicate::str::contains("--debug").not());
}

#[test]
fn test_cli_version_flag() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pvsadm"));
}

#[test]
fn test_version_needs_no_credential() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version:"));

    // Nothing was audited, so no log file appears
    assert!(!dir.path().join("pvsadm.log").exists());
}

#[test]
fn test_invalid_subcommand_shows_error() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_image_help_hides_audit_file() {
    let dir = TempDir::new().unwrap();
    for args in [
        &["image", "--help"][..],
        &["image", "import", "--help"],
        &["image", "qcow2ova", "--help"],
        &["image", "sync", "--help"],
        &["image", "upload", "--help"],
        &["help", "image"],
    ] {
        pvsadm(&dir)
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains("--audit-file").not())
            .stdout(predicate::str::contains("--api-key"));
    }
}

#[test]
fn test_other_help_lists_audit_file() {
    let dir = TempDir::new().unwrap();
    for args in [
        &["get", "--help"][..],
        &["get", "events", "--help"],
        &["purge", "--help"],
        &["purge", "vms", "--help"],
        &["version", "--help"],
    ] {
        pvsadm(&dir)
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains("--audit-file"));
    }
}

#[test]
fn test_audit_file_still_accepted_under_image() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .args(["image", "sync", "--audit-file", "other.log", "-s", "spec.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api-key can't be empty"));
}

#[test]
fn test_missing_credential_fails() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .args(["get", "events", "--instance-id", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "api-key can't be empty, pass the token via --api-key or set IBMCLOUD_API_KEY environment variable",
        ))
        .stderr(predicate::str::contains("Using an API key from").not());
}

#[test]
fn test_error_survives_silenced_logging() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .env("RUST_LOG", "off")
        .args(["get", "events", "-i", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("api-key can't be empty"));
}

#[test]
fn test_version_ignores_malformed_settings_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pvsadm.toml"), "[log]\nlevel = 42\n").unwrap();
    pvsadm(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version:"))
        .stderr(predicate::str::contains("using default settings"));
}

#[test]
fn test_version_ignores_malformed_settings_env() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .env("PVSADM_LOG", "x")
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version:"));
}

#[test]
fn test_env_fallback_is_logged() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .env("IBMCLOUD_API_KEY", "from-env")
        .args(["get", "events", "--instance-id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Using an API key from IBMCLOUD_API_KEY environment variable",
        ))
        // Got past the credential check, failed at the missing client
        .stderr(predicate::str::contains("no PowerVS API client is linked"));
}

#[test]
fn test_flag_skips_env_fallback() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .env("IBMCLOUD_API_KEY", "from-env")
        .args(["--api-key", "from-flag", "get", "events", "--instance-id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Using an API key from").not())
        .stderr(predicate::str::contains("no PowerVS API client is linked"));
}

#[test]
fn test_purge_is_audited_to_default_file() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .args([
            "purge",
            "vms",
            "-k",
            "key",
            "-i",
            "abc",
            "--no-prompt",
            "--audit-file",
            "elsewhere.log",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("purge vms: no PowerVS API client"));

    // The log stays bound to the default path
    let log = std::fs::read_to_string(dir.path().join("pvsadm.log")).unwrap();
    assert!(log.contains("\"name\":\"purge vms\""));
    assert!(!dir.path().join("elsewhere.log").exists());
}

#[test]
fn test_purge_dry_run_succeeds() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .args(["purge", "keys", "-k", "key", "-n", "lab", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));
}

#[test]
fn test_namespace_without_child_prints_help() {
    let dir = TempDir::new().unwrap();
    pvsadm(&dir)
        .arg("get")
        .assert()
        .success()
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("ports"));
}
