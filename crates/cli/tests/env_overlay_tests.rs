//! Integration tests for environment overrides and `env-names`.

mod common;

use common::{SAMPLE_JSON, confmgr_cmd_for, write_fixture};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_env_names_lists_variables() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .arg("env-names")
        .assert()
        .success()
        .stdout(predicate::str::contains("database.port  DATABASE_PORT"))
        .stdout(predicate::str::contains("server.host    SERVER_HOST"));
}

#[test]
fn test_env_names_with_prefix_from_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    let output = confmgr_cmd_for(&path)
        .env("CONFMGR_ENV_PREFIX", "myapp")
        .args(["-o", "json", "env-names"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["database.user"], "MYAPP_DATABASE_USER");
}

#[test]
fn test_show_without_env_flag_ignores_variables() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .env("DATABASE_PORT", "6543")
        .args(["get", "database.port"])
        .assert()
        .success()
        .stdout("5432\n");
}

#[test]
fn test_env_flag_overrides_values_as_strings() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .env("DATABASE_PORT", " 6543 ")
        .args(["--env", "-o", "json", "get", "database.port"])
        .assert()
        .success()
        .stdout("\"6543\"\n");
}

#[test]
fn test_env_flag_ignores_empty_and_unknown_variables() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .env("SERVER_HOST", "")
        .env("DATABASE_PASSWORD", "secret")
        .args(["--env", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server.host   = localhost"))
        .stdout(predicate::str::contains("password").not());
}

#[test]
fn test_env_flag_logs_applied_overrides_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    let output = confmgr_cmd_for(&path)
        .env("RUST_LOG", "info")
        .env("DATABASE_PORT", "6543")
        .args(["--env", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("Applied environment overrides").count(),
        1,
        "{stderr}"
    );
}
