//! Integration tests for `set`.
//!
//! Invariants:
//! - A failed `set` leaves the file byte-for-byte unchanged.
//! - `--dry-run` never writes.

mod common;

use common::{SAMPLE_JSON, SAMPLE_YAML, confmgr_cmd_for, write_fixture};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_set_updates_file_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .args(["set", "database.port=6543", "--typed"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Updated 1 key(s)"));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["database"]["port"], 6543);
    assert_eq!(saved["database"]["user"], "dbuser");
    assert_eq!(saved["server"]["host"], "localhost");
}

#[test]
fn test_set_without_typed_stores_string() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .args(["set", "database.port=6543"])
        .assert()
        .success();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["database"]["port"], "6543");
}

#[test]
fn test_set_warns_when_untyped_value_changes_type() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .args(["set", "database.port=6543"])
        .assert()
        .success()
        .stderr(predicate::str::contains("pass --typed"));

    confmgr_cmd_for(&path)
        .args(["set", "database.user=admin"])
        .assert()
        .success()
        .stderr(predicate::str::contains("pass --typed").not());
}

#[test]
fn test_set_keeps_yaml_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.yaml", SAMPLE_YAML);

    confmgr_cmd_for(&path)
        .args(["set", "server.host=example.com", "database.user=admin"])
        .assert()
        .success();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("host: example.com"), "saved: {saved}");
    assert!(saved.contains("user: admin"), "saved: {saved}");
    assert!(!saved.trim_start().starts_with('{'), "saved: {saved}");
}

#[test]
fn test_set_unknown_key_is_atomic() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .args(["set", "database.user=v1", "missing.key=v2"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("missing.key"));

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_JSON);
}

#[test]
fn test_set_dry_run_prints_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .args(["set", "server.host=example.com", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"host\": \"example.com\""));

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_JSON);
}

#[test]
fn test_set_does_not_persist_environment_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .env("DATABASE_USER", "from-env")
        .args(["--env", "set", "server.host=example.com"])
        .assert()
        .success();

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["database"]["user"], "dbuser");
    assert_eq!(saved["server"]["host"], "example.com");
}

#[test]
fn test_set_requires_assignment() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path).arg("set").assert().code(2);
    confmgr_cmd_for(&path)
        .args(["set", "no-equals-sign"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}
