//! Integration tests for `convert` and `check`.

mod common;

use common::{SAMPLE_JSON, SAMPLE_YAML, confmgr_cmd_for, write_fixture};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_convert_json_to_toml_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);
    let target = temp_dir.path().join("out/config.toml");

    confmgr_cmd_for(&source)
        .arg("convert")
        .arg(&target)
        .assert()
        .success()
        .stderr(predicate::str::contains("TOML"));

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("[database]"), "written: {written}");
    assert!(written.contains("port = 5432"), "written: {written}");
    assert!(written.contains("host = \"localhost\""), "written: {written}");
}

#[test]
fn test_convert_with_explicit_format() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_fixture(temp_dir.path(), "config.yaml", SAMPLE_YAML);
    let target = temp_dir.path().join("config.out");

    confmgr_cmd_for(&source)
        .arg("convert")
        .arg(&target)
        .args(["--to", "ini"])
        .assert()
        .success();

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("[database]"), "written: {written}");
    assert!(written.contains("port=5432"), "written: {written}");
}

#[test]
fn test_convert_applies_environment_overlay() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);
    let target = temp_dir.path().join("config.yaml");

    confmgr_cmd_for(&source)
        .env("APP_SERVER_HOST", "example.com")
        .args(["--env", "--env-prefix", "APP", "convert"])
        .arg(&target)
        .assert()
        .success();

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("host: example.com"), "written: {written}");
    // Source file is untouched.
    assert_eq!(fs::read_to_string(&source).unwrap(), SAMPLE_JSON);
}

#[test]
fn test_convert_unrepresentable_exits_4() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_fixture(
        temp_dir.path(),
        "config.json",
        r#"{"a": {"b": {"c": 1}}}"#,
    );
    let target = temp_dir.path().join("config.ini");

    confmgr_cmd_for(&source)
        .arg("convert")
        .arg(&target)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("a.b"));
    assert!(!target.exists());
}

#[test]
fn test_check_passes_for_clean_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.json", SAMPLE_JSON);

    confmgr_cmd_for(&path)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK:"))
        .stdout(predicate::str::contains("3 keys"));
}

#[test]
fn test_check_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(temp_dir.path(), "config.yaml", SAMPLE_YAML);

    let output = confmgr_cmd_for(&path)
        .args(["-o", "json", "check"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["format"], "YAML");
    assert_eq!(report["keys"], 3);
}

#[test]
fn test_check_reports_empty_section() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        temp_dir.path(),
        "config.json",
        r#"{"server": {"host": "x"}, "plugins": {}}"#,
    );

    confmgr_cmd_for(&path)
        .arg("check")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("plugins"));
}

#[test]
fn test_check_reports_value_section_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_fixture(
        temp_dir.path(),
        "config.json",
        r#"{"a": 1, "a.b": 2}"#,
    );

    confmgr_cmd_for(&path)
        .arg("check")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("conflicts"));
}
