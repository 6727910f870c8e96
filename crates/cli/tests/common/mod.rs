//! Shared test utilities for confmgr integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Write fixture config files into temporary directories.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `CONFMGR_*` variables from the host never reach the spawned process.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;

/// The document used across CLI tests, in JSON.
pub const SAMPLE_JSON: &str =
    r#"{"database": {"user": "dbuser", "port": 5432}, "server": {"host": "localhost"}}"#;

/// The same document in YAML.
pub const SAMPLE_YAML: &str = "database:\n  user: dbuser\n  port: 5432\nserver:\n  host: localhost\n";

/// Returns a hermetic `confmgr` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `CONFMGR_*` variables and override variables used by the tests are cleared.
pub fn confmgr_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confmgr");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("CONFMGR_FILE")
        .env_remove("CONFMGR_FORMAT")
        .env_remove("CONFMGR_ENV_PREFIX")
        .env_remove("DATABASE_USER")
        .env_remove("DATABASE_PORT")
        .env_remove("SERVER_HOST")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic command already pointed at `file`.
pub fn confmgr_cmd_for(file: &Path) -> Command {
    let mut cmd = confmgr_cmd();
    cmd.arg("--file").arg(file);
    cmd
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
