//! # Arbor CLI Integration Test Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the real `arbor` binary inside a temporary directory with its history,
//! templates and user config redirected there, so nothing outside the
//! temporary directory is read or written.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A bare `arbor` command.
pub fn arbor_cmd() -> Command {
    Command::cargo_bin("arbor").expect("Failed to find arbor binary for testing")
}

/// A temporary workspace for one test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn history_file(&self) -> PathBuf {
        self.path().join("state/history.json")
    }

    pub fn templates_file(&self) -> PathBuf {
        self.path().join("state/templates.json")
    }

    /// An `arbor` command running in the sandbox with isolated storage.
    pub fn cmd(&self) -> Command {
        let mut cmd = arbor_cmd();
        cmd.current_dir(self.path())
            .env("ARBOR_CONFIG", self.path().join("no-user-config.toml"))
            .env("ARBOR_HISTORY_FILE", self.history_file())
            .env("ARBOR_TEMPLATES_FILE", self.templates_file())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Writes `content` to `relative` inside the sandbox and returns its path.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

/// The outline used across tests.
pub const PROJECT_OUTLINE: &str = "\
ProjectRoot
    main.py
    utils/
        helper.py
";
