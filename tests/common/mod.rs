//! Shared test helpers for regraft integration tests.
//!
//! All tests run inside temp directories — no side effects on the real
//! checkout. Each test builds its own fork-plus-upstream tree under
//! `sandbox()` and runs the binary from there.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Create an empty directory for one test to lay its files out in.
pub fn sandbox() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Write a file under `dir`, creating parent directories as needed.
/// Returns the absolute path.
pub fn write_file(dir: &Path, rel_path: &str, content: &str) -> PathBuf {
    let path = dir.join(rel_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Read a file under `dir` as UTF-8. Panics if it is missing.
pub fn read_file(dir: &Path, rel_path: &str) -> String {
    let path = dir.join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

/// Run regraft with `dir` as its working directory.
pub fn regraft_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_regraft"))
        .current_dir(dir)
        .output()
        .expect("failed to execute regraft")
}

/// Run regraft and assert it succeeds. Returns stdout as string.
pub fn regraft_ok(dir: &Path) -> String {
    let out = regraft_in(dir);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "regraft failed:\nstdout: {stdout}\nstderr: {stderr}",
    );
    stdout.to_string()
}
