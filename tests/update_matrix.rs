//! Integration tests for batch updates through `run_matrix`.
//!
//! These drive the library against real files in a temp tree, the way the
//! binary's canonical matrix does, and check exactly what lands on disk.

mod common;

use common::{read_file, sandbox, write_file};
use regraft::error::UpdateError;
use regraft::strategy::Strategy;
use regraft::update::{UpdateTask, run_matrix};

#[test]
fn matrix_with_both_strategies_rewrites_each_file_in_place() {
    let dir = sandbox();

    // Merge-by-name entry: fork-only comment and layout survive, tracked
    // constructs come back refreshed from upstream.
    let local_analysis = r#"
"""Vendored text analysis helpers."""
import os

# fork note: stay lazy, scanners import this at startup.
MAX_SCAN = 10


def classify(path):
    return "binary"
"#;
    let upstream_analysis = r#"
"""Text analysis helpers."""
import os
import sys

MAX_SCAN = 50


def classify(path):
    if path.endswith(".txt"):
        return "text"
    return "binary"
"#;

    // Replace-after-imports entry: fork header and import block survive,
    // everything after them is taken wholesale from upstream.
    let local_gemfile = r#"
"""Fork header kept verbatim."""
from collections import namedtuple

import attr

GEM = namedtuple("GEM", "name version")


def parse(text):
    return []
"#;
    let upstream_gemfile = r#"
import posixpath
from collections import namedtuple

GEM = namedtuple("GEM", "name version platform")


def parse(text):
    return [GEM("rake", "13.0.6", None)]
"#;

    let analysis = write_file(dir.path(), "fork/analysis.py", local_analysis);
    let analysis_up = write_file(dir.path(), "upstream/analysis.py", upstream_analysis);
    let gemfile = write_file(dir.path(), "fork/gemfile_lock.py", local_gemfile);
    let gemfile_up = write_file(dir.path(), "upstream/gemfile_lock.py", upstream_gemfile);

    let matrix = vec![
        UpdateTask::new(&analysis, &analysis_up, Strategy::MergeByName),
        UpdateTask::new(&gemfile, &gemfile_up, Strategy::ReplaceAfterImports),
    ];
    run_matrix(&matrix).unwrap();

    let expected_analysis = r#"
"""Text analysis helpers."""
import os

# fork note: stay lazy, scanners import this at startup.
MAX_SCAN = 50


def classify(path):
    if path.endswith(".txt"):
        return "text"
    return "binary"
"#;
    assert_eq!(read_file(dir.path(), "fork/analysis.py"), expected_analysis);

    let expected_gemfile = r#"
"""Fork header kept verbatim."""
from collections import namedtuple

import attr

GEM = namedtuple("GEM", "name version platform")


def parse(text):
    return [GEM("rake", "13.0.6", None)]
"#;
    assert_eq!(read_file(dir.path(), "fork/gemfile_lock.py"), expected_gemfile);
}

#[test]
fn matrix_halts_on_missing_imports_keeping_earlier_writes() {
    let dir = sandbox();

    let first = write_file(dir.path(), "fork/first.py", "X = 1\n");
    let first_up = write_file(dir.path(), "upstream/first.py", "X = 2\n");
    // Import-less local file makes the second entry unsyncable.
    let second = write_file(dir.path(), "fork/second.py", "VERSION = 1\n");
    let second_up = write_file(dir.path(), "upstream/second.py", "import os\nVERSION = 2\n");
    let third = write_file(dir.path(), "fork/third.py", "Y = 1\n");
    let third_up = write_file(dir.path(), "upstream/third.py", "Y = 2\n");

    let matrix = vec![
        UpdateTask::new(&first, &first_up, Strategy::MergeByName),
        UpdateTask::new(&second, &second_up, Strategy::ReplaceAfterImports),
        UpdateTask::new(&third, &third_up, Strategy::MergeByName),
    ];

    let err = run_matrix(&matrix).unwrap_err();
    assert!(
        matches!(&err, UpdateError::MissingImports { path } if *path == second),
        "expected a missing-imports error for the second entry, got: {err}"
    );

    // The first entry landed before the halt; the rest are untouched.
    assert_eq!(read_file(dir.path(), "fork/first.py"), "X = 2\n");
    assert_eq!(read_file(dir.path(), "fork/second.py"), "VERSION = 1\n");
    assert_eq!(read_file(dir.path(), "fork/third.py"), "Y = 1\n");
}

#[test]
fn rewritten_files_end_with_exactly_one_newline() {
    let dir = sandbox();

    // No trailing newline on either side of the merge entry, a pile of
    // blank lines around the splice point of the import entry.
    let merged = write_file(dir.path(), "fork/merged.py", "X = 1");
    let merged_up = write_file(dir.path(), "upstream/merged.py", "X = 2");
    let spliced = write_file(dir.path(), "fork/spliced.py", "import os\nX = 1\n\n\n\n");
    let spliced_up = write_file(dir.path(), "upstream/spliced.py", "import sys\n\n\nY = 2\n\n\n");

    let matrix = vec![
        UpdateTask::new(&merged, &merged_up, Strategy::MergeByName),
        UpdateTask::new(&spliced, &spliced_up, Strategy::ReplaceAfterImports),
    ];
    run_matrix(&matrix).unwrap();

    assert_eq!(read_file(dir.path(), "fork/merged.py"), "X = 2\n");
    assert_eq!(
        read_file(dir.path(), "fork/spliced.py"),
        "import os\n\n\nY = 2\n"
    );
}

#[test]
fn missing_definition_error_names_both_files() {
    let dir = sandbox();

    let local = write_file(
        dir.path(),
        "fork/patched.py",
        "def fork_only():\n    pass\n",
    );
    let upstream = write_file(dir.path(), "upstream/patched.py", "X = 1\n");

    let matrix = vec![UpdateTask::new(&local, &upstream, Strategy::MergeByName)];
    let err = run_matrix(&matrix).unwrap_err();

    let message = err.to_string();
    assert!(
        message.contains("fork_only"),
        "error should name the unmatched construct, got: {message}"
    );
    assert!(
        message.contains(&local.display().to_string()),
        "error should name the local file, got: {message}"
    );
    assert!(
        message.contains(&upstream.display().to_string()),
        "error should name the upstream file, got: {message}"
    );
}
