//! Error types for the upstream-sync engine.
//!
//! Defines [`UpdateError`], the single error type every sync operation
//! returns. Each variant carries enough context to act on without re-running
//! anything: the file involved, the construct involved, and a hint about
//! what to change.
//!
//! All of these are fatal. The engine never retries, downgrades, or recovers
//! from a partial parse — a sync either produces a complete replacement for
//! a file or leaves it alone.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::extract::Identity;

// ---------------------------------------------------------------------------
// UpdateError
// ---------------------------------------------------------------------------

/// Unified error type for sync operations.
#[derive(Debug)]
pub enum UpdateError {
    /// A source file is not syntactically valid.
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// What went wrong, with a line number when one is known.
        detail: String,
    },

    /// A construct tracked by the local fork has no upstream counterpart.
    MissingDefinition {
        /// Identity of the construct that could not be matched.
        identity: Identity,
        /// The local file that declares it.
        local: PathBuf,
        /// The upstream file that lacks it.
        upstream: PathBuf,
    },

    /// A file has no top-level import to splice at.
    MissingImports {
        /// The file without any top-level import statement.
        path: PathBuf,
    },

    /// A file could not be read or written.
    Io {
        /// The path the operation touched.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl UpdateError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_imports(path: &Path) -> Self {
        Self::MissingImports {
            path: path.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Display — actionable error messages
// ---------------------------------------------------------------------------

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { path, detail } => {
                write!(
                    f,
                    "cannot parse '{}': {detail}\n  To fix: the file must be valid Python before it can be synced.",
                    path.display()
                )
            }
            Self::MissingDefinition {
                identity,
                local,
                upstream,
            } => {
                write!(
                    f,
                    "{identity} from '{}' has no counterpart in '{}'.\n  To fix: merge-by-name requires every tracked construct to exist upstream; sync this one by hand or drop it from the fork.",
                    local.display(),
                    upstream.display()
                )
            }
            Self::MissingImports { path } => {
                write!(
                    f,
                    "no top-level import statement in '{}'.\n  To fix: replace-after-imports splices at the last import line; the file needs at least one import.",
                    path.display()
                )
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error on '{}': {source}\n  To fix: run from the fork checkout root and check file permissions.",
                    path.display()
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// std::error::Error
// ---------------------------------------------------------------------------

impl std::error::Error for UpdateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
