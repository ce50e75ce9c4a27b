//! Batch orchestration: drive an update matrix and persist the results.
//!
//! A matrix is just an ordered slice of [`UpdateTask`]s; the canonical one
//! lives in the binary and synthetic ones come from tests. Tasks run
//! strictly in order, each one independently: parse both files, apply the
//! entry's strategy, write the local file back with exactly one trailing
//! newline. The first failure stops the batch where it stands — earlier
//! writes are deliberately left in place, later entries never start.

use std::fs;
use std::path::PathBuf;

use tracing::instrument;

use crate::error::UpdateError;
use crate::extract::SourceFile;
use crate::strategy::Strategy;

/// One entry of an update matrix: which local file to rewrite from which
/// upstream file, and how. Paths are resolved against the working directory.
#[derive(Clone, Debug)]
pub struct UpdateTask {
    pub local: PathBuf,
    pub upstream: PathBuf,
    pub strategy: Strategy,
}

impl UpdateTask {
    pub fn new(
        local: impl Into<PathBuf>,
        upstream: impl Into<PathBuf>,
        strategy: Strategy,
    ) -> Self {
        Self {
            local: local.into(),
            upstream: upstream.into(),
            strategy,
        }
    }
}

/// Run one task: parse both files, apply the strategy, rewrite the local
/// file in place.
///
/// The local file is only touched once the complete replacement text exists,
/// so a task either lands whole or leaves its file alone.
///
/// # Errors
///
/// Returns the first [`UpdateError`] hit while reading, parsing, merging, or
/// writing. On error the local file is unchanged.
#[instrument(skip_all, fields(local = %task.local.display(), strategy = %task.strategy))]
pub fn run_task(task: &UpdateTask) -> Result<(), UpdateError> {
    let local = SourceFile::load(&task.local)?;
    let upstream = SourceFile::load(&task.upstream)?;

    let mut updated = task.strategy.apply(&local, &upstream)?;
    normalize_trailing_newline(&mut updated);

    fs::write(&task.local, &updated).map_err(|e| UpdateError::io(&task.local, e))?;
    tracing::debug!(
        upstream = %task.upstream.display(),
        bytes = updated.len(),
        "local file rewritten"
    );
    Ok(())
}

/// Run every task in matrix order, printing each local path to stdout as it
/// completes.
///
/// # Errors
///
/// The first failing task's error. Files written by earlier tasks stay
/// written; later tasks are never started, and the failing task's path is
/// never printed.
pub fn run_matrix(tasks: &[UpdateTask]) -> Result<(), UpdateError> {
    for task in tasks {
        run_task(task)?;
        println!("{}", task.local.display());
    }
    Ok(())
}

/// Rewrite `text` in place to end in exactly one `\n`, whether it arrived
/// with none or with several.
pub fn normalize_trailing_newline(text: &mut String) {
    while text.ends_with('\n') {
        text.pop();
    }
    text.push('\n');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
