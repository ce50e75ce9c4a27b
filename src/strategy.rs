//! The two synchronization strategies.
//!
//! Both take the parsed local and upstream versions of one file and return
//! the new local text. Neither touches the filesystem; persistence belongs
//! to the orchestrator in [`crate::update`].
//!
//! **merge-by-name** is the surgical one: every construct the fork tracks is
//! replaced in place by its upstream counterpart, and everything else the
//! fork added — helpers, comments, deleted upstream baggage — survives
//! untouched. It refuses to run when a tracked construct has vanished
//! upstream, because silently keeping the stale local copy is how forks rot.
//!
//! **replace-after-imports** is the blunt one, for files where the fork only
//! customizes the import block: local text through its last import line,
//! upstream text after its last import line, nothing else survives.

use std::fmt;

use crate::error::UpdateError;
use crate::extract::{Construct, SourceFile};

/// Which rewrite a matrix entry applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Replace tracked constructs in place by identity; keep everything else.
    MergeByName,
    /// Keep local through its last import; take upstream after its last one.
    ReplaceAfterImports,
}

impl Strategy {
    /// Apply this strategy to a local/upstream pair.
    ///
    /// # Errors
    ///
    /// Propagates [`UpdateError::MissingDefinition`] or
    /// [`UpdateError::MissingImports`] from the underlying strategy.
    pub fn apply(
        self,
        local: &SourceFile,
        upstream: &SourceFile,
    ) -> Result<String, UpdateError> {
        match self {
            Self::MergeByName => merge_by_name(local, upstream),
            Self::ReplaceAfterImports => replace_after_imports(local, upstream),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MergeByName => write!(f, "merge-by-name"),
            Self::ReplaceAfterImports => write!(f, "replace-after-imports"),
        }
    }
}

// ---------------------------------------------------------------------------
// merge-by-name
// ---------------------------------------------------------------------------

/// Replace each tracked local construct's span with the upstream span of the
/// same identity, preserving all surrounding local text.
///
/// Local identities are checked in declaration order first, so a missing
/// upstream counterpart aborts deterministically before any text is
/// assembled. Splicing then walks the local constructs in byte order: copy
/// the gap before each construct verbatim, emit the upstream span, continue
/// after the construct. Substituting by byte range keeps two byte-identical
/// local spans (duplicate docstrings, say) from capturing each other's
/// replacement.
///
/// # Errors
///
/// Returns [`UpdateError::MissingDefinition`] for the first local identity,
/// in declaration order, that has no upstream counterpart.
pub fn merge_by_name(local: &SourceFile, upstream: &SourceFile) -> Result<String, UpdateError> {
    let local_defs = local.definitions();
    let upstream_defs = upstream.definitions();

    let mut splices: Vec<(&Construct, &Construct)> = Vec::with_capacity(local_defs.len());
    for ours in &local_defs {
        let Some(theirs) = upstream_defs.get(&ours.identity) else {
            return Err(UpdateError::MissingDefinition {
                identity: ours.identity.clone(),
                local: local.path().to_owned(),
                upstream: upstream.path().to_owned(),
            });
        };
        splices.push((ours, theirs));
    }

    // A redefined identity sits at its first-seen slot in the index but
    // points at its last span, so index order is not byte order.
    splices.sort_unstable_by_key(|(ours, _)| ours.start_byte);

    let text = local.text();
    let mut merged = String::with_capacity(text.len());
    let mut cursor = 0_usize;
    for (ours, theirs) in splices {
        merged.push_str(&text[cursor..ours.start_byte]);
        merged.push_str(theirs.span(upstream.text()));
        cursor = ours.end_byte;
    }
    merged.push_str(&text[cursor..]);
    Ok(merged)
}

// ---------------------------------------------------------------------------
// replace-after-imports
// ---------------------------------------------------------------------------

/// Discard everything after local's last top-level import and splice in
/// everything after upstream's last top-level import.
///
/// Composition is line-based: local lines through the line on which its last
/// import ends, then upstream lines strictly after the line on which its
/// last import ends, joined with `\n`. All of local's post-import content is
/// dropped unconditionally.
///
/// # Errors
///
/// Returns [`UpdateError::MissingImports`] when either file has no top-level
/// import statement.
pub fn replace_after_imports(
    local: &SourceFile,
    upstream: &SourceFile,
) -> Result<String, UpdateError> {
    let ours_end = local
        .last_import_line()
        .ok_or_else(|| UpdateError::missing_imports(local.path()))?;
    let theirs_end = upstream
        .last_import_line()
        .ok_or_else(|| UpdateError::missing_imports(upstream.path()))?;

    let mut lines: Vec<&str> = local.text().lines().take(ours_end + 1).collect();
    lines.extend(upstream.text().lines().skip(theirs_end + 1));
    Ok(lines.join("\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
