//! Python source parsing and top-level construct indexing.
//!
//! The sync engine treats a source file as an ordered sequence of top-level
//! constructs, each with an identity and an exact byte span:
//!
//! - `def` and `class` statements, keyed by their declared name
//! - single-target assignments (`NAME = ...`), keyed by the target name
//! - bare string-literal statements, keyed by their position among the
//!   file's docstrings ("docstring #1", "docstring #2", …)
//!
//! Everything else at the top level — imports, conditionals, plain calls —
//! is not indexed and is invisible to the strategies, which means a merge
//! passes it through untouched. Nested definitions never appear in the
//! index; only direct children of the module node are scanned.
//!
//! Spans are byte ranges into the original text, so substitution can splice
//! by offset instead of searching for literal text. A span reproduces its
//! construct exactly, including interior comments and formatting.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::UpdateError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identity of a top-level construct, used to match constructs across the
/// local and upstream versions of a file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    /// Declared name of a function, class, or single-target assignment.
    Named(String),
    /// Position of a bare string-literal statement among its file's
    /// docstrings, 1-based. Purely positional: content never participates,
    /// so reordering docstrings between versions repairs nothing.
    Docstring(usize),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "`{name}`"),
            Self::Docstring(position) => write!(f, "docstring #{position}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Constructs and the per-file index
// ---------------------------------------------------------------------------

/// A top-level construct with its exact byte span in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Construct {
    pub identity: Identity,
    /// Byte range in the source: [`start_byte`, `end_byte`).
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Construct {
    /// The exact source slice that produced this construct.
    #[must_use]
    pub fn span<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start_byte..self.end_byte]
    }
}

/// Ordered index of a file's top-level constructs, keyed by identity.
///
/// Iteration follows top-to-bottom declaration order. Re-declaring an
/// identity overwrites the stored construct in place, matching source
/// redefinition semantics: the last definition wins, the first occurrence
/// keeps its slot in the order.
#[derive(Clone, Debug, Default)]
pub struct DefinitionIndex {
    entries: Vec<Construct>,
}

impl DefinitionIndex {
    fn insert(&mut self, construct: Construct) {
        match self
            .entries
            .iter_mut()
            .find(|c| c.identity == construct.identity)
        {
            Some(existing) => *existing = construct,
            None => self.entries.push(construct),
        }
    }

    /// Look up a construct by identity.
    #[must_use]
    pub fn get(&self, identity: &Identity) -> Option<&Construct> {
        self.entries.iter().find(|c| &c.identity == identity)
    }

    /// Constructs in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Construct> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefinitionIndex {
    type Item = &'a Construct;
    type IntoIter = std::slice::Iter<'a, Construct>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// SourceFile
// ---------------------------------------------------------------------------

/// A source file parsed for synchronization: path label, full text, and the
/// syntax tree. Immutable once built; every sync run parses fresh.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
}

impl SourceFile {
    /// Read a file and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::Io`] when the file cannot be read and
    /// [`UpdateError::Parse`] when it is not valid Python.
    pub fn load(path: &Path) -> Result<Self, UpdateError> {
        let text = fs::read_to_string(path).map_err(|e| UpdateError::io(path, e))?;
        Self::parse(path, text)
    }

    /// Parse already-read source text. `path` is a diagnostic label only.
    ///
    /// Any syntax error is fatal: the engine never rewrites a file from a
    /// partially recovered tree.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::Parse`] naming the file and, when known, the
    /// first offending line.
    pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<Self, UpdateError> {
        let path = path.into();

        let mut parser = Parser::new();
        parser
            .set_language(&python_language())
            .map_err(|e| UpdateError::Parse {
                path: path.clone(),
                detail: format!("parser setup failed: {e}"),
            })?;

        let tree = parser.parse(&text, None).ok_or_else(|| UpdateError::Parse {
            path: path.clone(),
            detail: "tree-sitter produced no tree".to_owned(),
        })?;

        if tree.root_node().has_error() {
            let detail = first_error_line(tree.root_node()).map_or_else(
                || "syntax error".to_owned(),
                |line| format!("syntax error at line {line}"),
            );
            return Err(UpdateError::Parse { path, detail });
        }

        Ok(Self { path, text, tree })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index the file's top-level constructs by identity.
    #[must_use]
    pub fn definitions(&self) -> DefinitionIndex {
        let root = self.tree.root_node();
        let mut index = DefinitionIndex::default();
        let mut docstrings = 0_usize;

        for i in 0..root.child_count() {
            let Some(child) = root.child(i) else { continue };
            if let Some(construct) = classify(child, &self.text, &mut docstrings) {
                index.insert(construct);
            }
        }
        index
    }

    /// 0-based line on which the last top-level import statement ends, or
    /// `None` when the file has no top-level import. Imports nested inside
    /// conditionals or try blocks do not count.
    #[must_use]
    pub fn last_import_line(&self) -> Option<usize> {
        let root = self.tree.root_node();
        let mut last = None;
        for i in 0..root.child_count() {
            let Some(child) = root.child(i) else { continue };
            if matches!(
                child.kind(),
                "import_statement" | "import_from_statement" | "future_import_statement"
            ) {
                last = Some(child.end_position().row);
            }
        }
        last
    }
}

fn python_language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

// ---------------------------------------------------------------------------
// Construct classification
// ---------------------------------------------------------------------------

/// Map one top-level statement node to an indexed construct, if it is one of
/// the tracked kinds. Advances the docstring counter as a side effect.
fn classify(node: Node<'_>, source: &str, docstrings: &mut usize) -> Option<Construct> {
    match node.kind() {
        "function_definition" | "class_definition" => named_definition(node, source),
        // Decorators stay outside the span: a merge must never clobber
        // local-only decorators above a tracked definition, and must never
        // drag upstream decorators in.
        "decorated_definition" => {
            let inner = node.child_by_field_name("definition")?;
            named_definition(inner, source)
        }
        "expression_statement" => {
            let inner = node.named_child(0)?;
            match inner.kind() {
                "assignment" => {
                    // Annotated (`X: int = 1`), multi-target, and unpacking
                    // assignments are not tracked; they pass through merges
                    // as plain text.
                    if inner.child_by_field_name("type").is_some() {
                        return None;
                    }
                    let left = inner.child_by_field_name("left")?;
                    if left.kind() != "identifier" {
                        return None;
                    }
                    Some(Construct {
                        identity: Identity::Named(node_text(left, source).to_owned()),
                        start_byte: inner.start_byte(),
                        end_byte: inner.end_byte(),
                    })
                }
                "string" | "concatenated_string" => {
                    if !is_docstring_literal(inner, source) {
                        return None;
                    }
                    *docstrings += 1;
                    Some(Construct {
                        identity: Identity::Docstring(*docstrings),
                        start_byte: inner.start_byte(),
                        end_byte: inner.end_byte(),
                    })
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn named_definition(def: Node<'_>, source: &str) -> Option<Construct> {
    let name = def.child_by_field_name("name")?;
    Some(Construct {
        identity: Identity::Named(node_text(name, source).to_owned()),
        start_byte: def.start_byte(),
        end_byte: def.end_byte(),
    })
}

/// True when a bare string statement is a plain constant, the only kind the
/// index counts as a docstring. Formatted (`f"..."`) and bytes (`b"..."`)
/// literals do not count.
fn is_docstring_literal(node: Node<'_>, source: &str) -> bool {
    match node.kind() {
        "string" => !node_text(node, source)
            .chars()
            .take_while(|c| *c != '"' && *c != '\'')
            .any(|c| matches!(c, 'b' | 'B' | 'f' | 'F')),
        "concatenated_string" => (0..node.named_child_count())
            .filter_map(|i| node.named_child(i))
            .filter(|c| c.kind() == "string")
            .all(|c| is_docstring_literal(c, source)),
        _ => false,
    }
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// 1-based line of the first ERROR or missing node, in document order.
fn first_error_line(root: Node<'_>) -> Option<usize> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        // has_error() is set on every ancestor of an error, so clean
        // subtrees can be skipped wholesale.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
