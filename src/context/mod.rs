/*!
# Diagnostic context resolution

Answers, for one diagnostic position, three questions: which function or
method encloses it, which variables are visible at it, and what the nearby
source looks like.
*/

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::read_source_file;
use crate::syntax::{NodeKind, ParseError, SyntaxNode, TreeSitterAdapter};

/// Scope label used when no function or method encloses the position
pub const GLOBAL_SCOPE: &str = "Global Scope";

/// Errors from resolving a diagnostic position against its source file
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("invalid line number: {0}")]
    InvalidLine(usize),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Context gathered around one diagnostic position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeContext {
    pub enclosing_scope: String,
    pub visible_variables: Vec<String>,
    pub snippet: SourceSnippet,
}

/// Slice of source lines around the diagnostic line
///
/// `first_line` is the 1-based number of the first snippet line, or 0 when
/// the snippet is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSnippet {
    pub first_line: usize,
    pub text: String,
}

/// Resolves diagnostic positions by parsing their source files on demand
pub struct ContextResolver {
    adapter: TreeSitterAdapter,
}

impl ContextResolver {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            adapter: TreeSitterAdapter::new()?,
        })
    }

    /// Resolves the context around `line` in `file`
    ///
    /// The file check runs before the line check, so a missing file is
    /// reported as such even when the line is also bad.
    pub fn resolve(&mut self, file: &Path, line: usize) -> Result<ScopeContext, ResolveError> {
        if !file.is_file() {
            return Err(ResolveError::FileNotFound(file.to_path_buf()));
        }
        if line == 0 {
            return Err(ResolveError::InvalidLine(line));
        }

        let source = read_source_file(file).map_err(|source| ParseError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let root = self.adapter.parse_source(&source, file)?;

        let (enclosing_scope, visible_variables) = resolve_scope(&root, line);
        let snippet = extract_snippet(&source, line);

        Ok(ScopeContext {
            enclosing_scope,
            visible_variables,
            snippet,
        })
    }
}

/// Walks the tree and returns the innermost enclosing scope plus the visible
/// variables in declaration order
///
/// The walk descends only into nodes whose span covers `line`, but checks
/// every direct child of a covering node. That keeps siblings cheap to skip
/// while still picking up file-level variables declared above the position.
pub fn resolve_scope(root: &SyntaxNode, line: usize) -> (String, Vec<String>) {
    let mut scope = GLOBAL_SCOPE.to_string();
    let mut variables = Vec::new();
    visit(root, line, &mut scope, &mut variables);
    (scope, variables)
}

fn visit(node: &SyntaxNode, line: usize, scope: &mut String, variables: &mut Vec<String>) {
    if node.span.is_unknown() {
        return;
    }

    let covers = node.span.contains(line);
    match node.kind {
        NodeKind::Function | NodeKind::Method if covers => {
            // Pre-order traversal, so the innermost covering scope is the
            // last one to overwrite the label.
            *scope = node.spelling.clone();
        }
        NodeKind::Variable => {
            if node.line <= line
                && !node.spelling.is_empty()
                && !variables.contains(&node.spelling)
            {
                variables.push(node.spelling.clone());
            }
        }
        _ => {}
    }

    if covers {
        for child in &node.children {
            visit(child, line, scope, variables);
        }
    }
}

/// Extracts the diagnostic line together with its neighbours
///
/// The window is the line above through the line below, clamped to the file.
/// A target one line past the end still yields the final line; further out
/// the snippet is empty.
pub fn extract_snippet(source: &str, line: usize) -> SourceSnippet {
    if line == 0 {
        return SourceSnippet::default();
    }

    let lines: Vec<&str> = source.lines().collect();
    let idx = line - 1;
    let start = idx.saturating_sub(1);
    // Diagnostic lines come from untrusted text, so the window arithmetic
    // must hold up to usize::MAX.
    let end = idx.saturating_add(2).min(lines.len());
    if start >= end {
        return SourceSnippet::default();
    }

    SourceSnippet {
        first_line: start + 1,
        text: lines[start..end].join("\n"),
    }
}
