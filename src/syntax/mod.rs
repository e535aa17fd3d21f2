//! Language-neutral syntax trees for C/C++ sources
//!
//! The tree_sitter grammar is wrapped behind a small node model so the
//! context and view layers never touch tree_sitter types directly.

pub mod adapter;

pub use adapter::{ParseError, TreeSitterAdapter};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::Span;

/// Coarse classification of a syntax node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Function,
    Method,
    Variable,
    Other,
}

/// One node of the converted syntax tree
///
/// `span` covers the node's full extent in lines, `line` is where the node's
/// name is introduced (for a multi-declarator statement each variable keeps
/// its own identifier line). `spelling` is empty when the grammar gives the
/// node no usable name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub kind_name: String,
    pub spelling: String,
    pub span: Span,
    pub line: usize,
    pub source_file: PathBuf,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(
        kind: NodeKind,
        kind_name: impl Into<String>,
        source_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            kind,
            kind_name: kind_name.into(),
            spelling: String::new(),
            span: Span::unknown(),
            line: 0,
            source_file: source_file.into(),
            children: Vec::new(),
        }
    }

    pub fn with_spelling(mut self, spelling: impl Into<String>) -> Self {
        self.spelling = spelling.into();
        self
    }

    pub fn with_span(mut self, start_line: usize, end_line: usize) -> Self {
        self.span = Span::new(start_line, end_line);
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let node = SyntaxNode::new(NodeKind::Other, "translation_unit", "main.cpp");
        assert_eq!(node.kind, NodeKind::Other);
        assert!(node.spelling.is_empty());
        assert!(node.span.is_unknown());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let node = SyntaxNode::new(NodeKind::Function, "function_definition", "main.cpp")
            .with_spelling("main")
            .with_span(1, 4)
            .with_line(1)
            .with_child(SyntaxNode::new(NodeKind::Variable, "declaration", "main.cpp"));
        assert_eq!(node.spelling, "main");
        assert_eq!(node.span, Span::new(1, 4));
        assert_eq!(node.line, 1);
        assert_eq!(node.children.len(), 1);
    }
}
