//! Depth-bounded, file-filtered projection of syntax trees for display

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::normalize_path;
use crate::syntax::SyntaxNode;

/// Display-only projection of a syntax subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationNode {
    pub kind_name: String,
    pub spelling: String,
    pub line: usize,
    pub children: Vec<PresentationNode>,
}

/// Projects a syntax tree into a presentation tree
///
/// The root itself is always emitted. Children are kept only when they come
/// from `source_file` (paths compared after lexical normalization) and while
/// the depth budget lasts. `max_depth` counts levels below the root, so 0
/// yields a single leaf.
pub fn build_view(root: &SyntaxNode, source_file: &Path, max_depth: usize) -> PresentationNode {
    let target = normalize_path(source_file);
    PresentationNode {
        kind_name: root.kind_name.clone(),
        spelling: root.spelling.clone(),
        line: root.line,
        children: collect_children(root, &target, max_depth),
    }
}

fn collect_children(node: &SyntaxNode, target: &Path, depth: usize) -> Vec<PresentationNode> {
    if depth == 0 {
        return Vec::new();
    }

    node.children
        .iter()
        .filter(|child| normalize_path(&child.source_file) == target)
        .map(|child| PresentationNode {
            kind_name: child.kind_name.clone(),
            spelling: child.spelling.clone(),
            line: child.line,
            children: collect_children(child, target, depth - 1),
        })
        .collect()
}
