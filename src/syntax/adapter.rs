//! Adapter converting tree_sitter C/C++ parses into [`SyntaxNode`] trees

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use tree_sitter::{Node, Parser};
use tree_sitter_language::LanguageFn;

use crate::core::read_source_file;
use crate::syntax::{NodeKind, SyntaxNode};

/// Grammar handle loaded into every parser instance
const GRAMMAR: LanguageFn = tree_sitter_cpp::LANGUAGE;

/// Errors from loading or parsing a source file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load C++ grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no syntax tree produced for {}", .0.display())]
    Engine(PathBuf),
}

/// Converter from tree_sitter trees to the crate's node model
pub struct TreeSitterAdapter {
    parser: Parser,
}

impl TreeSitterAdapter {
    /// Creates an adapter with the C++ grammar loaded
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&GRAMMAR.into())?;
        Ok(Self { parser })
    }

    /// Reads a file from disk and parses it
    pub fn parse_file(&mut self, path: &Path) -> Result<SyntaxNode, ParseError> {
        let source = read_source_file(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(&source, path)
    }

    /// Parses in-memory source attributed to `file`
    ///
    /// Broken source is not an error: tree_sitter recovers around ERROR
    /// nodes and the converted tree keeps every node it could salvage.
    pub fn parse_source(&mut self, source: &str, file: &Path) -> Result<SyntaxNode, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Engine(file.to_path_buf()))?;

        let root = tree.root_node();
        if root.has_error() {
            debug!("syntax errors in {}, converting the recovered tree", file.display());
        }

        Ok(self.convert_root(root, source, file))
    }

    /// The root carries the file path as its spelling
    fn convert_root(&self, root: Node, source: &str, file: &Path) -> SyntaxNode {
        let mut converted = self
            .base_node(NodeKind::Other, root, file)
            .with_spelling(file.display().to_string());
        self.convert_children(root, source, file, false, &mut converted.children);
        converted
    }

    fn convert_children(
        &self,
        node: Node,
        source: &str,
        file: &Path,
        in_class: bool,
        out: &mut Vec<SyntaxNode>,
    ) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.convert_node(child, source, file, in_class, out);
        }
    }

    fn convert_node(
        &self,
        node: Node,
        source: &str,
        file: &Path,
        in_class: bool,
        out: &mut Vec<SyntaxNode>,
    ) {
        match node.kind() {
            "function_definition" => {
                out.push(self.convert_function(node, source, file, in_class));
            }
            "declaration" => {
                self.convert_declaration(node, source, file, in_class, out);
            }
            "field_declaration" => {
                out.push(self.convert_field(node, source, file, in_class));
            }
            "class_specifier" | "struct_specifier" | "union_specifier" => {
                out.push(self.convert_other(node, source, file, true));
            }
            _ => {
                out.push(self.convert_other(node, source, file, in_class));
            }
        }
    }

    /// Function bodies: a definition inside a class body or with a qualified
    /// name is a method, anything else a free function
    fn convert_function(
        &self,
        node: Node,
        source: &str,
        file: &Path,
        in_class: bool,
    ) -> SyntaxNode {
        let name = node
            .child_by_field_name("declarator")
            .and_then(declarator_name_node)
            .map(|n| n.utf8_text(source.as_bytes()).unwrap_or_default().to_string())
            .unwrap_or_default();

        let kind = if in_class || name.contains("::") {
            NodeKind::Method
        } else {
            NodeKind::Function
        };

        let mut converted = self.base_node(kind, node, file).with_spelling(name);
        self.convert_children(node, source, file, in_class, &mut converted.children);
        converted
    }

    /// Splits a declaration into one node per declarator
    ///
    /// `int a = 1, b = 2;` yields two variable nodes, each keeping the line
    /// of its own identifier. A declarator whose innermost wrapper is a
    /// function_declarator is a prototype and counts as a function; function
    /// pointers and plain objects count as variables.
    fn convert_declaration(
        &self,
        node: Node,
        source: &str,
        file: &Path,
        in_class: bool,
        out: &mut Vec<SyntaxNode>,
    ) {
        let mut cursor = node.walk();
        let mut emitted = false;

        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            emitted = true;

            let name_node = declarator_name_node(declarator);
            let name = name_node
                .map(|n| n.utf8_text(source.as_bytes()).unwrap_or_default().to_string())
                .unwrap_or_default();

            let kind = if name.is_empty() {
                NodeKind::Other
            } else if is_function_prototype(declarator) {
                NodeKind::Function
            } else {
                NodeKind::Variable
            };

            let line = name_node.unwrap_or(node).start_position().row + 1;
            let mut converted = self
                .base_node(kind, node, file)
                .with_spelling(name)
                .with_line(line);
            self.convert_children(declarator, source, file, in_class, &mut converted.children);
            out.push(converted);
        }

        if !emitted {
            out.push(self.convert_other(node, source, file, in_class));
        }
    }

    /// Member declarations: method prototypes become methods, data members
    /// stay unclassified
    fn convert_field(&self, node: Node, source: &str, file: &Path, in_class: bool) -> SyntaxNode {
        let declarator = match node.child_by_field_name("declarator") {
            Some(declarator) if is_function_prototype(declarator) => declarator,
            _ => return self.convert_other(node, source, file, in_class),
        };
        let name_node = match declarator_name_node(declarator) {
            Some(name_node) => name_node,
            None => return self.convert_other(node, source, file, in_class),
        };
        let name = name_node.utf8_text(source.as_bytes()).unwrap_or_default();
        if name.is_empty() {
            return self.convert_other(node, source, file, in_class);
        }

        let mut converted = self
            .base_node(NodeKind::Method, node, file)
            .with_spelling(name)
            .with_line(name_node.start_position().row + 1);
        self.convert_children(declarator, source, file, in_class, &mut converted.children);
        converted
    }

    /// Fallback conversion keeping the tree shape without classification
    fn convert_other(&self, node: Node, source: &str, file: &Path, in_class: bool) -> SyntaxNode {
        let mut converted = self.base_node(NodeKind::Other, node, file);

        if let Some(name) = node.child_by_field_name("name") {
            converted.spelling = name.utf8_text(source.as_bytes()).unwrap_or_default().to_string();
        } else if node.named_child_count() == 0 {
            // Short single-line leaves keep their text as the spelling so
            // identifiers and literals stay readable in the tree view.
            let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
            if !text.contains('\n') && text.len() <= 40 {
                converted.spelling = text.to_string();
            }
        }

        self.convert_children(node, source, file, in_class, &mut converted.children);
        converted
    }

    fn base_node(&self, kind: NodeKind, node: Node, file: &Path) -> SyntaxNode {
        SyntaxNode::new(kind, node.kind(), file)
            .with_span(node.start_position().row + 1, node.end_position().row + 1)
            .with_line(node.start_position().row + 1)
    }
}

/// Follows declarator wrappers down to the name node being introduced
fn declarator_name_node(declarator: Node) -> Option<Node> {
    let mut current = declarator;
    loop {
        if is_name_node(&current) {
            return Some(current);
        }
        current = declarator_child(current)?;
    }
}

/// A declarator introduces a function when the innermost wrapper around the
/// name is a function_declarator; `int (*fp)(int);` wraps the name in a
/// pointer_declarator instead, so it stays an object
fn is_function_prototype(declarator: Node) -> bool {
    let mut current = declarator;
    loop {
        let inner = match declarator_child(current) {
            Some(inner) => inner,
            None => return false,
        };
        if is_name_node(&inner) {
            return current.kind() == "function_declarator";
        }
        current = inner;
    }
}

/// Steps one level into a declarator wrapper
fn declarator_child(node: Node) -> Option<Node> {
    if let Some(inner) = node.child_by_field_name("declarator") {
        return Some(inner);
    }
    match node.kind() {
        "reference_declarator" | "parenthesized_declarator" => node.named_child(0),
        _ => None,
    }
}

fn is_name_node(node: &Node) -> bool {
    matches!(
        node.kind(),
        "identifier"
            | "field_identifier"
            | "qualified_identifier"
            | "operator_name"
            | "destructor_name"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Span;

    fn parse(source: &str) -> SyntaxNode {
        let mut adapter = TreeSitterAdapter::new().unwrap();
        adapter.parse_source(source, Path::new("test.cpp")).unwrap()
    }

    fn find<'a>(node: &'a SyntaxNode, kind: NodeKind, spelling: &str) -> Option<&'a SyntaxNode> {
        if node.kind == kind && node.spelling == spelling {
            return Some(node);
        }
        node.children.iter().find_map(|child| find(child, kind, spelling))
    }

    #[test]
    fn test_classifies_free_function() {
        let root = parse("int add(int a, int b) {\n    return a + b;\n}\n");
        let add = find(&root, NodeKind::Function, "add").unwrap();
        assert_eq!(add.kind_name, "function_definition");
        assert_eq!(add.span, Span::new(1, 3));
        assert_eq!(add.line, 1);
    }

    #[test]
    fn test_classifies_method_inside_class() {
        let source = "class Greeter {\npublic:\n    void hello() {}\n};\n";
        let root = parse(source);
        let class = find(&root, NodeKind::Other, "Greeter").unwrap();
        assert_eq!(class.kind_name, "class_specifier");
        let hello = find(&root, NodeKind::Method, "hello").unwrap();
        assert_eq!(hello.line, 3);
    }

    #[test]
    fn test_classifies_out_of_line_method() {
        let source = "struct Greeter { void hello(); };\nvoid Greeter::hello() {}\n";
        let root = parse(source);
        let hello = find(&root, NodeKind::Method, "Greeter::hello").unwrap();
        assert_eq!(hello.line, 2);
    }

    #[test]
    fn test_method_prototypes_inside_classes() {
        let root = parse("struct S { void ping(); int data; };\n");
        assert!(find(&root, NodeKind::Method, "ping").is_some());
        assert!(find(&root, NodeKind::Variable, "data").is_none());
    }

    #[test]
    fn test_splits_multi_declarator_statements() {
        let root = parse("int main() {\n    int a = 1, b = 2;\n    return a + b;\n}\n");
        let a = find(&root, NodeKind::Variable, "a").unwrap();
        let b = find(&root, NodeKind::Variable, "b").unwrap();
        assert_eq!(a.line, 2);
        assert_eq!(b.line, 2);
        assert_eq!(a.span, Span::new(2, 2));
    }

    #[test]
    fn test_prototypes_are_functions_not_variables() {
        let root = parse("int add(int x, int y);\n");
        assert!(find(&root, NodeKind::Function, "add").is_some());
        assert!(find(&root, NodeKind::Variable, "add").is_none());
    }

    #[test]
    fn test_function_pointers_are_variables() {
        let root = parse("int (*handler)(int);\n");
        assert!(find(&root, NodeKind::Variable, "handler").is_some());
        assert!(find(&root, NodeKind::Function, "handler").is_none());
    }

    #[test]
    fn test_parameters_are_not_variables() {
        let root = parse("int add(int a, int b) {\n    return a + b;\n}\n");
        assert!(find(&root, NodeKind::Variable, "a").is_none());
        assert!(find(&root, NodeKind::Variable, "b").is_none());
    }

    #[test]
    fn test_globals_keep_their_declaration_line() {
        let root = parse("\nint counter = 0;\n");
        let counter = find(&root, NodeKind::Variable, "counter").unwrap();
        assert_eq!(counter.line, 2);
        assert_eq!(counter.source_file, Path::new("test.cpp"));
    }

    #[test]
    fn test_malformed_source_still_yields_a_tree() {
        let root = parse("int broken( {\n");
        assert_eq!(root.kind_name, "translation_unit");
        assert!(!root.children.is_empty());
    }

    #[test]
    fn test_empty_source_yields_bare_root() {
        let root = parse("");
        assert_eq!(root.kind_name, "translation_unit");
        assert_eq!(root.spelling, "test.cpp");
        assert_eq!(root.span, Span::new(1, 1));
        assert!(root.children.is_empty());
    }
}
