/*!
# Console rendering

Turns diagnostic records, resolved contexts and presentation trees into the
strings printed by the CLI. Every method returns a newline-terminated block;
callers compose and print them. With colors disabled the output is stable
plain text suitable for CI logs and tests.
*/

use colored::Colorize;

use crate::context::ScopeContext;
use crate::diagnostics::{DiagnosticRecord, DiagnosticSeverity};
use crate::view::PresentationNode;

/// Renders analysis output for the console
pub struct Reporter {
    use_colors: bool,
}

impl Reporter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// One diagnostic in `severity: message` form with a location line
    pub fn format_diagnostic(&self, record: &DiagnosticRecord) -> String {
        let label = if self.use_colors {
            match record.severity {
                DiagnosticSeverity::Error => record.severity.to_string().red().bold().to_string(),
                DiagnosticSeverity::Warning => {
                    record.severity.to_string().yellow().bold().to_string()
                }
            }
        } else {
            record.severity.to_string()
        };

        let mut output = String::new();
        output.push_str(&format!("{}: {}\n", label, record.message));
        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            record.file.display(),
            record.line,
            record.column
        ));
        output
    }

    /// Scope, visible variables and the numbered snippet around the target
    pub fn format_context(&self, context: &ScopeContext, target_line: usize) -> String {
        let mut output = String::new();

        let scope = if self.use_colors {
            context.enclosing_scope.bold().to_string()
        } else {
            context.enclosing_scope.clone()
        };
        output.push_str(&format!("  scope: {}\n", scope));

        let variables = if context.visible_variables.is_empty() {
            "none".to_string()
        } else {
            context.visible_variables.join(", ")
        };
        output.push_str(&format!("  visible variables: {}\n", variables));

        if !context.snippet.text.is_empty() {
            let lines: Vec<&str> = context.snippet.text.split('\n').collect();
            let last_number = context.snippet.first_line + lines.len() - 1;
            let width = last_number.to_string().len();

            for (offset, text) in lines.iter().enumerate() {
                let number = context.snippet.first_line + offset;
                let marker = if number == target_line { ">" } else { " " };
                let gutter = format!("{} {:>width$} |", marker, number);
                let gutter = if !self.use_colors {
                    gutter
                } else if number == target_line {
                    gutter.red().bold().to_string()
                } else {
                    gutter.dimmed().to_string()
                };
                output.push_str(&format!("  {} {}\n", gutter, text));
            }
        }

        output
    }

    /// Box-drawing rendering of a presentation tree
    ///
    /// The root shows its spelling alone (for a translation unit that is the
    /// file path); branches show `kind: name (line N)`.
    pub fn format_tree(&self, root: &PresentationNode) -> String {
        let label = if root.spelling.is_empty() {
            root.kind_name.as_str()
        } else {
            root.spelling.as_str()
        };

        let mut output = String::new();
        if self.use_colors {
            output.push_str(&format!("{}\n", label.cyan().bold()));
        } else {
            output.push_str(&format!("{}\n", label));
        }
        self.append_children(&root.children, "", &mut output);
        output
    }

    fn append_children(&self, children: &[PresentationNode], prefix: &str, output: &mut String) {
        for (index, child) in children.iter().enumerate() {
            let last = index + 1 == children.len();
            let connector = if last { "└── " } else { "├── " };
            output.push_str(&format!("{}{}{}\n", prefix, connector, self.branch_label(child)));

            let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
            self.append_children(&child.children, &child_prefix, output);
        }
    }

    fn branch_label(&self, node: &PresentationNode) -> String {
        let spelling = if node.spelling.is_empty() {
            "unnamed"
        } else {
            node.spelling.as_str()
        };

        if self.use_colors {
            format!("{}: {} (line {})", node.kind_name.cyan(), spelling.bold(), node.line)
        } else {
            format!("{}: {} (line {})", node.kind_name, spelling, node.line)
        }
    }
}
