/*!
# cc-context

Compiler diagnostics with syntax-tree context for C/C++. The tool runs a
syntax-only compile on a single file, parses the diagnostics the compiler
prints, and augments each one with the enclosing function or method, the
variables visible at the offending line, a short source snippet, and an
optional depth-bounded view of the syntax tree.

## Core Features

- **Diagnostic parsing** of `file:line:column: severity: message` output
- **Scope resolution** via a tree_sitter C++ parse of the offending file
- **Visible variables** in declaration order, deduplicated by name
- **Source snippets** covering the diagnostic line and its neighbours
- **Subtree views** bounded by depth and filtered to the target file
- **Robust on broken code** thanks to tree_sitter error recovery

## Usage

### CLI
```bash
# Compile check with context for every diagnostic
cc-context main.cpp

# Machine-readable output, errors only
cc-context main.cpp --format json --errors-only

# Deeper tree view with a different compiler
cc-context main.cpp --compiler clang++ --max-depth 5
```

### Library
```rust,no_run
use cc_context::{analyze_file, CompilerRunner};

fn main() -> anyhow::Result<()> {
    let runner = CompilerRunner::new();
    for item in analyze_file("main.cpp", &runner)? {
        println!("{}: {}", item.record.severity, item.record.message);
        if let Some(context) = &item.context {
            println!("  in {}", context.enclosing_scope);
        }
    }
    Ok(())
}
```
*/

pub mod compiler;
pub mod config;
pub mod context;
pub mod core;
pub mod diagnostics;
pub mod render;
pub mod syntax;
pub mod view;

// Re-export main types for convenience
pub use compiler::{CompilerError, CompilerRunner, DEFAULT_COMPILER, DEFAULT_STD};
pub use config::{AnalyzerConfig, CompilerConfig, ViewConfig, DEFAULT_CONFIG_FILE};
pub use context::{ContextResolver, ResolveError, ScopeContext, SourceSnippet, GLOBAL_SCOPE};
pub use diagnostics::{parse_diagnostics, DiagnosticRecord, DiagnosticSeverity};
pub use render::Reporter;
pub use syntax::{NodeKind, ParseError, SyntaxNode, TreeSitterAdapter};
pub use view::{build_view, PresentationNode};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// One diagnostic paired with the context resolved for it
///
/// `context` is `None` when resolution failed for this record; the
/// diagnostic itself is still reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDiagnostic {
    pub record: DiagnosticRecord,
    pub context: Option<ScopeContext>,
}

/// Runs a syntax-only compile on `path` and resolves context for every
/// diagnostic the compiler reported
pub fn analyze_file<P: AsRef<Path>>(
    path: P,
    runner: &CompilerRunner,
) -> Result<Vec<ResolvedDiagnostic>> {
    let path = path.as_ref();
    let raw = runner.run(path)?;
    let records = parse_diagnostics(&raw);

    let mut resolver = ContextResolver::new()?;
    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        let context = match resolver.resolve(&record.file, record.line) {
            Ok(context) => Some(context),
            Err(err) => {
                warn!(
                    "context unavailable for {}:{}: {}",
                    record.file.display(),
                    record.line,
                    err
                );
                None
            }
        };
        resolved.push(ResolvedDiagnostic { record, context });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_file_reports_missing_compiler() {
        let runner = CompilerRunner::new().with_binary("definitely-not-a-compiler");
        assert!(analyze_file("main.cpp", &runner).is_err());
    }
}
