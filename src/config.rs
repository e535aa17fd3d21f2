/*!
# Configuration

Optional TOML configuration for the analyzer. Every field has a default, so
a missing file, an empty file and a partial file all work; command-line
flags override whatever the file provides.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compiler::{DEFAULT_COMPILER, DEFAULT_STD};

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cc-context.toml";

/// Top-level analyzer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub compiler: CompilerConfig,
    pub view: ViewConfig,
}

/// Compiler invocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Compiler binary to invoke
    pub binary: String,
    /// Language standard passed as `-std=`
    pub std: String,
    /// Extra arguments appended before the source file
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_COMPILER.to_string(),
            std: DEFAULT_STD.to_string(),
            args: Vec::new(),
        }
    }
}

/// Syntax tree display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Levels of the tree shown below the root
    pub max_depth: usize,
    /// Whether the subtree view is rendered at all
    pub show_tree: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            show_tree: true,
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read config from {}", path.as_ref().display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse TOML config from {}", path.as_ref().display())
        })?;

        Ok(config)
    }

    /// Loads `cc-context.toml` from the working directory when present
    ///
    /// A missing file yields the defaults; a present but broken file is an
    /// error rather than a silent fallback.
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).is_file() {
            Self::load_from_file(DEFAULT_CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of the loaded values
    ///
    /// A `Some` flag wins over whatever the file or the defaults provided;
    /// `no_tree` can only disable the tree view, never re-enable it.
    pub fn with_overrides(
        mut self,
        compiler: Option<String>,
        std: Option<String>,
        max_depth: Option<usize>,
        no_tree: bool,
    ) -> Self {
        if let Some(compiler) = compiler {
            self.compiler.binary = compiler;
        }
        if let Some(std) = std {
            self.compiler.std = std;
        }
        if let Some(max_depth) = max_depth {
            self.view.max_depth = max_depth;
        }
        if no_tree {
            self.view.show_tree = false;
        }
        self
    }
}
