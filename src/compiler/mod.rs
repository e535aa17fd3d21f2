//! Syntax-only compiler invocation and stderr capture

use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Compiler binary used when none is configured
pub const DEFAULT_COMPILER: &str = "g++";

/// Language standard used when none is configured
pub const DEFAULT_STD: &str = "c++17";

/// Errors from launching the compiler process
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("compiler '{binary}' not found in PATH")]
    NotFound { binary: String },
    #[error("failed to run '{binary}': {source}")]
    Io {
        binary: String,
        #[source]
        source: io::Error,
    },
}

/// Runs a compiler in syntax-only mode against a single source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerRunner {
    binary: String,
    std: String,
    extra_args: Vec<String>,
}

impl CompilerRunner {
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_COMPILER.to_string(),
            std: DEFAULT_STD.to_string(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_std(mut self, std: impl Into<String>) -> Self {
        self.std = std.into();
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Invokes the compiler and returns its raw stderr
    ///
    /// A failing exit status is not an error here: the diagnostics on stderr
    /// are the payload, and a clean compile simply yields an empty string.
    pub fn run(&self, source: &Path) -> Result<String, CompilerError> {
        debug!("running {} on {}", self.binary, source.display());

        let output = self.build_command(source).output().map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                CompilerError::NotFound {
                    binary: self.binary.clone(),
                }
            } else {
                CompilerError::Io {
                    binary: self.binary.clone(),
                    source: err,
                }
            }
        })?;

        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }

    fn build_command(&self, source: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-fsyntax-only")
            .arg("-fdiagnostics-color=never")
            .arg(format!("-std={}", self.std));
        for arg in &self.extra_args {
            command.arg(arg);
        }
        command.arg(source);
        command
    }
}

impl Default for CompilerRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(command: &Command) -> Vec<String> {
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_command_passes_syntax_only_flags() {
        let runner = CompilerRunner::new();
        let command = runner.build_command(Path::new("main.cpp"));

        assert_eq!(command.get_program(), "g++");
        assert_eq!(
            args_of(&command),
            vec!["-fsyntax-only", "-fdiagnostics-color=never", "-std=c++17", "main.cpp"]
        );
    }

    #[test]
    fn test_extra_args_come_before_the_file() {
        let runner = CompilerRunner::new().with_extra_args(vec!["-Wall".to_string()]);
        let command = runner.build_command(Path::new("main.cpp"));

        let args = args_of(&command);
        assert_eq!(args[args.len() - 2], "-Wall");
        assert_eq!(args[args.len() - 1], "main.cpp");
    }

    #[test]
    fn test_builders_override_defaults() {
        let runner = CompilerRunner::new().with_binary("clang++").with_std("c++20");
        let command = runner.build_command(Path::new("a.cpp"));

        assert_eq!(command.get_program(), "clang++");
        assert!(args_of(&command).contains(&"-std=c++20".to_string()));
    }

    #[test]
    fn test_default_matches_new() {
        assert_eq!(CompilerRunner::default(), CompilerRunner::new());
    }
}
