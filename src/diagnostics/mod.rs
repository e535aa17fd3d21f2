//! Structured records parsed out of raw compiler output

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity of a compiler diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// One diagnostic line from the compiler, split into its parts
///
/// `line` and `column` are 1-based; records with a zero coordinate are never
/// produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub severity: DiagnosticSeverity,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn new(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            severity,
            message: message.into(),
        }
    }
}

// The file group is non-greedy so Windows drive letters and other embedded
// colons stay inside the path instead of ending it at the first colon.
static DIAGNOSTIC_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?):(\d+):(\d+):\s+(error|warning):\s+(.*)$")
        .expect("diagnostic pattern must compile")
});

/// Parses a raw diagnostic stream into structured records.
///
/// Processing is line by line and best-effort: notes, carets, blank lines and
/// anything else that does not match the `file:line:column: severity: message`
/// shape is silently dropped. Matched lines whose line or column is zero or
/// too large to represent are dropped as well.
pub fn parse_diagnostics(raw: &str) -> Vec<DiagnosticRecord> {
    let mut records = Vec::new();

    for text_line in raw.lines() {
        let caps = match DIAGNOSTIC_LINE.captures(text_line) {
            Some(caps) => caps,
            None => continue,
        };

        let (line, column) = match (caps[2].parse::<usize>(), caps[3].parse::<usize>()) {
            (Ok(line), Ok(column)) if line > 0 && column > 0 => (line, column),
            _ => continue,
        };

        let severity = match &caps[4] {
            "error" => DiagnosticSeverity::Error,
            "warning" => DiagnosticSeverity::Warning,
            _ => continue,
        };

        records.push(DiagnosticRecord {
            file: PathBuf::from(&caps[1]),
            line,
            column,
            severity,
            message: caps[5].to_string(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_error_line() {
        let records = parse_diagnostics("main.cpp:5:12: error: expected ';' before 'return'");
        assert_eq!(
            records,
            vec![DiagnosticRecord::new(
                "main.cpp",
                5,
                12,
                DiagnosticSeverity::Error,
                "expected ';' before 'return'"
            )]
        );
    }

    #[test]
    fn test_parse_warning_line() {
        let records = parse_diagnostics("src/util.cpp:42:9: warning: unused variable 'tmp'");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, DiagnosticSeverity::Warning);
        assert_eq!(records[0].file, PathBuf::from("src/util.cpp"));
        assert_eq!(records[0].line, 42);
        assert_eq!(records[0].column, 9);
    }

    #[test]
    fn test_notes_and_blank_lines_are_dropped() {
        let raw = "main.cpp:3:1: error: unknown type name 'in'\n\
                   note: candidates are: int, long\n\
                   \n\
                   main.cpp: In function 'int main()':\n\
                   main.cpp:4:5: warning: unused variable 'x'\n";
        let records = parse_diagnostics(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[1].line, 4);
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_diagnostics("").is_empty());
        assert!(parse_diagnostics("note: this is not a diagnostic").is_empty());
    }

    #[test]
    fn test_windows_drive_letter_stays_in_path() {
        let records = parse_diagnostics(r"C:\proj\main.cpp:3:7: error: expected ')'");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, PathBuf::from(r"C:\proj\main.cpp"));
        assert_eq!(records[0].line, 3);
        assert_eq!(records[0].column, 7);
    }

    #[test]
    fn test_message_keeps_embedded_colons() {
        let records = parse_diagnostics("a.cpp:1:2: error: 'std::foo' has not been declared");
        assert_eq!(records[0].message, "'std::foo' has not been declared");
    }

    #[test]
    fn test_zero_coordinates_are_dropped() {
        assert!(parse_diagnostics("a.cpp:0:1: error: bad").is_empty());
        assert!(parse_diagnostics("a.cpp:1:0: error: bad").is_empty());
    }

    #[test]
    fn test_partial_lines_are_dropped() {
        assert!(parse_diagnostics("a.cpp:12: error: missing column").is_empty());
        assert!(parse_diagnostics("a.cpp:1:2: fatal: not a severity").is_empty());
        assert!(parse_diagnostics("a.cpp:1:2 error: no colon").is_empty());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(DiagnosticSeverity::Error.to_string(), "error");
        assert_eq!(DiagnosticSeverity::Warning.to_string(), "warning");
    }
}
