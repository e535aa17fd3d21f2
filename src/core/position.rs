/*!
# Source line spans

Line-based location types shared by the diagnostic and syntax sides of the
analyzer. Both coordinate spaces are 1-based; line 0 marks a missing location.
*/

use serde::{Deserialize, Serialize};

/// Inclusive range of 1-based source lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub end_line: usize,
}

impl Span {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Span of a node the parser could not place in the source
    pub fn unknown() -> Self {
        Self::new(0, 0)
    }

    /// True when both endpoints carry the "no location" marker
    pub fn is_unknown(&self) -> bool {
        self.start_line == 0 && self.end_line == 0
    }

    /// True when `line` falls inside the span, endpoints included
    pub fn contains(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let span = Span::new(3, 7);
        assert!(span.contains(3));
        assert!(span.contains(5));
        assert!(span.contains(7));
        assert!(!span.contains(2));
        assert!(!span.contains(8));
    }

    #[test]
    fn test_single_line_span() {
        let span = Span::new(4, 4);
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }

    #[test]
    fn test_unknown_span() {
        assert!(Span::unknown().is_unknown());
        assert!(Span::default().is_unknown());
        assert!(!Span::new(1, 1).is_unknown());
    }
}
