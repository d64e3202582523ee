//! Syntax errors and other error types
//!
//! A [`SyntaxError`] is a plain value: building one never fails and never
//! signals anything. The strict entry points return it through `Err`.
//!
//! # Example Output
//!
//! ```text
//! in config.ini:3 at 5, expect token [ "=" | ":" ]
//! key value
//!     ^
//! ```

use std::fmt;

/// A positioned syntax error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    line_text: String,
    line: usize,
    col: usize,
}

impl SyntaxError {
    /// Create a new syntax error
    pub fn new(
        message: impl Into<String>,
        line_text: impl Into<String>,
        line: usize,
        col: usize,
    ) -> Self {
        Self {
            message: message.into(),
            line_text: line_text.into(),
            line,
            col,
        }
    }

    /// The message line (source label, position and expected tokens)
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The offending source line, clipped
    pub fn line_text(&self) -> &str {
        &self.line_text
    }

    /// Line number (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column number (1-based)
    pub fn col(&self) -> usize {
        self.col
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{:width$}^",
            self.message,
            self.line_text,
            "",
            width = self.col.saturating_sub(1)
        )
    }
}

impl std::error::Error for SyntaxError {}

/// A pattern rule could not be compiled
#[derive(Debug, Clone)]
pub struct PatternError {
    pattern: String,
    source: regex::Error,
}

impl PatternError {
    pub(crate) fn new(pattern: &str, source: regex::Error) -> Self {
        Self {
            pattern: pattern.to_string(),
            source,
        }
    }

    /// The pattern that failed to compile
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid pattern /{}/: {}", self.pattern, self.source)
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
