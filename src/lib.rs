//! pegctx - Packrat Parse Context
//!
//! The runtime support layer for a backtracking parser-combinator engine:
//! - Scan offset over an immutable input
//! - Packrat memoization keyed by (rule id, offset)
//! - Furthest-failure tracking for diagnostics
//! - Syntax errors with line, column, clipped source line and caret
//! - `Skip`/`Invalid` sentinel outcomes
//! - A small set of reference rules that drive the context
//!
//! ## Quick Start
//!
//! ```rust
//! use pegctx::prelude::*;
//!
//! let greeting = seq([str("hello"), skip(str(" ")), str("world")]);
//! assert!(greeting.parse("hello world").is_value());
//!
//! let err = greeting.parse_strict_source("hello there", "greet.txt").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "in greet.txt:1 at 7, expect token [ \"world\" ]\nhello there\n      ^"
//! );
//! ```
//!
//! ## Driving a context directly
//!
//! ```rust
//! use pegctx::ParseContext;
//!
//! let mut ctx = ParseContext::new("ab\ncd", "source");
//! assert_eq!(ctx.line_of(3), 2);
//! assert_eq!(ctx.col_of(3), 1);
//! ctx.seek(3);
//! assert_eq!(ctx.rest(), "cd");
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::redundant_closure)]

// Prelude module for convenient imports
pub mod prelude;

pub mod engine;

/// Re-export commonly used types for convenience
pub use engine::{
    cached, choice, col_of, eof, lazy, line_of, line_text_of, maybe, re, seq, skip, str,
    ContextConfig, MemoCache, MemoEntry, Outcome, ParseContext, PatternError, Rule, RuleId,
    RuleKind, RuleTree, SourcePosition, SyntaxError, Value,
};
