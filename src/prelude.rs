//! Prelude module for convenient imports
//!
//! ```
//! use pegctx::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Core Types
//! - [`ParseContext`] - Mutable parse context
//! - [`ContextConfig`] - Context configuration
//! - [`Outcome`] - Value or sentinel
//! - [`Value`] - Dynamic result value
//! - [`SyntaxError`] - Positioned diagnostic
//!
//! ## Rules
//! - [`str()`] - Match a literal string
//! - [`re()`] - Match a regex pattern
//! - [`seq()`] - Match a sequence of rules
//! - [`choice()`] - Match one of several rules
//! - [`maybe()`] - Optional rule
//! - [`cached()`] - Memoized rule
//! - [`skip()`] - Match and discard
//! - [`eof()`] - End of input
//! - [`lazy()`] - Forward reference
//! - [`Rule`] - A rule

pub use crate::engine::{ContextConfig, Outcome, ParseContext, SyntaxError, Value};

pub use crate::engine::rule::{cached, choice, eof, lazy, maybe, re, seq, skip, str, Rule};
