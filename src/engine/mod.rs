//! Parse engine
//!
//! # Module Organization
//!
//! ## Core Types
//! - [`ParseContext`] - Scan offset, memo table and furthest failure
//! - [`ContextConfig`] - Context configuration
//! - [`Outcome`] - A value, or the `Skip`/`Invalid` sentinels
//! - [`Value`] - Dynamic result value
//!
//! ## Caching
//! - [`MemoCache`] - Packrat memo table keyed by (rule id, offset)
//!
//! ## Error Handling
//! - [`SyntaxError`] - Positioned diagnostic
//! - [`source_location`] - Line/column math
//!
//! ## Rules
//! - [`rule`] - The combinators that drive a context
//! - [`debug`] - Rule introspection

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod cache;
pub mod context;
pub mod debug;
pub mod error;
pub mod outcome;
pub mod pattern_cache;
pub mod rule;
pub mod source_location;
pub mod value;

// ============================================================================
// Core Types
// ============================================================================

pub use context::{ContextConfig, ParseContext};
pub use outcome::Outcome;
pub use value::Value;

// ============================================================================
// Caching
// ============================================================================

pub use cache::{MemoCache, MemoEntry, MemoKey};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{PatternError, SyntaxError};
pub use source_location::{col_of, line_of, line_text_of, SourcePosition};

// ============================================================================
// Rules
// ============================================================================

pub use debug::RuleTree;
pub use rule::{
    cached, choice, eof, lazy, maybe, re, seq, skip, str, Rule, RuleId, RuleKind, DEFAULT_SOURCE,
};
