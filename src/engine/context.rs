//! Mutable parse context
//!
//! A [`ParseContext`] is the single source of truth for one parse attempt:
//! the immutable input, the scan offset, the packrat memo table, and the
//! furthest failure seen so far.
//!
//! Rules move the offset forward on a match and back on a mismatch, store
//! and replay memoized results, and report what they expected whenever they
//! fail. Once the top-level rule has returned, [`ParseContext::build_error`]
//! turns the accumulated failure state into a [`SyntaxError`].
//!
//! # Furthest-failure merging
//!
//! Only failures at the deepest offset reached are kept. A failure further
//! along replaces the expected labels, one at the same offset adds its labels
//! (first seen first, no duplicates), and one at an earlier offset is
//! ignored.
//!
//! # Example
//!
//! ```rust
//! use pegctx::ParseContext;
//!
//! let mut ctx = ParseContext::new("let x = ;", "demo.txt");
//! ctx.record_failure(8, ["identifier"]);
//! ctx.record_failure(8, ["number", "identifier"]);
//! ctx.record_failure(4, ["keyword"]);
//!
//! let error = ctx.build_error("demo.txt");
//! assert_eq!(
//!     error.to_string(),
//!     "in demo.txt:1 at 9, expect token [ identifier | number ]\nlet x = ;\n        ^"
//! );
//! ```

use super::cache::{MemoCache, MemoEntry};
use super::error::SyntaxError;
use super::rule::RuleId;
use super::source_location::{self, SourcePosition, DEFAULT_LINE_CONTEXT};
use serde::{Deserialize, Serialize};

/// Default initial capacity of the memo table
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Configuration options for a parse context
///
/// Use [`ContextConfig::default()`] for sensible defaults, or customize
/// individual fields as needed.
///
/// # Example
///
/// ```rust
/// use pegctx::ContextConfig;
///
/// let config = ContextConfig::new()
///     .with_memoize(false)
///     .with_line_context(20);
/// assert!(!config.memoize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Whether `cached` rules consult the memo table
    pub memoize: bool,

    /// Characters kept on each side of the error offset in diagnostics
    pub line_context: usize,

    /// Initial capacity of the memo table
    pub cache_capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            memoize: true,
            line_context: DEFAULT_LINE_CONTEXT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ContextConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable memoization
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Set the diagnostic clip radius
    pub fn with_line_context(mut self, chars: usize) -> Self {
        self.line_context = chars;
        self
    }

    /// Set the initial memo table capacity
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

/// Mutable parsing context over one input
#[derive(Debug, Clone)]
pub struct ParseContext {
    input: String,
    source: String,
    pos: usize,
    memo: MemoCache,
    fail_pos: usize,
    fail_tokens: Vec<String>,
    config: ContextConfig,
}

impl ParseContext {
    /// Create a context at offset 0 with default configuration
    pub fn new(input: impl Into<String>, source: impl Into<String>) -> Self {
        Self::with_config(input, source, ContextConfig::default())
    }

    /// Create a context at offset 0 with the given configuration
    pub fn with_config(
        input: impl Into<String>,
        source: impl Into<String>,
        config: ContextConfig,
    ) -> Self {
        let input = input.into();
        let source = source.into();

        log_debug!(
            "New parse context: source={}, input_len={}, memoize={}",
            source,
            input.len(),
            config.memoize
        );

        Self {
            input,
            source,
            pos: 0,
            memo: MemoCache::new(config.cache_capacity),
            fail_pos: 0,
            fail_tokens: Vec::new(),
            config,
        }
    }

    /// The whole input
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The source label given at construction
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The active configuration
    #[inline]
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Current scan offset
    #[inline]
    pub fn current_offset(&self) -> usize {
        self.pos
    }

    /// Move the scan offset
    ///
    /// # Panics
    ///
    /// If `offset` is past the end of input or not on a character boundary.
    #[inline]
    pub fn seek(&mut self, offset: usize) {
        assert!(
            offset <= self.input.len(),
            "seek to {} is out of range for input of length {}",
            offset,
            self.input.len()
        );
        assert!(
            self.input.is_char_boundary(offset),
            "seek to {} splits a UTF-8 character",
            offset
        );
        self.pos = offset;
    }

    /// Input from the scan offset on
    #[inline]
    pub fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Whether the scan offset is at the end of input
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos == self.input.len()
    }

    // ------------------------------------------------------------------------
    // Memoization
    // ------------------------------------------------------------------------

    /// Replay a memoized result for `rule` at `pos`
    ///
    /// Always misses when memoization is disabled.
    #[inline]
    pub fn memo_get(&mut self, rule: RuleId, pos: usize) -> Option<MemoEntry> {
        if !self.config.memoize {
            return None;
        }
        self.memo.get(rule, pos).cloned()
    }

    /// Store the result of `rule` started at `pos`
    ///
    /// Dropped when memoization is disabled.
    #[inline]
    pub fn memo_store(&mut self, rule: RuleId, pos: usize, entry: MemoEntry) {
        if self.config.memoize {
            self.memo.insert(rule, pos, entry);
        }
    }

    /// Look at the stored result of `rule` at `pos` without counting a hit
    /// or miss
    #[inline]
    pub fn memo_peek(&self, rule: RuleId, pos: usize) -> Option<&MemoEntry> {
        self.memo.peek(rule, pos)
    }

    /// The memo table
    #[inline]
    pub fn memo(&self) -> &MemoCache {
        &self.memo
    }

    /// Empty the memo table
    ///
    /// Call between independent parse attempts over the same context; entries
    /// are keyed only by rule and offset.
    pub fn clear_memo(&mut self) {
        log_debug!("Clearing memo table: {} entries", self.memo.len());
        self.memo.clear();
    }

    /// Return to a freshly constructed state over the same input
    pub fn reset(&mut self) {
        self.pos = 0;
        self.memo.clear();
        self.fail_pos = 0;
        self.fail_tokens.clear();
    }

    // ------------------------------------------------------------------------
    // Failure tracking
    // ------------------------------------------------------------------------

    /// Record that a rule expected one of `labels` at `offset`
    pub fn record_failure<I, S>(&mut self, offset: usize, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if offset > self.fail_pos {
            log_debug!("Furthest failure advanced: {} -> {}", self.fail_pos, offset);
            self.fail_pos = offset;
            self.fail_tokens.clear();
        } else if offset < self.fail_pos {
            return;
        }

        for label in labels {
            let label = label.as_ref();
            if !self.fail_tokens.iter().any(|t| t == label) {
                self.fail_tokens.push(label.to_string());
            }
        }
    }

    /// Record a failure at the current scan offset
    #[inline]
    pub fn fail_here<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.record_failure(self.pos, labels);
    }

    /// The furthest failure offset and the labels expected there
    #[inline]
    pub fn furthest_failure(&self) -> (usize, &[String]) {
        (self.fail_pos, &self.fail_tokens)
    }

    /// Build the diagnostic for a failed parse
    ///
    /// If the scan offset stopped at or before the furthest failure, the error
    /// points at the furthest failure and lists what was expected there.
    /// Otherwise it points at the scan offset with no expectations.
    pub fn build_error(&self, source: &str) -> SyntaxError {
        let (at, expects) = if self.pos <= self.fail_pos {
            (
                self.fail_pos,
                Some(format!(
                    ", expect token [ {} ]",
                    self.fail_tokens.join(" | ")
                )),
            )
        } else {
            (self.pos, None)
        };

        let line = self.line_of(at);
        let col = self.col_of(at);
        let message = format!(
            "in {}:{} at {}{}",
            source,
            line,
            col,
            expects.unwrap_or_default()
        );

        SyntaxError::new(message, self.line_text_of(at), line, col)
    }

    // ------------------------------------------------------------------------
    // Position math
    // ------------------------------------------------------------------------

    /// 1-based line containing `offset`
    #[inline]
    pub fn line_of(&self, offset: usize) -> usize {
        source_location::line_of(&self.input, offset)
    }

    /// 1-based column of `offset`
    #[inline]
    pub fn col_of(&self, offset: usize) -> usize {
        source_location::col_of(&self.input, offset)
    }

    /// The line containing `offset`, clipped around it
    #[inline]
    pub fn line_text_of(&self, offset: usize) -> &str {
        source_location::line_text_of(&self.input, offset, self.config.line_context)
    }

    /// Line and column of `offset`
    #[inline]
    pub fn position_of(&self, offset: usize) -> SourcePosition {
        SourcePosition::from_offset(&self.input, offset)
    }
}
