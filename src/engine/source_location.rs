//! Source Location Utilities
//!
//! Line/column recovery from a flat byte offset, and extraction of the
//! (clipped) line of text around an offset for diagnostics.
//!
//! Offsets are byte offsets into UTF-8 text and must sit on a character
//! boundary. Lines and columns are 1-based; columns count characters, so they
//! coincide with byte columns for ASCII input.

use memchr::{memchr, memchr_iter, memrchr};
use std::fmt;

/// Default number of characters kept on either side of the offset by
/// [`line_text_of`]
pub const DEFAULT_LINE_CONTEXT: usize = 40;

/// 1-based line containing `offset`: newlines before it, plus one
#[inline]
pub fn line_of(input: &str, offset: usize) -> usize {
    let offset = offset.min(input.len());
    memchr_iter(b'\n', &input.as_bytes()[..offset]).count() + 1
}

/// 1-based column of `offset` within its line
///
/// The character right after a newline is column 1.
pub fn col_of(input: &str, offset: usize) -> usize {
    let offset = offset.min(input.len());
    if offset == 0 {
        return 1;
    }
    let line_start = match memrchr(b'\n', &input.as_bytes()[..offset]) {
        Some(nl) => nl + 1,
        None => 0,
    };
    input[line_start..offset].chars().count() + 1
}

/// The line of text containing `offset`, clipped to `radius` characters on
/// either side of it
///
/// The line starts after the last newline before `offset` and ends before
/// the first newline at or after `offset`. The result holds at most
/// `2 * radius + 1` characters.
pub fn line_text_of(input: &str, offset: usize, radius: usize) -> &str {
    let offset = offset.min(input.len());
    let bytes = input.as_bytes();

    let mut start = memrchr(b'\n', &bytes[..offset]).map_or(0, |nl| nl + 1);
    let mut end = memchr(b'\n', &bytes[offset..]).map_or(input.len(), |nl| offset + nl);

    if radius == 0 {
        start = offset;
    } else if let Some((idx, _)) = input[start..offset].char_indices().rev().nth(radius - 1) {
        start += idx;
    }

    if let Some((idx, _)) = input[offset..end].char_indices().nth(radius + 1) {
        end = offset + idx;
    }

    &input[start..end]
}

/// A position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in characters)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of input
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Calculate position from an offset in the input
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        Self {
            offset,
            line: line_of(input, offset),
            column: col_of(input, offset),
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}
