//! Out-of-band parse outcomes
//!
//! Every rule returns an [`Outcome`]: either a real value, or one of the two
//! sentinels. `Skip` means the rule matched but produced nothing worth
//! keeping (discarded whitespace, an absent optional). `Invalid` means the
//! rule did not match.
//!
//! Because the sentinels are enum variants rather than magic values, a
//! `Value(Nil)`, `Value(false)` or empty-string result can never be mistaken
//! for either of them.

use std::fmt;

/// Result of running a rule against a parse context
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Matched and produced a value
    Value(T),
    /// Matched, but the value is to be discarded
    Skip,
    /// Did not match
    Invalid,
}

impl<T> Outcome<T> {
    /// Whether this is the `Invalid` sentinel
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid)
    }

    /// Whether this is the `Skip` sentinel
    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip)
    }

    /// Whether this carries a value
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    /// Whether the rule matched (`Value` or `Skip`)
    #[inline]
    pub fn is_match(&self) -> bool {
        !self.is_invalid()
    }

    /// Get the carried value, if any
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Take the carried value, if any
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Map the carried value, leaving sentinels untouched
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Value(v) => Outcome::Value(f(v)),
            Outcome::Skip => Outcome::Skip,
            Outcome::Invalid => Outcome::Invalid,
        }
    }

    /// Borrow the carried value
    #[inline]
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Value(v) => Outcome::Value(v),
            Outcome::Skip => Outcome::Skip,
            Outcome::Invalid => Outcome::Invalid,
        }
    }
}

impl<T> From<T> for Outcome<T> {
    fn from(value: T) -> Self {
        Outcome::Value(value)
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => v.fmt(f),
            Outcome::Skip => f.write_str("SKIP_TOKEN"),
            Outcome::Invalid => f.write_str("INVALID_TOKEN"),
        }
    }
}
