//! Packrat memo table
//!
//! Results are keyed by `(rule id, byte offset)`. The table lives inside one
//! [`ParseContext`](super::context::ParseContext) and is never shared between
//! contexts, so a hit is only ever a replay of the same rule over the same
//! immutable input.
//!
//! Hit/miss counters are kept for diagnostics and benchmarks; they reset
//! together with the entries.

use super::outcome::Outcome;
use super::rule::RuleId;
use super::value::Value;
use ahash::RandomState;
use hashbrown::HashMap;

/// Key of a memoized result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoKey {
    /// Rule identity
    pub rule: RuleId,
    /// Offset the rule was started at
    pub pos: usize,
}

impl MemoKey {
    /// Create a new key
    #[inline]
    pub fn new(rule: RuleId, pos: usize) -> Self {
        Self { rule, pos }
    }
}

/// A memoized result
#[derive(Debug, Clone, PartialEq)]
pub struct MemoEntry {
    /// What the rule returned
    pub outcome: Outcome<Value>,
    /// Offset after the rule returned (the start offset on failure)
    pub end_pos: usize,
}

impl MemoEntry {
    /// Create a new entry
    #[inline]
    pub fn new(outcome: Outcome<Value>, end_pos: usize) -> Self {
        Self { outcome, end_pos }
    }
}

/// Memo table for one parse context
#[derive(Debug, Clone)]
pub struct MemoCache {
    entries: HashMap<MemoKey, MemoEntry, RandomState>,

    /// Statistics
    hits: u64,
    misses: u64,
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(64)
    }
}

impl MemoCache {
    /// Create a table with room for `capacity` entries
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a result, counting the hit or miss
    #[inline]
    pub fn get(&mut self, rule: RuleId, pos: usize) -> Option<&MemoEntry> {
        match self.entries.get(&MemoKey::new(rule, pos)) {
            Some(entry) => {
                self.hits += 1;
                Some(entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a result without touching the counters
    #[inline]
    pub fn peek(&self, rule: RuleId, pos: usize) -> Option<&MemoEntry> {
        self.entries.get(&MemoKey::new(rule, pos))
    }

    /// Store a result, replacing any previous one for the same key
    #[inline]
    pub fn insert(&mut self, rule: RuleId, pos: usize, entry: MemoEntry) {
        self.entries.insert(MemoKey::new(rule, pos), entry);
    }

    /// Drop every entry and reset the counters
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Get cache statistics as `(hits, misses, hit_rate)`
    #[inline]
    pub fn stats(&self) -> (u64, u64, f64) {
        let total = self.hits + self.misses;
        let hit_rate = if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        };
        (self.hits, self.misses, hit_rate)
    }

    /// Get the number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
