//! Rules - the combinators that drive a parse context
//!
//! A [`Rule`] is a closed set of combinators (literal, pattern, sequence,
//! ordered choice, optional, memoized, mapping, labeling, laziness) that run
//! against a [`ParseContext`]. Rules do no position or error bookkeeping of
//! their own beyond the contract every rule keeps:
//!
//! - on a match, the scan offset is left after the matched text;
//! - on a mismatch, the scan offset is left where it started, the rule
//!   returns [`Outcome::Invalid`], and the labels it expected are recorded.
//!
//! Every rule gets a [`RuleId`] at construction. The id is what `cached`
//! rules key the memo table with, so clones of a rule share memo entries.
//!
//! # Example
//!
//! ```rust
//! use pegctx::prelude::*;
//!
//! let pair = seq([str("a"), cached(seq([str("b"), str("c")])), str("d")]);
//! let out = pair.parse("abcd");
//! assert_eq!(out.into_value().unwrap().to_string(), r#"["a", ["b", "c"], "d"]"#);
//! ```

use super::cache::MemoEntry;
use super::context::ParseContext;
use super::error::{PatternError, SyntaxError};
use super::outcome::Outcome;
use super::pattern_cache;
use super::value::Value;
use regex::Regex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

/// Source label used by the entry points that don't take one
pub const DEFAULT_SOURCE: &str = "source";

static NEXT_RULE_ID: AtomicU32 = AtomicU32::new(0);

/// Stable identity of a rule, used as half of the memo key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u32);

impl RuleId {
    /// Allocate an id no other rule in this process has
    #[inline]
    fn fresh() -> Self {
        RuleId(NEXT_RULE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw id
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        RuleId(raw)
    }

    /// The raw id
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Value transformation applied by a `map` rule
pub type MapFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Callback invoked by an `on` rule
pub type OnFn = Arc<dyn Fn(&Value) + Send + Sync>;

/// The combinator a rule implements
#[derive(Clone)]
pub enum RuleKind {
    /// Match a literal string
    Str(String),

    /// Match a regular expression at the scan offset
    Re {
        /// The pattern as written
        pattern: String,
        /// The compiled, start-anchored pattern
        regex: Regex,
    },

    /// Match every rule in order
    Seq(Vec<Rule>),

    /// Try rules in order, first match wins
    Choice(Vec<Rule>),

    /// Match the rule or yield `Skip`
    Maybe(Box<Rule>),

    /// Memoize the rule by (id, offset)
    Cached(Box<Rule>),

    /// Transform the rule's value
    Map(Box<Rule>, MapFn),

    /// Observe the rule's value
    On(Box<Rule>, OnFn),

    /// Report `labels` instead of the rule's own expectations
    Fail {
        /// The labeled rule
        rule: Box<Rule>,
        /// What to report when it fails
        labels: Vec<String>,
    },

    /// Match the rule, discarding its value
    Skip(Box<Rule>),

    /// Match the end of input
    Eof,

    /// Forward reference, defined after construction
    Lazy(Arc<OnceLock<Rule>>),
}

/// A parser combinator with a stable identity
#[derive(Clone)]
pub struct Rule {
    id: RuleId,
    kind: RuleKind,
}

impl Rule {
    /// Wrap a kind with a fresh id
    pub fn new(kind: RuleKind) -> Self {
        Self {
            id: RuleId::fresh(),
            kind,
        }
    }

    /// This rule's identity
    #[inline]
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The combinator this rule implements
    #[inline]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    // ------------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------------

    /// Parse `input`, returning `Invalid` on failure
    ///
    /// The rule need not consume the whole input; add [`eof()`] for that.
    pub fn parse(&self, input: &str) -> Outcome<Value> {
        self.parse_source(input, DEFAULT_SOURCE)
    }

    /// Parse `input` labelled with `source`
    pub fn parse_source(&self, input: &str, source: &str) -> Outcome<Value> {
        let mut ctx = ParseContext::new(input, source);
        self.run(&mut ctx)
    }

    /// Parse `input`, turning failure into a [`SyntaxError`]
    ///
    /// The `Ok` outcome is never `Invalid`.
    pub fn parse_strict(&self, input: &str) -> Result<Outcome<Value>, SyntaxError> {
        self.parse_strict_source(input, DEFAULT_SOURCE)
    }

    /// Parse `input` labelled with `source`, turning failure into a
    /// [`SyntaxError`]
    pub fn parse_strict_source(
        &self,
        input: &str,
        source: &str,
    ) -> Result<Outcome<Value>, SyntaxError> {
        let mut ctx = ParseContext::new(input, source);
        self.parse_strict_with(&mut ctx)
    }

    /// Run against an existing context, turning failure into a
    /// [`SyntaxError`]
    pub fn parse_strict_with(
        &self,
        ctx: &mut ParseContext,
    ) -> Result<Outcome<Value>, SyntaxError> {
        match self.run(ctx) {
            Outcome::Invalid => {
                log_debug!(
                    "Strict parse failed: source={}, furthest={}",
                    ctx.source(),
                    ctx.furthest_failure().0
                );
                Err(ctx.build_error(ctx.source()))
            }
            out => Ok(out),
        }
    }

    /// Run this rule at the context's scan offset
    pub fn run(&self, ctx: &mut ParseContext) -> Outcome<Value> {
        match &self.kind {
            RuleKind::Str(lit) => parse_str(ctx, lit),
            RuleKind::Re { pattern, regex } => parse_re(ctx, pattern, regex),
            RuleKind::Seq(rules) => parse_seq(ctx, rules),
            RuleKind::Choice(rules) => rules
                .iter()
                .map(|rule| rule.run(ctx))
                .find(Outcome::is_match)
                .unwrap_or(Outcome::Invalid),
            RuleKind::Maybe(rule) => match rule.run(ctx) {
                Outcome::Invalid => Outcome::Skip,
                out => out,
            },
            RuleKind::Cached(rule) => self.parse_cached(ctx, rule),
            RuleKind::Map(rule, f) => rule.run(ctx).map(|v| f(v)),
            RuleKind::On(rule, f) => {
                let out = rule.run(ctx);
                if let Outcome::Value(v) = &out {
                    f(v);
                }
                out
            }
            RuleKind::Fail { rule, labels } => {
                let start = ctx.current_offset();
                let out = rule.run(ctx);
                if out.is_invalid() {
                    ctx.record_failure(start, labels);
                }
                out
            }
            RuleKind::Skip(rule) => match rule.run(ctx) {
                Outcome::Invalid => Outcome::Invalid,
                _ => Outcome::Skip,
            },
            RuleKind::Eof => {
                if ctx.is_eof() {
                    Outcome::Skip
                } else {
                    ctx.fail_here(["end of input"]);
                    Outcome::Invalid
                }
            }
            RuleKind::Lazy(cell) => match cell.get() {
                Some(rule) => rule.run(ctx),
                None => panic!("lazy rule {} run before being defined", self.id.raw()),
            },
        }
    }

    fn parse_cached(&self, ctx: &mut ParseContext, rule: &Rule) -> Outcome<Value> {
        let start = ctx.current_offset();
        if let Some(entry) = ctx.memo_get(self.id, start) {
            ctx.seek(entry.end_pos);
            return entry.outcome;
        }

        let out = rule.run(ctx);
        let end = ctx.current_offset();
        ctx.memo_store(self.id, start, MemoEntry::new(out.clone(), end));
        out
    }

    // ------------------------------------------------------------------------
    // Laziness
    // ------------------------------------------------------------------------

    /// Give a rule made by [`lazy()`] its definition
    ///
    /// Returns `false` if this is not a lazy rule or it is already defined.
    /// A lazy rule that refers to itself through `target` keeps itself alive
    /// for as long as any clone exists.
    pub fn define(&self, target: Rule) -> bool {
        match &self.kind {
            RuleKind::Lazy(cell) => cell.set(target).is_ok(),
            _ => false,
        }
    }

    // ------------------------------------------------------------------------
    // Chaining
    // ------------------------------------------------------------------------

    /// Sequence `self` then `next`, extending `self` if it is a sequence
    pub fn then(self, next: Rule) -> Rule {
        match self.kind {
            RuleKind::Seq(mut rules) => {
                rules.push(next);
                Rule::new(RuleKind::Seq(rules))
            }
            kind => Rule::new(RuleKind::Seq(vec![
                Rule { id: self.id, kind },
                next,
            ])),
        }
    }

    /// Ordered choice of `self` then `other`, extending `self` if it is a choice
    pub fn or(self, other: Rule) -> Rule {
        match self.kind {
            RuleKind::Choice(mut rules) => {
                rules.push(other);
                Rule::new(RuleKind::Choice(rules))
            }
            kind => Rule::new(RuleKind::Choice(vec![
                Rule { id: self.id, kind },
                other,
            ])),
        }
    }

    /// See [`maybe()`]
    pub fn maybe(self) -> Rule {
        maybe(self)
    }

    /// See [`cached()`]
    pub fn cached(self) -> Rule {
        cached(self)
    }

    /// See [`skip()`]
    pub fn skip(self) -> Rule {
        skip(self)
    }

    /// Transform the value of a match
    pub fn map<F>(self, f: F) -> Rule
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Rule::new(RuleKind::Map(Box::new(self), Arc::new(f)))
    }

    /// Observe the value of a match
    pub fn on<F>(self, f: F) -> Rule
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        Rule::new(RuleKind::On(Box::new(self), Arc::new(f)))
    }

    /// Report `labels` when this rule fails
    ///
    /// The labels are recorded at the offset the rule started from and merge
    /// with whatever the inner rule recorded there. A deeper inner failure
    /// still wins.
    pub fn fail<I, S>(self, labels: I) -> Rule
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::new(RuleKind::Fail {
            rule: Box::new(self),
            labels: labels.into_iter().map(Into::into).collect(),
        })
    }
}

fn parse_str(ctx: &mut ParseContext, lit: &str) -> Outcome<Value> {
    if ctx.rest().starts_with(lit) {
        let end = ctx.current_offset() + lit.len();
        ctx.seek(end);
        Outcome::Value(Value::string(lit))
    } else {
        ctx.fail_here([format!("{:?}", lit)]);
        Outcome::Invalid
    }
}

fn parse_re(ctx: &mut ParseContext, pattern: &str, regex: &Regex) -> Outcome<Value> {
    let matched = regex.find(ctx.rest()).map(|m| m.as_str().to_string());
    match matched {
        Some(text) => {
            let end = ctx.current_offset() + text.len();
            ctx.seek(end);
            Outcome::Value(Value::String(text))
        }
        None => {
            ctx.fail_here([format!("/{}/", pattern)]);
            Outcome::Invalid
        }
    }
}

fn parse_seq(ctx: &mut ParseContext, rules: &[Rule]) -> Outcome<Value> {
    let start = ctx.current_offset();
    let mut items = Vec::with_capacity(rules.len());

    for rule in rules {
        match rule.run(ctx) {
            Outcome::Value(v) => items.push(v),
            Outcome::Skip => {}
            Outcome::Invalid => {
                ctx.seek(start);
                return Outcome::Invalid;
            }
        }
    }

    Outcome::Value(Value::Array(items))
}

// ============================================================================
// Constructors
// ============================================================================

/// Match a literal string
pub fn str(lit: impl Into<String>) -> Rule {
    Rule::new(RuleKind::Str(lit.into()))
}

/// Match a regular expression at the scan offset
pub fn re(pattern: &str) -> Result<Rule, PatternError> {
    let regex =
        pattern_cache::get_or_compile(pattern).map_err(|e| PatternError::new(pattern, e))?;
    Ok(Rule::new(RuleKind::Re {
        pattern: pattern.to_string(),
        regex,
    }))
}

/// Match every rule in order, collecting non-`Skip` values into an array
pub fn seq(rules: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::new(RuleKind::Seq(rules.into_iter().collect()))
}

/// Try rules in order; the first match wins
pub fn choice(rules: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::new(RuleKind::Choice(rules.into_iter().collect()))
}

/// Match `rule`, or yield `Skip` without consuming input
pub fn maybe(rule: Rule) -> Rule {
    Rule::new(RuleKind::Maybe(Box::new(rule)))
}

/// Memoize `rule` by (id, offset) in the context's memo table
pub fn cached(rule: Rule) -> Rule {
    Rule::new(RuleKind::Cached(Box::new(rule)))
}

/// Match `rule`, yielding `Skip` instead of its value
pub fn skip(rule: Rule) -> Rule {
    Rule::new(RuleKind::Skip(Box::new(rule)))
}

/// Match the end of input
pub fn eof() -> Rule {
    Rule::new(RuleKind::Eof)
}

/// A forward reference, to be given a definition with [`Rule::define`]
///
/// # Example
///
/// ```rust
/// use pegctx::prelude::*;
///
/// // parens = "(" parens? ")"
/// let parens = lazy();
/// parens.define(seq([str("("), maybe(parens.clone()), str(")")]));
/// assert!(parens.parse("(())").is_value());
/// ```
pub fn lazy() -> Rule {
    Rule::new(RuleKind::Lazy(Arc::new(OnceLock::new())))
}
