//! End-to-end tests: rules driven over a parse context

use pegctx::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn s(text: &str) -> Value {
    Value::string(text)
}

fn arr(items: Vec<Value>) -> Value {
    Value::Array(items)
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn test_cached_nested_sequence() {
    let rule = seq([str("a"), cached(seq([str("b"), str("c")])), str("d")]);

    assert_eq!(
        rule.parse("abcd"),
        Outcome::Value(arr(vec![s("a"), arr(vec![s("b"), s("c")]), s("d")]))
    );
}

#[test]
fn test_cache_does_not_change_results() {
    let with_cache = seq([str("a"), cached(seq([str("b"), str("c")])), str("d")]);
    let without_cache = seq([str("a"), seq([str("b"), str("c")]), str("d")]);

    for input in ["abcd", "abc", "abxd", "", "abcdx"] {
        let mut memo_off =
            ParseContext::with_config(input, "source", ContextConfig::new().with_memoize(false));

        assert_eq!(with_cache.parse(input), without_cache.parse(input), "{input}");
        assert_eq!(with_cache.run(&mut memo_off), without_cache.parse(input), "{input}");
    }
}

#[test]
fn test_backtracking_hits_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let word = re("[a-z]+")
        .unwrap()
        .on(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .cached();

    // Both alternatives start with the same word
    let rule = choice([
        seq([word.clone(), str("!")]),
        seq([word.clone(), str("?")]),
    ]);

    let mut ctx = ParseContext::new("hey?", "source");
    assert_eq!(rule.run(&mut ctx), Outcome::Value(arr(vec![s("hey"), s("?")])));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let (hits, misses, _) = ctx.memo().stats();
    assert_eq!((hits, misses), (1, 1));
}

#[test]
fn test_clear_memo_between_attempts() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let rule = str("x")
        .on(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .cached();

    let mut ctx = ParseContext::new("x", "source");
    rule.run(&mut ctx);
    ctx.seek(0);
    ctx.clear_memo();
    rule.run(&mut ctx);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Mapping and callbacks
// ============================================================================

#[test]
fn test_map() {
    let rule = re("\\w").unwrap().map(|v| match v {
        Value::String(t) => Value::String(t.repeat(2)),
        other => other,
    });
    assert_eq!(rule.parse("b"), Outcome::Value(s("bb")));
}

#[test]
fn test_on() {
    let seen = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&seen);
    let rule = str("x").on(move |v| {
        if let Some(t) = v.as_str() {
            *slot.lock().unwrap() = Some(format!("{t}v"));
        }
    });

    rule.parse("x");
    assert_eq!(seen.lock().unwrap().as_deref(), Some("xv"));
}

#[test]
fn test_on_not_called_on_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let rule = str("x").on(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(rule.parse("y").is_invalid());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Optional rules and sentinels
// ============================================================================

#[test]
fn test_maybe() {
    let rule = maybe(seq([str("v"), str("q")]));

    assert_eq!(rule.parse(""), Outcome::Skip);
    assert_eq!(rule.parse("vq"), Outcome::Value(arr(vec![s("v"), s("q")])));
}

#[test]
fn test_skip_is_not_an_empty_result() {
    let empty = re("a*").unwrap();
    let optional = maybe(str("a"));

    let matched_empty = empty.parse("");
    let skipped = optional.parse("");

    assert_eq!(matched_empty, Outcome::Value(s("")));
    assert_eq!(skipped, Outcome::Skip);
    assert_ne!(matched_empty, skipped);
    assert!(!matched_empty.is_skip());
}

#[test]
fn test_mapped_nil_is_not_invalid() {
    let rule = str("n").map(|_| Value::Nil);
    let out = rule.parse("n");
    assert_eq!(out, Outcome::Value(Value::Nil));
    assert!(!out.is_invalid());
}

// ============================================================================
// Strict parsing
// ============================================================================

#[test]
fn test_fail_label_in_diagnostic() {
    let rule = str("v").fail(["omg!"]);
    let err = rule.parse_strict("u").unwrap_err();

    assert!(err.to_string().contains("omg!"));
    assert_eq!(err.to_string(), "in source:1 at 1, expect token [ \"v\" | omg! ]\nu\n^");
}

#[test]
fn test_strict_success_passes_value_through() {
    let rule = maybe(str("v"));
    assert_eq!(rule.parse_strict(""), Ok(Outcome::Skip));
    assert_eq!(rule.parse_strict("v"), Ok(Outcome::Value(s("v"))));
}

#[test]
fn test_strict_reports_deepest_branch() {
    // key = value lines; the second line is missing its value
    let ident = re("[a-z]+").unwrap();
    let line = seq([
        ident.clone(),
        skip(str(" = ")),
        ident.clone().fail(["value"]),
        skip(str("\n")),
    ]);
    let file = seq([line.clone(), line.clone(), eof()]);

    let err = file
        .parse_strict_source("alpha = one\nbeta = \n", "conf.ini")
        .unwrap_err();

    assert_eq!(err.line(), 2);
    assert_eq!(err.col(), 8);
    assert_eq!(err.line_text(), "beta = ");
    assert_eq!(
        err.to_string(),
        "in conf.ini:2 at 8, expect token [ /[a-z]+/ | value ]\nbeta = \n       ^"
    );
}

#[test]
fn test_strict_choice_lists_all_expectations() {
    let rule = seq([str("let "), choice([str("x"), str("y"), re("[0-9]").unwrap()])]);
    let err = rule.parse_strict("let z").unwrap_err();

    assert_eq!(
        err.message(),
        r#"in source:1 at 5, expect token [ "x" | "y" | /[0-9]/ ]"#
    );
}

#[test]
fn test_strict_with_existing_context() {
    let rule = str("ab");
    let mut ctx = ParseContext::new("ac", "inline");

    let err = rule.parse_strict_with(&mut ctx).unwrap_err();
    assert!(err.message().starts_with("in inline:1 at 1"));

    ctx.reset();
    assert_eq!(ctx.furthest_failure(), (0, &[][..]));
}

#[test]
fn test_labeled_branch_with_cached_part_matches_uncached() {
    fn grammar(b: Rule) -> Rule {
        choice([
            seq([str("a"), b.clone()]).fail(["lbl"]),
            seq([str("a"), b]),
        ])
    }
    let expected = "in source:1 at 2, expect token [ \"b\" ]\nac\n ^";

    let plain = grammar(str("b")).parse_strict("ac").unwrap_err();
    assert_eq!(plain.to_string(), expected);

    let memo = grammar(cached(str("b"))).parse_strict("ac").unwrap_err();
    assert_eq!(memo.to_string(), expected);

    let config = ContextConfig::new().with_memoize(false);
    let mut ctx = ParseContext::with_config("ac", "source", config);
    let off = grammar(cached(str("b")))
        .parse_strict_with(&mut ctx)
        .unwrap_err();
    assert_eq!(off.to_string(), expected);
}

#[test]
fn test_labeled_rule_never_moves_failure_back() {
    let rule = seq([str("a"), str("b")]).fail(["lbl"]);
    let mut ctx = ParseContext::new("ac", "source");

    assert!(rule.run(&mut ctx).is_invalid());
    assert_eq!(ctx.furthest_failure().0, 1);
    assert_eq!(ctx.furthest_failure().1, ["\"b\""]);
}

// ============================================================================
// Recursion
// ============================================================================

#[test]
fn test_recursive_grammar() {
    // list = "[" (list ("," list)*)? "]" written with nesting only
    let list = lazy();
    let items = maybe(seq([list.clone(), maybe(seq([skip(str(",")), list.clone()]))]));
    list.define(seq([skip(str("[")), items, skip(str("]"))]).cached());

    assert_eq!(list.parse("[]"), Outcome::Value(arr(vec![])));
    assert_eq!(
        list.parse("[[]]"),
        Outcome::Value(arr(vec![arr(vec![arr(vec![])])]))
    );
    assert!(list.parse("[[],[[]]]").is_value());
    assert!(list.parse("[[]").is_invalid());
}
