//! Memoization benchmarks
//!
//! An ambiguous arithmetic grammar where every alternative re-parses the same
//! prefix. With `cached` terms the prefix is parsed once per offset; without,
//! each alternative starts over.
//!
//! Run with: cargo bench --bench memo

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pegctx::prelude::*;

fn build_grammar(memoize: bool) -> Rule {
    let number = re("[0-9]+").expect("valid pattern");
    let expr = lazy();

    let atom = choice([number, seq([skip(str("(")), expr.clone(), skip(str(")"))])]);
    let atom = if memoize { atom.cached() } else { atom };

    // Every alternative starts with the same atom
    let body = choice([
        seq([atom.clone(), skip(str("+")), expr.clone()]),
        seq([atom.clone(), skip(str("-")), expr.clone()]),
        seq([atom.clone(), skip(str("*")), expr.clone()]),
        atom,
    ]);
    let body = if memoize { body.cached() } else { body };
    expr.define(body);
    expr
}

fn nested_input(depth: usize) -> String {
    let mut input = String::new();
    for i in 0..depth {
        input.push_str(&format!("{}*(", i));
    }
    input.push('0');
    for _ in 0..depth {
        input.push(')');
    }
    input
}

fn bench_memo(c: &mut Criterion) {
    let input = nested_input(8);
    let cached = build_grammar(true);
    let uncached = build_grammar(false);

    let mut group = c.benchmark_group("nested_expr");

    group.bench_function("cached", |b| {
        b.iter(|| {
            let mut ctx = ParseContext::new(black_box(input.as_str()), "bench");
            black_box(cached.run(&mut ctx))
        })
    });

    group.bench_function("uncached", |b| {
        b.iter(|| {
            let mut ctx = ParseContext::new(black_box(input.as_str()), "bench");
            black_box(uncached.run(&mut ctx))
        })
    });

    group.finish();
}

fn bench_diagnostics(c: &mut Criterion) {
    let line = "x".repeat(10_000);
    let input = format!("{}\n{}\n{}", line, line, line);
    let mut ctx = ParseContext::new(input, "bench");
    ctx.record_failure(15_000, ["token"]);

    c.bench_function("build_error_long_lines", |b| {
        b.iter(|| black_box(ctx.build_error("bench")))
    });
}

criterion_group!(benches, bench_memo, bench_diagnostics);
criterion_main!(benches);
