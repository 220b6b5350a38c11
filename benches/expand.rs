use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ugen::{decode_entities, rule_ref, strings, wrap_entity, Grammar, GrammarBuilder};

/// A flight-booking grammar with `n` cities and a handful of optional parts.
fn build_grammar(n: usize) -> Grammar {
    let cities: Vec<String> = (0..n).map(|i| format!("city{i}")).collect();
    GrammarBuilder::new()
        .entity("CITY", strings(cities))
        .rule("polite", strings(["please", "could you"]))
        .rule("verb", strings(["book", "find", "get me"]))
        .intent(
            "BookFlight",
            rule_ref("polite")
                .optional()
                .then(rule_ref("verb"))
                .then(strings(["a flight"]))
                .then(strings(["from"]))
                .then(rule_ref("CITY"))
                .then(strings(["to"]))
                .then(rule_ref("CITY"))
                .then(strings(["today", "tomorrow"]).optional()),
        )
        .build()
}

fn dsl_source(n: usize) -> String {
    let mut src = String::from("verb: [book, find, get me];\n");
    for i in 0..n {
        src.push_str(&format!("entity E{i}: [a{i}, b{i}];\n"));
        src.push_str(&format!("intent I{i}: verb, ([with], E{i})?;\n"));
    }
    src
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for &n in &[5, 20, 50] {
        let grammar = build_grammar(n);
        group.bench_function(&format!("{n}_cities"), |b| {
            b.iter(|| black_box(&grammar).generate(()).unwrap());
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for &n in &[10, 100] {
        let src = dsl_source(n);
        group.bench_function(&format!("{n}_intents"), |b| {
            b.iter(|| Grammar::from_dsl(black_box(&src)).unwrap());
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let flat = format!(
        "book a flight from {} to {} tomorrow",
        wrap_entity("CITY", "Prague"),
        wrap_entity("CITY", "Brno")
    );
    group.bench_function("two_spans", |b| {
        b.iter(|| decode_entities(black_box(&flat)).unwrap());
    });

    let mut nested = String::from("x");
    for depth in 0..8 {
        nested = wrap_entity(&format!("L{depth}"), &format!("a {nested} b"));
    }
    group.bench_function("nested_8", |b| {
        b.iter(|| decode_entities(black_box(&nested)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_parse, bench_decode);
criterion_main!(benches);
