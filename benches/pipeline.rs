//! Benchmarks for the deck pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use deck::compile::{compile_source, CompileOptions};
use deck::escape;
use deck::parser;
use deck::DirectiveRegistry;

/// A deck with a spread of directive kinds, repeated to a realistic size.
fn deck_source(slides: usize) -> String {
    let mut source = String::from(".meta{title=Benchmark Deck;theme=dark}\n");
    for i in 0..slides {
        source.push_str(&format!(
            ".slide{{\
             .title{{Slide {i}}}\
             .body{{\
             .h2{{Section {i}}}\
             Some text with .bf{{bold}} and .em{{emphasis}} inline.\
             .o{{first point}}.o{{second point}}.o{{third point}}\
             .code{{inline()}}\
             }}\
             }}\n"
        ));
    }
    source
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let registry = DirectiveRegistry::new();

    let small = ".slide{.title{Hi}.body{.o{A}.o{B}}}";
    let large = deck_source(50);

    group.bench_function("parse_small", |b| {
        b.iter(|| {
            let (protected, _) = escape::protect(black_box(small));
            parser::parse(&protected, &registry).unwrap()
        })
    });

    group.bench_function("parse_50_slides", |b| {
        b.iter(|| {
            let (protected, _) = escape::protect(black_box(&large));
            parser::parse(&protected, &registry).unwrap()
        })
    });

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");
    let registry = DirectiveRegistry::new();
    let options = CompileOptions::default();

    let small = ".slide{.title{Hi}.body{.o{A}.o{B}}}";
    let large = deck_source(50);
    let escaped = ".slide{.typewriter{\\> run \\.bf\\{this\\} now}}";

    group.bench_function("compile_small", |b| {
        b.iter(|| compile_source(black_box(small), &registry, &options).unwrap())
    });

    group.bench_function("compile_50_slides", |b| {
        b.iter(|| compile_source(black_box(&large), &registry, &options).unwrap())
    });

    group.bench_function("compile_escaped", |b| {
        b.iter(|| compile_source(black_box(escaped), &registry, &options).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_compilation);
criterion_main!(benches);
