use criterion::{criterion_group, criterion_main, Criterion};
use tome_core::{build, rank, Analyzer, AnalyzerConfig, Document, IndexConfig};

const DESCRIPTION: &str = "Call me Ishmael. Some years ago, never mind how long precisely, \
    having little or no money in my purse, and nothing particular to interest me on shore, \
    I thought I would sail about a little and see the watery part of the world.";

fn sample_catalog() -> Vec<Document> {
    let topics = [
        "whale voyage sea harpoon captain",
        "garden seasons planting harvest soil",
        "wealth fortune society parties summer",
        "orphan expectations london marshes convict",
        "war peace winter campaign letters",
    ];
    (0..200)
        .map(|i| {
            let topic = topics[i % topics.len()];
            Document::new(
                i as u32,
                format!("Book {i}"),
                format!("Author {}", i % 17),
                format!("{topic} {DESCRIPTION}"),
            )
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    c.bench_function("analyze_description", |b| {
        b.iter(|| analyzer.analyze(DESCRIPTION))
    });
}

fn bench_build(c: &mut Criterion) {
    let config = IndexConfig::default();
    c.bench_function("build_200_docs", |b| {
        b.iter(|| build(sample_catalog(), &config).unwrap())
    });
}

fn bench_rank(c: &mut Criterion) {
    let config = IndexConfig::default();
    let index = build(sample_catalog(), &config).unwrap().index;
    let analyzer = Analyzer::new(&config.analyzer);
    c.bench_function("rank_two_terms", |b| {
        b.iter(|| rank(&index, &analyzer, &config, "whale voyage", Some(10)))
    });
}

criterion_group!(benches, bench_analyze, bench_build, bench_rank);
criterion_main!(benches);
