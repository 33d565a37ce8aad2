use criterion::{criterion_group, criterion_main, Criterion};
use findex_core::Analyzer;

const PARAGRAPH: &str = "The glaciers of the European Alps have been retreating \
since the end of the Little Ice Age, and the retreat accelerated sharply after \
1980. Long-term monitoring programmes record changes in length, area and mass \
balance for several hundred glaciers every year.";

fn bench_analyze(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let text = PARAGRAPH.repeat(64);
    c.bench_function("analyze_prose", |b| b.iter(|| analyzer.analyze(&text)));
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
