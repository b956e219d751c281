//! Benchmarks for line/column lookups.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use piecebuf::Buffer;

fn bench_position_lookup(c: &mut Criterion) {
    let text: String = (0..50_000).map(|i| format!("{i:>8} some text\n")).collect();
    let buf = Buffer::new(&text);
    let len = buf.len();
    c.bench_function("position_lookup", |b| {
        let mut pos = 0;
        b.iter(|| {
            pos = (pos + 104_729) % len;
            buf.position(black_box(pos)).unwrap()
        })
    });
}

fn bench_line_text(c: &mut Criterion) {
    let text: String = (0..50_000).map(|i| format!("{i:>8} some text\n")).collect();
    let buf = Buffer::new(&text);
    c.bench_function("line_text", |b| {
        b.iter(|| buf.line_text(black_box(25_000)).unwrap())
    });
}

criterion_group!(benches, bench_position_lookup, bench_line_text);
criterion_main!(benches);
