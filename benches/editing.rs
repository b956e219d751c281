//! Benchmarks for piece-table edits.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use piecebuf::{Buffer, BufferOptions, LineIndexMode, PieceTable};

fn sample_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i}: the quick brown fox jumps over the lazy dog\n"))
        .collect()
}

fn bench_typing(c: &mut Criterion) {
    let text = sample_text(10_000);
    let middle = text.chars().count() / 2;
    c.bench_function("type_1000_chars_mid_document", |b| {
        b.iter(|| {
            let mut table = PieceTable::new(&text);
            for i in 0..1000 {
                table.insert(black_box("x"), middle + i).unwrap();
            }
            table
        })
    });
}

fn bench_scattered_edits(c: &mut Criterion) {
    let text = sample_text(10_000);
    let len = text.chars().count();
    for (name, mode) in [
        ("scattered_edits_incremental", LineIndexMode::Incremental),
        ("scattered_edits_rebuild", LineIndexMode::Rebuild),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut buf = Buffer::with_options(&text, BufferOptions { line_index: mode });
                for i in 0..200 {
                    let at = (i * 7919) % (len - 10);
                    buf.insert(black_box("ab\ncd"), at).unwrap();
                    buf.delete(at + 1, 3).unwrap();
                }
                buf
            })
        });
    }
}

criterion_group!(benches, bench_typing, bench_scattered_edits);
criterion_main!(benches);
