//! Benchmarks for table construction and decoding.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hayro_jbig2_huffman::{HuffmanDecoder, HuffmanTable, StandardTable};

fn stream(len: usize) -> Vec<u8> {
    // A simple LCG keeps the input deterministic.
    let mut state = 0x1234_5678_u32;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

fn decode_many(table: &HuffmanTable, data: &[u8], count: usize) -> i64 {
    let mut decoder = HuffmanDecoder::new(data);
    let mut sum = 0_i64;

    for _ in 0..count {
        if let Some(v) = decoder.decode(table).value() {
            sum += v as i64;
        }
    }

    sum
}

fn bench_decode(c: &mut Criterion) {
    let data = stream(64 * 1024);

    let mut group = c.benchmark_group("decode");
    for table in [StandardTable::A, StandardTable::B, StandardTable::H, StandardTable::O] {
        // Build the table outside of the measurement.
        let built = table.table();

        group.bench_function(format!("{table:?}"), |b| {
            b.iter(|| decode_many(built, black_box(&data), 10_000));
        });
    }
    group.finish();

    c.bench_function("build/table_h", |b| {
        b.iter(|| HuffmanTable::build(black_box(StandardTable::H.lines())));
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
