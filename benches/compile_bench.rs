// Compile performance benchmarks for gxtmaker

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gxtmaker::writer::encode_table;
use gxtmaker::{compile_bytes, Options};
use rand::Rng;
use std::hint::black_box;

fn generate_source(entries: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    let mut src = Vec::new();

    for i in 0..entries {
        let words: usize = rng.random_range(1..12);
        src.extend_from_slice(format!("[K{:05}]", i).as_bytes());
        for w in 0..words {
            let len: usize = rng.random_range(2..9);
            let word: String = (0..len).map(|_| rng.random_range(b'a'..=b'z') as char).collect();
            src.extend_from_slice(word.as_bytes());
            if w + 1 < words {
                src.push(b' ');
            }
        }
        if rng.random_bool(0.1) {
            src.extend_from_slice(b"{ translator note }");
        }
        src.extend_from_slice(b"\r\n");
    }

    src
}

fn benchmark_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for size in [100, 1000, 10000].iter() {
        let src = generate_source(*size);
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &src, |b, src| {
            b.iter(|| {
                let table = compile_bytes(black_box(src), &Options::default()).unwrap();
                black_box(table);
            });
        });
    }

    group.finish();
}

fn benchmark_chunk_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_size");
    let src = generate_source(5000);
    group.throughput(Throughput::Bytes(src.len() as u64));

    for chunk_size in [64, 1024, 16 * 1024].iter() {
        let options = Options::default().chunk_size(*chunk_size);
        group.bench_with_input(BenchmarkId::from_parameter(chunk_size), &options, |b, options| {
            b.iter(|| black_box(compile_bytes(&src, options).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let table = compile_bytes(&generate_source(10000), &Options::default()).unwrap();

    c.bench_function("encode_table", |b| {
        b.iter(|| black_box(encode_table(black_box(&table)).unwrap()));
    });
}

criterion_group!(benches, benchmark_compile, benchmark_chunk_size, benchmark_encode);
criterion_main!(benches);
