//! Benchmarks for minipress codec throughput.
//!
//! Measures encode and decode speed of each codec across data patterns and sizes.

use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use minipress::{benchmark_files, compress, decompress, Algorithm, BenchConfig};

/// Generate random (incompressible) data
fn generate_random_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push((hasher.finish() & 0xFF) as u8);
    }
    data
}

/// Generate repetitive (highly compressible) data
fn generate_repetitive_data(size: usize) -> Vec<u8> {
    let pattern = b"ABCDABCDABCDABCD";
    pattern.iter().cycle().take(size).copied().collect()
}

/// Generate English-like text with recurring words
fn generate_text_data(size: usize) -> Vec<u8> {
    let words: [&[u8]; 8] =
        [b"the ", b"quick ", b"brown ", b"fox ", b"jumps ", b"over ", b"lazy ", b"dog. "];
    let mut data = Vec::with_capacity(size);
    let mut i = 0usize;
    while data.len() < size {
        data.extend_from_slice(words[(i * 7 + i / 3) % words.len()]);
        i += 1;
    }
    data.truncate(size);
    data
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1024, 64 * 1024, 256 * 1024].iter() {
        let data = generate_text_data(*size);
        group.throughput(Throughput::Bytes(*size as u64));

        for algorithm in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), size), &data, |b, data| {
                b.iter(|| compress(algorithm, data).unwrap());
            });
        }
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let size = 256 * 1024;
    let data = generate_text_data(size);

    group.throughput(Throughput::Bytes(size as u64));

    for algorithm in Algorithm::ALL {
        let compressed = compress(algorithm, &data).unwrap();
        group.bench_with_input(
            BenchmarkId::new(algorithm.name(), size),
            &compressed,
            |b, compressed| {
                b.iter(|| decompress(algorithm, compressed).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_data_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_patterns");
    let size = 64 * 1024;

    let patterns = [
        ("random", generate_random_data(size)),
        ("repetitive", generate_repetitive_data(size)),
        ("text", generate_text_data(size)),
    ];

    group.throughput(Throughput::Bytes(size as u64));

    for (name, data) in patterns.iter() {
        for algorithm in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), name), data, |b, data| {
                b.iter(|| {
                    let compressed = compress(algorithm, data).unwrap();
                    decompress(algorithm, &compressed).unwrap()
                });
            });
        }
    }

    group.finish();
}

fn bench_parallel_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_files");

    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (0..8)
        .map(|i| {
            let path = dir.path().join(format!("input_{}.txt", i));
            std::fs::write(&path, generate_text_data(128 * 1024)).unwrap();
            path
        })
        .collect();

    group.throughput(Throughput::Bytes(8 * 128 * 1024));

    for threads in [1, 2, 4].iter() {
        group.bench_with_input(BenchmarkId::new("threads", threads), &paths, |b, paths| {
            let config = BenchConfig { threads: *threads };
            b.iter(|| benchmark_files(paths, &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_data_patterns, bench_parallel_files);
criterion_main!(benches);
