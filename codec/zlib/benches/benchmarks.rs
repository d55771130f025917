use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn content(len: usize) -> Vec<u8> {
    b"0.5 0 0 0.5 72 720 cm /Im1 Do q 1 0 0 RG 10 10 m 200 200 l S Q\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn adler32_benchmark(c: &mut Criterion) {
    let data = content(1 << 20);
    c.bench_function("adler32 1MiB", |b| b.iter(|| aw_zlib::adler32(black_box(&data))));
}

fn compress_benchmark(c: &mut Criterion) {
    let data = content(64 * 1024);
    c.bench_function("compress 64KiB", |b| {
        b.iter(|| aw_zlib::compress(black_box(data.clone())).unwrap())
    });
}

criterion_group!(benches, adler32_benchmark, compress_benchmark);
criterion_main!(benches);
