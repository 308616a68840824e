//! Criterion benchmarks for bser
//!
//! Run with: cargo bench

use bser::{from_slice, tag, to_pdu, to_vec, Encoder, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn file_record(i: usize) -> Value {
    vec![
        ("name", Value::from(format!("src/module_{}/mod.rs", i))),
        ("size", Value::Integer(1024 + i as i64)),
        ("exists", Value::Bool(i % 5 != 0)),
        ("mtime_ms", Value::Double(1_700_000_000_000.0 + i as f64)),
    ]
    .into_iter()
    .collect()
}

fn query_response(files: usize) -> Value {
    vec![
        ("version", Value::from("2024.01.01.00")),
        ("clock", Value::from("c:1700000000:1234:1:42")),
        ("is_fresh_instance", Value::Bool(false)),
        ("files", Value::Array((0..files).map(file_record).collect())),
    ]
    .into_iter()
    .collect()
}

/// The same rows as `query_response(files)["files"]`, as a templated array
fn templated_files(files: usize) -> Vec<u8> {
    let mut encoder = Encoder::new();
    encoder.put_u8(tag::TEMPLATE);
    encoder.put_u8(tag::ARRAY);
    encoder.put_int(4);
    for field in ["name", "size", "exists", "mtime_ms"] {
        encoder.put_string(field.as_bytes()).unwrap();
    }
    encoder.put_int(files as i64);
    for i in 0..files {
        encoder.put_string(format!("src/module_{}/mod.rs", i).as_bytes()).unwrap();
        encoder.put_int(1024 + i as i64);
        encoder.put_u8(if i % 5 != 0 { tag::TRUE } else { tag::FALSE });
        encoder.put_f64(1_700_000_000_000.0 + i as f64);
    }
    encoder.into_inner()
}

fn bench_encode(c: &mut Criterion) {
    let small = file_record(1);
    let large = query_response(1000);

    c.bench_function("encode_file_record", |b| {
        b.iter(|| {
            let encoded = to_vec(black_box(&small)).unwrap();
            black_box(encoded);
        });
    });

    c.bench_function("encode_pdu_query_response_1000", |b| {
        b.iter(|| {
            let encoded = to_pdu(black_box(&large)).unwrap();
            black_box(encoded);
        });
    });

    c.bench_function("encode_reused_encoder", |b| {
        let mut encoder = Encoder::new();
        b.iter(|| {
            encoder.reset();
            encoder.begin_pdu();
            encoder.encode(black_box(&small)).unwrap();
            black_box(encoder.finish_pdu().unwrap());
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let small = to_vec(&file_record(1)).unwrap();
    let large = to_vec(&query_response(1000)).unwrap();

    c.bench_function("decode_file_record", |b| {
        b.iter(|| {
            let decoded = from_slice(black_box(&small)).unwrap();
            black_box(decoded);
        });
    });

    c.bench_function("decode_query_response_1000", |b| {
        b.iter(|| {
            let decoded = from_slice(black_box(&large)).unwrap();
            black_box(decoded);
        });
    });
}

fn bench_template_vs_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_vs_plain");

    for rows in [10usize, 100, 1000] {
        let plain = to_vec(&Value::Array((0..rows).map(file_record).collect())).unwrap();
        let templated = templated_files(rows);

        group.bench_with_input(BenchmarkId::new("plain", rows), &plain, |b, data| {
            b.iter(|| black_box(from_slice(black_box(data)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("templated", rows), &templated, |b, data| {
            b.iter(|| black_box(from_slice(black_box(data)).unwrap()));
        });
    }

    group.finish();
}

fn bench_variable_string_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("variable_sizes");

    for len in [1usize, 16, 255, 4096, 65536] {
        let value = Value::String(vec![b'x'; len]);
        group.bench_with_input(BenchmarkId::new("string_roundtrip", len), &value, |b, v| {
            b.iter(|| {
                let encoded = to_vec(black_box(v)).unwrap();
                black_box(from_slice(&encoded).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_template_vs_plain,
    bench_variable_string_sizes
);
criterion_main!(benches);
