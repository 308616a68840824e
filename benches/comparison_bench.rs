//! Comparison benchmarks between BSER and other serialization libraries
//!
//! Run with: cargo bench comparison_bench

use bser::{from_slice, to_vec, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};

// Test data structure: one row of a watchman query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FileRecord {
    name: String,
    size: i64,
    exists: bool,
    mtime_ms: f64,
    symlink_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, borsh::BorshSerialize, borsh::BorshDeserialize)]
struct FileRecordBorsh {
    name: String,
    size: i64,
    exists: bool,
    mtime_ms: f64,
    symlink_target: Option<String>,
}

impl FileRecord {
    fn new_minimal() -> Self {
        Self {
            name: "a".to_string(),
            size: 0,
            exists: true,
            mtime_ms: 0.0,
            symlink_target: None,
        }
    }

    fn new_full() -> Self {
        Self {
            name: "src/deeply/nested/module/file_name.rs".to_string(),
            size: 1_234_567,
            exists: true,
            mtime_ms: 1_700_000_000_123.0,
            symlink_target: Some("../../shared/file_name.rs".to_string()),
        }
    }
}

impl From<&FileRecord> for FileRecordBorsh {
    fn from(record: &FileRecord) -> Self {
        Self {
            name: record.name.clone(),
            size: record.size,
            exists: record.exists,
            mtime_ms: record.mtime_ms,
            symlink_target: record.symlink_target.clone(),
        }
    }
}

// BSER encoding/decoding helpers
fn bser_encode(record: &FileRecord) -> Vec<u8> {
    let mut fields = vec![
        ("name", Value::from(record.name.as_str())),
        ("size", Value::Integer(record.size)),
        ("exists", Value::Bool(record.exists)),
        ("mtime_ms", Value::Double(record.mtime_ms)),
    ];
    if let Some(target) = &record.symlink_target {
        fields.push(("symlink_target", Value::from(target.as_str())));
    }
    to_vec(&fields.into_iter().collect::<Value>()).unwrap()
}

fn bser_decode(buf: &[u8]) -> FileRecord {
    let value = from_slice(buf).unwrap();
    let text = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_bytes)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    };
    FileRecord {
        name: text("name").unwrap_or_default(),
        size: value.get("size").and_then(Value::as_i64).unwrap_or_default(),
        exists: value.get("exists").and_then(Value::as_bool).unwrap_or_default(),
        mtime_ms: value.get("mtime_ms").and_then(Value::as_f64).unwrap_or_default(),
        symlink_target: text("symlink_target"),
    }
}

fn bench_encoding_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding_comparison");

    let test_cases = [
        ("minimal", FileRecord::new_minimal()),
        ("full", FileRecord::new_full()),
    ];

    for (name, record) in &test_cases {
        group.bench_with_input(BenchmarkId::new("bser", name), record, |b, record| {
            b.iter(|| black_box(bser_encode(black_box(record))));
        });

        group.bench_with_input(BenchmarkId::new("bincode", name), record, |b, record| {
            b.iter(|| black_box(bincode::serialize(black_box(record)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("messagepack", name), record, |b, record| {
            b.iter(|| black_box(rmp_serde::to_vec(black_box(record)).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("postcard", name), record, |b, record| {
            b.iter(|| black_box(postcard::to_allocvec(black_box(record)).unwrap()));
        });

        let record_borsh: FileRecordBorsh = record.into();
        group.bench_with_input(
            BenchmarkId::new("borsh", name),
            &record_borsh,
            |b, record| {
                b.iter(|| black_box(borsh::to_vec(black_box(record)).unwrap()));
            },
        );

        group.bench_with_input(BenchmarkId::new("json", name), record, |b, record| {
            b.iter(|| black_box(serde_json::to_vec(black_box(record)).unwrap()));
        });
    }

    group.finish();
}

fn bench_decoding_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding_comparison");

    let test_cases = [
        ("minimal", FileRecord::new_minimal()),
        ("full", FileRecord::new_full()),
    ];

    for (name, record) in &test_cases {
        let bser_data = bser_encode(record);
        let bincode_data = bincode::serialize(record).unwrap();
        let messagepack_data = rmp_serde::to_vec(record).unwrap();
        let postcard_data = postcard::to_allocvec(record).unwrap();
        let record_borsh: FileRecordBorsh = record.into();
        let borsh_data = borsh::to_vec(&record_borsh).unwrap();
        let json_data = serde_json::to_vec(record).unwrap();

        group.bench_with_input(BenchmarkId::new("bser", name), &bser_data, |b, data| {
            b.iter(|| black_box(bser_decode(black_box(data))));
        });

        group.bench_with_input(BenchmarkId::new("bincode", name), &bincode_data, |b, data| {
            b.iter(|| {
                let decoded: FileRecord = bincode::deserialize(black_box(data)).unwrap();
                black_box(decoded);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("messagepack", name),
            &messagepack_data,
            |b, data| {
                b.iter(|| {
                    let decoded: FileRecord = rmp_serde::from_slice(black_box(data)).unwrap();
                    black_box(decoded);
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("postcard", name), &postcard_data, |b, data| {
            b.iter(|| {
                let decoded: FileRecord = postcard::from_bytes(black_box(data)).unwrap();
                black_box(decoded);
            });
        });

        group.bench_with_input(BenchmarkId::new("borsh", name), &borsh_data, |b, data| {
            b.iter(|| {
                let decoded: FileRecordBorsh =
                    <FileRecordBorsh as borsh::BorshDeserialize>::try_from_slice(black_box(data))
                        .unwrap();
                black_box(decoded);
            });
        });

        group.bench_with_input(BenchmarkId::new("json", name), &json_data, |b, data| {
            b.iter(|| {
                let decoded: FileRecord = serde_json::from_slice(black_box(data)).unwrap();
                black_box(decoded);
            });
        });
    }

    group.finish();
}

fn bench_size_comparison(c: &mut Criterion) {
    println!("\n=== SERIALIZED SIZE COMPARISON ===");

    for (name, record) in [
        ("minimal", FileRecord::new_minimal()),
        ("full", FileRecord::new_full()),
    ] {
        println!("\n{} record:", name);
        println!("  BSER:        {} bytes", bser_encode(&record).len());
        println!(
            "  Bincode:     {} bytes",
            bincode::serialize(&record).unwrap().len()
        );
        println!(
            "  MessagePack: {} bytes",
            rmp_serde::to_vec(&record).unwrap().len()
        );
        println!(
            "  Postcard:    {} bytes",
            postcard::to_allocvec(&record).unwrap().len()
        );
        let record_borsh: FileRecordBorsh = (&record).into();
        println!(
            "  Borsh:       {} bytes",
            borsh::to_vec(&record_borsh).unwrap().len()
        );
        println!(
            "  JSON:        {} bytes",
            serde_json::to_vec(&record).unwrap().len()
        );
    }

    // Dummy benchmark just to include in the suite
    c.bench_function("size_comparison_dummy", |b| {
        b.iter(|| {
            black_box(42);
        });
    });
}

criterion_group!(
    benches,
    bench_encoding_comparison,
    bench_decoding_comparison,
    bench_size_comparison
);
criterion_main!(benches);
