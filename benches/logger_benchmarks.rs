//! Criterion benchmarks for rust_ordered_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_ordered_logger::core::template::{align, render, split_rhs};
use rust_ordered_logger::core::{IndexFormat, StackCapture};
use rust_ordered_logger::prelude::*;
use serde_json::json;

/// Capture returning a fixed stack, so resolution cost stays constant
struct FixedStack;

impl StackCapture for FixedStack {
    fn capture(&self) -> Option<String> {
        Some(
            "Error\n    at enqueue (src/core/logger.rs:140:21)\n    at info (src/core/logger.rs:86:17)\n    at bench::run (benches/logger_benchmarks.rs:20:5)"
                .to_string(),
        )
    }
}

fn memory_logger(format: &str) -> Logger {
    Logger::builder()
        .format(format)
        .level(LogLevel::Trace)
        .stack_capture(FixedStack)
        .transport(MemoryTransport::new())
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder_memory", |b| {
        b.iter(|| {
            let logger = Logger::builder()
                .transport(MemoryTransport::new())
                .build();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Throughput Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    // Templates without location placeholders skip stack capture
    let plain = memory_logger("{{index}} <{{title}}> {{message}}");
    group.bench_function("info_without_location", |b| {
        b.iter(|| {
            plain.info(black_box("Info message"));
        });
    });
    plain.flush().expect("Failed to flush");

    let located = memory_logger("{{index}} <{{title}}> {{message}}{{rhs}}{{file}}:{{line}}");
    group.bench_function("info_with_location", |b| {
        b.iter(|| {
            located.info(black_box("Info message"));
        });
    });
    located.flush().expect("Failed to flush");

    group.bench_function("info_round_trip", |b| {
        b.iter(|| {
            located.info(black_box("Info message"));
            located.flush().expect("Failed to flush");
        });
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = memory_logger("{{message}}");
    logger.set_level(LogLevel::Error);

    // Below the threshold; nothing is captured or queued
    group.bench_function("filtered_out", |b| {
        b.iter(|| {
            logger.debug(black_box("Debug message"));
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("template");

    let data = json!({
        "index": "001",
        "timestamp": "2024-01-01T00:00:00+0000",
        "title": "INFO",
        "message": "User logged in",
        "file": "./src/app.rs",
        "line": 30,
        "user": { "name": "alice" }
    });

    group.bench_function("render", |b| {
        b.iter(|| {
            render(
                black_box("{{index}} {{timestamp}} <{{title}}> {{message}} {{user.name}}"),
                black_box(&data),
            )
        });
    });

    group.bench_function("split_rhs", |b| {
        b.iter(|| split_rhs(black_box("{{index}} <{{title}}>{{rhs}}{{file}}:{{line}}")));
    });

    for width in [80usize, 180, 400] {
        group.bench_with_input(BenchmarkId::new("align", width), &width, |b, &width| {
            b.iter(|| align(black_box("001 <INFO> User logged in"), black_box("./src/app.rs:30"), width));
        });
    }

    let index_format: IndexFormat = "%06d".parse().expect("valid index format");
    group.bench_function("index_format", |b| {
        b.iter(|| index_format.format(black_box(4242)));
    });

    let timestamp = TimestampFormat::default();
    group.bench_function("timestamp_now", |b| {
        b.iter(|| timestamp.now());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_level_filtering,
    bench_template,
);

criterion_main!(benches);
