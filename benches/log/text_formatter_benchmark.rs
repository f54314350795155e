use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use utilx::log::{LogFormatter, LogLevel, LogRecord, TextFormatter, TextFormatterConfig};

fn benchmark_formatter(c: &mut Criterion) {
    let formatter_plain = TextFormatter::new(TextFormatterConfig { colored: false });
    let formatter_colored = TextFormatter::new(TextFormatterConfig { colored: true });

    let basic_record = LogRecord::new(LogLevel::Info, "This is a test message".to_string());

    let record_with_location = LogRecord::new(LogLevel::Error, "Error occurred".to_string())
        .with_location("src/module.rs".to_string(), 42);

    let record_with_metadata = LogRecord::new(LogLevel::Info, "user logged in".to_string())
        .with_metadata("user_id", 12345)
        .with_metadata("username", "alice")
        .with_metadata("success", true);

    let long_message = "A".repeat(1000);
    let record_with_long_message = LogRecord::new(LogLevel::Warn, long_message);

    let mut group = c.benchmark_group("text_formatter");

    let cases: [(&str, &LogRecord); 4] = [
        ("basic", &basic_record),
        ("with_location", &record_with_location),
        ("with_metadata", &record_with_metadata),
        ("with_long_message", &record_with_long_message),
    ];

    for (name, record) in cases {
        group.bench_with_input(
            BenchmarkId::new("plain", name),
            record,
            |b, record: &LogRecord| {
                b.iter(|| black_box(formatter_plain.format(black_box(record)).unwrap()))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("colored", name),
            record,
            |b, record: &LogRecord| {
                b.iter(|| black_box(formatter_colored.format(black_box(record)).unwrap()))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_formatter);
criterion_main!(benches);
