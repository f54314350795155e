use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use utilx::log::{
    LogFilter, LogLevel, LogRecord, SqlParams, SqlSanitizer, SqlSanitizerConfig, SqlValue,
};

fn record_with_statement(statement: &str, params: Option<SqlParams>) -> LogRecord {
    let mut record = LogRecord::new(LogLevel::Debug, String::new()).with_statement(statement);
    if let Some(params) = params {
        record = record.with_parameters(params);
    }
    record
}

fn benchmark_sanitizer(c: &mut Criterion) {
    let plain = SqlSanitizer::new(SqlSanitizerConfig {
        pretty_print: false,
        ..Default::default()
    })
    .unwrap();
    let pretty = SqlSanitizer::new(SqlSanitizerConfig {
        pretty_print: true,
        ..Default::default()
    })
    .unwrap();
    let truncating = SqlSanitizer::new(SqlSanitizerConfig {
        max_message_length: 64,
        ..Default::default()
    })
    .unwrap();

    let short_statement = "select * from users where id = $1";
    let long_statement = format!(
        "select id, name, email, created_at from audit_events where actor = $1 and payload = '{}' order by created_at desc limit 100",
        "x".repeat(2000)
    );
    let params = SqlParams::positional(vec![SqlValue::Int(42)]);

    let mut group = c.benchmark_group("sql_sanitizer");

    let cases: [(&str, &SqlSanitizer); 3] = [
        ("plain", &plain),
        ("pretty", &pretty),
        ("truncating", &truncating),
    ];

    for (name, sanitizer) in cases {
        group.bench_with_input(
            BenchmarkId::new("short_with_params", name),
            sanitizer,
            |b, sanitizer| {
                b.iter(|| {
                    let mut record = record_with_statement(
                        black_box(short_statement),
                        Some(params.clone()),
                    );
                    black_box(sanitizer.filter(&mut record).unwrap());
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("long_statement", name),
            sanitizer,
            |b, sanitizer| {
                b.iter(|| {
                    let mut record = record_with_statement(
                        black_box(long_statement.as_str()),
                        Some(params.clone()),
                    );
                    black_box(sanitizer.filter(&mut record).unwrap());
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_sanitizer);
criterion_main!(benches);
