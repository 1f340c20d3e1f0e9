use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sqlmimic::{ResponseRegistry, Value};

fn registry_with_rules(count: usize) -> ResponseRegistry {
    let mut registry = ResponseRegistry::new();
    for i in 0..count {
        registry
            .new_rule()
            .with_query(format!("SELECT * FROM table_{i}"))
            .with_args([Value::Int(i as i64)])
            .with_rows_num(1);
    }
    registry
}

fn bench_first_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_match");
    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut registry = registry_with_rules(count);
            // Worst case: only the last rule matches.
            let query = format!("SELECT * FROM table_{}", count - 1);
            let args = [Value::Int((count - 1) as i64)];
            b.iter(|| {
                let rule = registry.find_response(black_box(&query), black_box(&args));
                black_box(rule.rows_affected)
            });
        });
    }
    group.finish();
}

fn bench_unmatched_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("unmatched_scan");
    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut registry = registry_with_rules(count);
            b.iter(|| {
                let rule = registry.find_response(black_box("SELECT * FROM missing"), &[]);
                black_box(rule.payload.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_first_match, bench_unmatched_scan);
criterion_main!(benches);
