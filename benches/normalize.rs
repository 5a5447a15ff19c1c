use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lizzy_review::providers::mock::fixture;
use lizzy_review::{normalize_value, ResultsView};
use serde_json::json;

fn bench_normalize(c: &mut Criterion) {
    let current = fixture().clone();
    let legacy = json!({"candidateName": "Ada", "role": "Engineer", "final_score": 78});

    c.bench_function("normalize_current_fixture", |b| {
        b.iter(|| normalize_value(black_box(&current)))
    });
    c.bench_function("normalize_legacy", |b| {
        b.iter(|| normalize_value(black_box(&legacy)))
    });
    c.bench_function("results_view_from_fixture", |b| {
        b.iter(|| ResultsView::from_result(normalize_value(black_box(&current))))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
