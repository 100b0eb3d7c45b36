//! Decode/encode throughput for representative payloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use integrations_watson::fixtures;
use integrations_watson::{decode, AnalysisResults, Model, QueryAggregation, QueryResponse, QueryResult};

fn bench_decode(c: &mut Criterion) {
    let response = fixtures::sample_query_response();
    let result = fixtures::sample_query_result();
    let analysis = fixtures::sample_analysis_results();
    let nested = fixtures::nested_aggregation(16);

    let mut group = c.benchmark_group("decode");
    group.bench_function("query_response", |b| {
        b.iter(|| decode::<QueryResponse>(black_box(response.clone())))
    });
    group.bench_function("query_result_open", |b| {
        b.iter(|| decode::<QueryResult>(black_box(result.clone())))
    });
    group.bench_function("analysis_results", |b| {
        b.iter(|| decode::<AnalysisResults>(black_box(analysis.clone())))
    });
    group.bench_function("nested_aggregation_16", |b| {
        b.iter(|| decode::<QueryAggregation>(black_box(nested.clone())))
    });
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let Ok(response) = decode::<QueryResponse>(fixtures::sample_query_response()) else {
        return;
    };

    c.bench_function("encode/query_response", |b| {
        b.iter(|| black_box(&response).to_value())
    });
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
