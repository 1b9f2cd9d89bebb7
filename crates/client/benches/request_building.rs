use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use reqwest::StatusCode;
use serde_json::{Value, json};

use eventhub_client::http::{build_headers, build_url};
use eventhub_client::{Envelope, ErrorEnvelope, PageRequest, Query, TokenStore};

fn list_query(filters: usize) -> Query {
    let mut query = Query::new().page(PageRequest { page: Some(3), limit: Some(20) });
    for i in 0..filters {
        query = query.with(format!("f{i}"), format!("value {i} & more"));
    }
    query
}

fn bench_build_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_url");
    for filters in [0usize, 4, 16] {
        let query = list_query(filters);
        group.bench_with_input(BenchmarkId::from_parameter(filters), &query, |b, query| {
            b.iter(|| build_url(black_box("http://localhost:5000/api"), "/events", Some(query)))
        });
    }
    group.finish();
}

fn bench_build_headers(c: &mut Criterion) {
    let tokens = TokenStore::in_memory();
    let _ = tokens.set("Bearer eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1MSJ9.c2ln");

    c.bench_function("build_headers/auth+json", |b| {
        b.iter(|| build_headers(black_box(&tokens), true, true))
    });
    c.bench_function("build_headers/anonymous", |b| {
        b.iter(|| build_headers(black_box(&tokens), false, false))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let rows: Vec<Value> = (0..100)
        .map(|i| json!({ "uid": format!("evt_{i}"), "title": "Concert", "price": 0 }))
        .collect();
    let body = json!({
        "status": "success",
        "data": rows,
        "pagination": { "page": 1, "limit": 100, "total": 1000, "totalPages": 10 },
    });
    group.throughput(Throughput::Elements(100));
    group.bench_function("envelope_list", |b| {
        b.iter(|| Envelope::<Vec<Value>>::from_body(black_box(body.clone())))
    });

    let rejected = json!({ "errors": [{ "message": "title is required" }, { "msg": "date is invalid" }] });
    group.bench_function("error_envelope", |b| {
        b.iter(|| ErrorEnvelope::from_response(StatusCode::UNPROCESSABLE_ENTITY, black_box(&rejected)))
    });
    group.finish();
}

criterion_group!(benches, bench_build_url, bench_build_headers, bench_normalize);
criterion_main!(benches);
