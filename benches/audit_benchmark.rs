//! Benchmarks for contract parsing and the audit pass.
//!
//! Run with: cargo bench --bench audit_benchmark
//!
//! The transport answers instantly, so these measure classification,
//! aggregation and pool overhead rather than network latency.

use api_qi::audit::{AuditEngine, ProbeTransport};
use api_qi::error::TransportError;
use api_qi::model::{Contract, HttpMethod};
use api_qi::parse_contract_str;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::fmt::Write as _;
use std::hint::black_box;

struct Instant;

impl ProbeTransport for Instant {
    fn send(&self, method: HttpMethod, _: &str) -> Result<u16, TransportError> {
        Ok(if method == HttpMethod::Get { 200 } else { 401 })
    }
}

/// Generate a YAML contract with `count` resources, each with a collection
/// and an item path.
fn generate_contract_yaml(count: usize) -> String {
    let mut doc = String::from("openapi: 3.0.3\ninfo: {title: Bench, version: '1'}\npaths:\n");
    for i in 0..count {
        let _ = write!(
            doc,
            "  /r{i}:\n    get: {{responses: {{'200': {{}}}}}}\n    post: {{responses: {{'201': {{}}, '401': {{}}}}}}\n  /r{i}/{{id}}:\n    delete: {{responses: {{'204': {{}}, '403': {{}}}}}}\n"
        );
    }
    doc
}

fn generate_contract(count: usize) -> Contract {
    let mut contract = Contract::new();
    for i in 0..count {
        let collection = format!("/r{i}");
        let item = format!("/r{i}/{{id}}");
        contract = contract
            .with_endpoint(&collection, HttpMethod::Get, &["200"])
            .with_endpoint(&collection, HttpMethod::Post, &["201", "401"])
            .with_endpoint(&item, HttpMethod::Delete, &["204", "403"]);
    }
    contract
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_contract");
    for size in [10, 100, 1000] {
        let yaml = generate_contract_yaml(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &yaml, |b, yaml| {
            b.iter(|| black_box(parse_contract_str(yaml)));
        });
    }
    group.finish();
}

fn bench_audit_pass(c: &mut Criterion) {
    let contract = generate_contract(1000);
    let mut group = c.benchmark_group("audit_pass");
    for concurrency in [1, 4] {
        let engine = AuditEngine::new(Box::new(Instant), "http://bench")
            .with_concurrency(concurrency);
        group.bench_with_input(
            BenchmarkId::from_parameter(concurrency),
            &contract,
            |b, contract| {
                b.iter(|| black_box(engine.run(contract)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_audit_pass);
criterion_main!(benches);
