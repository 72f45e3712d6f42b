//! Benchmarks for token issuance and validation

// criterion_group! generates an undocumented public fn
#![allow(missing_docs, clippy::expect_used)]

use bearer_jwt::{ProviderConfig, TokenProvider};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn provider_with(secret: &str) -> TokenProvider {
    let config = ProviderConfig::new(secret, "Foo", "Foo")
        .expect("benchmark configuration should be valid");
    TokenProvider::new(config)
}

fn provider() -> TokenProvider {
    provider_with("benchmark_secret_0123456789abcdef")
}

/// Benchmark issuance and validation with subjects of increasing size
fn benchmark_pipelines(c: &mut Criterion) {
    let provider = provider();
    let mut group = c.benchmark_group("token_pipeline");

    for size in [8usize, 256, 4096] {
        let subject = "s".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("issue", size), &subject, |b, subject| {
            b.iter(|| std::hint::black_box(provider.issue(subject)));
        });

        let presented = format!("Bearer {}", provider.issue(&subject));
        group.bench_with_input(
            BenchmarkId::new("validate", size),
            &presented,
            |b, presented| {
                b.iter(|| std::hint::black_box(provider.validate(presented)));
            },
        );
    }
    group.finish();
}

/// Benchmark the cheapest rejection paths
fn benchmark_rejections(c: &mut Criterion) {
    let provider = provider();
    let mut group = c.benchmark_group("token_rejection");

    let token = provider.issue("alice");
    let forged = format!("Bearer {}", provider_with("another_secret").issue("alice"));

    group.bench_function("missing_prefix", |b| {
        b.iter(|| std::hint::black_box(provider.validate(&token)));
    });
    group.bench_function("bad_signature", |b| {
        b.iter(|| std::hint::black_box(provider.validate(&forged)));
    });
    group.finish();
}

criterion_group!(benches, benchmark_pipelines, benchmark_rejections);
criterion_main!(benches);
