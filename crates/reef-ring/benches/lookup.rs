//! Benchmarks for node registration and key lookup.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reef_ring::{DEFAULT_VIRTUAL_NODE_PATTERN, Registry, RegistryConfig};

fn build(nodes: usize, replicas: u32) -> Registry {
    let config = RegistryConfig::new("bench", DEFAULT_VIRTUAL_NODE_PATTERN, replicas);
    let mut reg = Registry::new(config).unwrap();
    for i in 0..nodes {
        reg.register(&format!("worker-{i}")).unwrap();
    }
    reg
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");
    for &replicas in &[16u32, 128, 512] {
        group.bench_with_input(
            BenchmarkId::new("nodes_16", replicas),
            &replicas,
            |b, &replicas| {
                b.iter(|| build(16, replicas));
            },
        );
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    for &nodes in &[4usize, 64, 512] {
        let reg = build(nodes, 128);
        let keys: Vec<String> = (0..1024).map(|i| format!("request-{i}")).collect();
        group.bench_with_input(BenchmarkId::new("by_name", nodes), &keys, |b, keys| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % keys.len();
                black_box(reg.query(&keys[i]).unwrap());
            });
        });
        group.bench_with_input(BenchmarkId::new("by_key", nodes), &nodes, |b, _| {
            let mut key = 0u64;
            b.iter(|| {
                key = key.wrapping_add(0x9E37_79B9_7F4A_7C15);
                black_box(reg.query_key(key).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_register, bench_query);
criterion_main!(benches);
