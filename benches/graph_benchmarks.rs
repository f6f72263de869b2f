use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use venturegraph::algo::{find_introductions, CostModel, IntroOptions};
use venturegraph::filter::{self, FilterSpec};
use venturegraph::graph::{Graph, Link, LinkKind, Node, NodeKind};
use venturegraph::layout::{simulate, LayoutConfig};

/// Synthetic investor network: a ring of investors with chord links, every
/// tenth node a firm hub. Deterministic, so runs are comparable.
fn synthetic_graph(size: usize) -> Graph {
    let kinds = [
        LinkKind::Investment,
        LinkKind::CoInvestment,
        LinkKind::FirmColleague,
        LinkKind::BoardMember,
        LinkKind::Sector,
    ];

    let nodes: Vec<Node> = (0..size)
        .map(|i| {
            let kind = if i % 10 == 0 {
                NodeKind::Firm
            } else {
                NodeKind::Investor
            };
            Node::new(format!("n{}", i), format!("Node {}", i), kind)
                .with_tier((i % 3 + 1) as u8)
                .with_value((i % 40) as f64)
        })
        .collect();

    let mut links = Vec::new();
    for i in 0..size {
        let j = (i + 1) % size;
        links.push(Link::new(
            format!("n{}", i),
            format!("n{}", j),
            kinds[i % kinds.len()],
            0.2 + 0.6 * ((i % 7) as f64 / 7.0),
        ));
        if i % 3 == 0 {
            let k = (i + size / 2) % size;
            if k != i {
                links.push(Link::new(
                    format!("n{}", i),
                    format!("n{}", k),
                    kinds[(i + 2) % kinds.len()],
                    0.5,
                ));
            }
        }
    }

    Graph::build(nodes, links).unwrap()
}

/// Benchmark graph construction and validation
fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for size in [100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| synthetic_graph(size));
        });
    }
    group.finish();
}

/// Benchmark the filter pipeline
fn bench_filter_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    for size in [100, 500].iter() {
        let graph = synthetic_graph(*size);
        let spec = FilterSpec {
            kind: Some(NodeKind::Investor),
            min_connections: 2,
            min_strength: 0.4,
            ..FilterSpec::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter::apply(&graph, &spec).unwrap());
        });
    }
    group.finish();
}

/// Benchmark a full layout run at the interactive graph scale
fn bench_layout_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_run");
    group.sample_size(10);

    for size in [100, 300].iter() {
        let graph = synthetic_graph(*size);
        let config = LayoutConfig {
            max_ticks: 50,
            ..LayoutConfig::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| simulate(&graph, config.clone()).unwrap());
        });
    }
    group.finish();
}

/// Benchmark warm-introduction searches across the ring
fn bench_find_introductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_introductions");

    for size in [100, 500].iter() {
        let graph = synthetic_graph(*size);
        let cost = CostModel::default();
        let options = IntroOptions { max_hops: 5, k: 3 };
        let source = "n1".into();
        let target = format!("n{}", size / 2 + 1).into();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| find_introductions(&graph, &source, &target, &cost, &options).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_graph_build,
    bench_filter_apply,
    bench_layout_run,
    bench_find_introductions
);
criterion_main!(benches);
