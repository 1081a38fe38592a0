use std::{hint::black_box, sync::Arc, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use graphbind::{
    AttrValue, EdgeList, Graph, NeighborMode, Selector,
    bench_utils::{GraphDataset, GraphShape, generate_graph},
    conversion::float_buffer,
};

const LINE_SEED: u64 = 0xA17C;
const ER_SEED: u64 = 0xB25F;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

struct BenchCase {
    id: String,
    dataset: Arc<GraphDataset>,
}

fn bench_scales() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[1_000, 5_000]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[10_000, 50_000, 100_000]
    }
}

fn bench_cases() -> Vec<BenchCase> {
    let mut cases = Vec::new();
    for &nodes in bench_scales() {
        let line = generate_graph(GraphShape::Line, nodes, LINE_SEED + nodes as u64);
        cases.push(BenchCase {
            id: format!("line_{nodes}"),
            dataset: Arc::new(line),
        });
        let random = generate_graph(
            GraphShape::RandomErdosRenyi {
                edges: nodes.saturating_mul(5),
            },
            nodes,
            ER_SEED + nodes as u64,
        );
        cases.push(BenchCase {
            id: format!("er_{nodes}"),
            dataset: Arc::new(random),
        });
    }
    cases
}

fn bench_edge_list_from_host(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_list_from_host");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in bench_cases() {
        let host = case.dataset.host_edges();
        group.bench_function(BenchmarkId::from_parameter(case.id), |b| {
            b.iter(|| EdgeList::from_host(black_box(&host)).expect("edge list"));
        });
    }
    group.finish();
}

fn bench_weight_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("weight_buffer");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in bench_cases() {
        let values: Vec<AttrValue> = case
            .dataset
            .weights
            .iter()
            .copied()
            .map(AttrValue::Float)
            .collect();
        group.bench_function(BenchmarkId::from_parameter(case.id), |b| {
            b.iter(|| float_buffer(black_box(&values)).expect("floats"));
        });
    }
    group.finish();
}

fn bench_degree_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("degree_reply");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in bench_cases() {
        let graph: Graph = case.dataset.build(false).expect("graph");
        group.bench_function(BenchmarkId::from_parameter(case.id), |b| {
            b.iter(|| {
                graph
                    .degree(Selector::All, NeighborMode::All, true)
                    .expect("degrees")
                    .into_vec()
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = conversion_benches;
    config = Criterion::default();
    targets = bench_edge_list_from_host, bench_weight_buffer, bench_degree_reply
);
criterion_main!(conversion_benches);
