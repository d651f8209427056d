mod contract;
mod graph;

use criterion::criterion_group;

criterion_group!(benches, graph::basic, contract::basic);
