use std::sync::LazyLock;

use roadgraph::{Digraph, RoadMap};

pub static NETWORK_MAP: LazyLock<RoadMap> = LazyLock::new(|| {
    RoadMap::open(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/network.txt")).unwrap()
});

#[allow(dead_code)]
pub static NETWORK_GRAPH: LazyLock<Digraph<i64>> =
    LazyLock::new(|| NETWORK_MAP.graph().clone());
