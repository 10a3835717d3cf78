use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::DirectedGraph;

/// Returns true only if each vertex of the path is either the same as the previous one, or
/// reachable from it through a single edge of the graph.
///
/// An empty path is not valid, while a single vertex is always a valid path from itself to itself
/// (even when the vertex is not in the graph, since there is no step to validate).
pub fn is_valid_path<G: DirectedGraph>(graph: &G, path: &[G::VertexId]) -> bool {
    if path.is_empty() {
        return false;
    }

    for window in path.windows(2) {
        let [previous, current] = [window[0], window[1]];

        if previous != current && !graph.contains_edge(previous, current) {
            trace!("Path is broken at {previous:?} -> {current:?}");
            return false;
        }
    }

    true
}

/// Removes the cycles from a walk.
///
/// Starting from the first vertex, each step jumps right after the last occurrence of the
/// current vertex in the walk, skipping any detour that comes back to it.
/// The result is a sub-sequence of the walk with the same first and last vertex.
/// The walk is not checked against any graph.
pub fn compress<V: Copy + Eq + Hash>(walk: &[V]) -> Vec<V> {
    let last_index: FxHashMap<V, usize> = walk.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut path = vec![];
    let mut index = 0;

    while let Some(&vertex) = walk.get(index) {
        path.push(vertex);
        index = last_index[&vertex] + 1;
    }

    path
}
