use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::routing::unpack_path;
use crate::{DirectedGraph, GraphError};

/// Returns a path with the fewest edges from the source to the destination, following the edges
/// in their direction, or None if the destination cannot be reached.
///
/// Breadth-first search: vertices are discovered in order of distance (in number of edges) from
/// the source, and each vertex remembers the vertex it was discovered from.
/// The path from a vertex to itself is the vertex alone.
/// Fails if the source (not being the destination) is not in the graph.
pub fn shortest_path<G: DirectedGraph>(
    graph: &G,
    source: G::VertexId,
    destination: G::VertexId,
) -> Result<Option<Vec<G::VertexId>>, GraphError<G::VertexId>> {
    debug!("Computing shortest path {source:?} -> {destination:?}");

    // vertices that have been discovered (and enqueued) at least once
    let mut discovered = FxHashSet::from_iter([source]);

    // previous vertex (value) that discovered this vertex (key)
    let mut previous_map = FxHashMap::default();

    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        if current == destination {
            return Ok(Some(unpack_path(&previous_map, destination)));
        }

        for next in graph.adjacent_to(current)? {
            if discovered.insert(next) {
                previous_map.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    debug!("No path {source:?} -> {destination:?}");
    Ok(None)
}
