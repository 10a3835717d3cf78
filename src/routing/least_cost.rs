use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::routing::{EdgeCost, Path, SearchConfig, contains_vertices, edge_cost, unpack_path};
use crate::{Cost, DirectedGraph, GraphError, is_valid_path, shortest_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapElement<VertexId> {
    /// Tentative cost from start to this vertex.
    cost: Cost,
    vertex: VertexId,
}

// The priority queue depends on the implementation of the Ord trait.
// By default std::BinaryHeap is a max heap.
// Explicitly implement the trait so the queue becomes a min heap.
impl<VertexId: Ord> Ord for HeapElement<VertexId> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            // breaking ties in a deterministic way
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<VertexId: Ord> PartialOrd for HeapElement<VertexId> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Returns a least cost path from start to destination where the cost of each edge is given by
/// the cost function, or None if there is no path.
/// See [`least_cost_path_with`].
pub fn least_cost_path<G, C>(
    graph: &G,
    start: G::VertexId,
    destination: G::VertexId,
    cost: &C,
) -> Result<Option<Path<G::VertexId>>, GraphError<G::VertexId>>
where
    G: DirectedGraph,
    C: EdgeCost<G::VertexId> + ?Sized,
{
    least_cost_path_with(&SearchConfig::default(), graph, start, destination, cost)
}

/// Returns a least cost path from start to destination where the cost of each edge is given by
/// the cost function, or None if there is no path (within the configured max cost).
///
/// Returns None if either start or destination is not in the graph. The path from a vertex to
/// itself is the vertex alone with zero cost.
///
/// Dijkstra search: vertices are finalized in order of their cost from start, and each vertex
/// remembers the previous vertex on the cheapest known path to it. When more vertices share the
/// lowest tentative cost the tie is broken by vertex order, therefore out of multiple least cost
/// paths the one returned is implementation defined.
///
/// Edge costs are expected to be non-negative. Fails if the cost of a traversed edge is not
/// defined by the cost function.
pub fn least_cost_path_with<G, C>(
    config: &SearchConfig,
    graph: &G,
    start: G::VertexId,
    destination: G::VertexId,
    cost: &C,
) -> Result<Option<Path<G::VertexId>>, GraphError<G::VertexId>>
where
    G: DirectedGraph,
    C: EdgeCost<G::VertexId> + ?Sized,
{
    debug!("Computing least cost path {start:?} -> {destination:?} with {config:?}");

    if !contains_vertices(graph, start, destination) {
        debug!("Vertices {start:?} and {destination:?} are not both in the graph");
        return Ok(None);
    }

    // there is no need to explore the graph if the destination cannot be reached at all
    if shortest_path(graph, start, destination)?.is_none() {
        debug!("Destination {destination:?} is not reachable from {start:?}");
        return Ok(None);
    }

    // (current) least cost from start to this vertex
    let mut tentative_costs = FxHashMap::from_iter([(start, Cost::ZERO)]);

    // vertices whose least cost from start has been determined
    let mut visited = FxHashSet::default();

    // previous vertex (value) on the current cheapest known path from start to this vertex (key)
    let mut previous_map = FxHashMap::default();

    // priority queue of discovered vertices that may need to be visited
    let mut frontier = BinaryHeap::from([HeapElement {
        cost: Cost::ZERO,
        vertex: start,
    }]);

    while let Some(element) = frontier.pop() {
        // lazy deletion: the vertex was already reached with a lower cost
        if !visited.insert(element.vertex) {
            continue;
        }

        if element.vertex == destination {
            break;
        }

        for next in graph.adjacent_to(element.vertex)? {
            if visited.contains(&next) {
                continue;
            }

            let candidate = element.cost + edge_cost(cost, element.vertex, next)?;
            if candidate > config.max_cost {
                continue;
            }

            // check if we can follow the current path to reach the neighbor in a cheaper way
            if tentative_costs.get(&next).is_none_or(|&c| candidate < c) {
                trace!("Relax {next:?} through {:?} at {candidate:?}", element.vertex);

                // Relax: we have now found a better way that we are going to explore
                tentative_costs.insert(next, candidate);
                previous_map.insert(next, element.vertex);
                frontier.push(HeapElement {
                    cost: candidate,
                    vertex: next,
                });
            }
        }
    }

    if !visited.contains(&destination) {
        debug!("Destination {destination:?} cannot be reached within {config:?}");
        return Ok(None);
    }

    let vertices = unpack_path(&previous_map, destination);

    if vertices.first() != Some(&start) || !is_valid_path(graph, &vertices) {
        warn!("Invalid least cost path {start:?} -> {destination:?}: {vertices:?}");
        return Ok(None);
    }

    Ok(Some(Path {
        cost: tentative_costs[&destination],
        vertices,
    }))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use test_log::test;

    use super::*;
    use crate::graph::tests::{NETWORK_GRAPH, NETWORK_MAP};
    use crate::{Digraph, UnitCost, path_cost};

    fn graph(edges: &[(i64, i64)]) -> Digraph<i64> {
        edges.iter().copied().collect()
    }

    #[test]
    fn least_cost_path_001() {
        let mut graph = Digraph::new();

        assert_eq!(least_cost_path(&graph, 1, 2, &UnitCost), Ok(None));

        graph.add_edge(1, 2);
        let path = least_cost_path(&graph, 1, 2, &UnitCost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2]);
        assert_eq!(path.cost, Cost::from_value(1.0));

        assert_eq!(least_cost_path(&graph, 2, 1, &UnitCost), Ok(None));

        graph.add_edge(2, 3);
        let path = least_cost_path(&graph, 1, 3, &UnitCost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2, 3]);

        graph.add_edge(3, 4);
        graph.add_edge(2, 4);
        let path = least_cost_path(&graph, 1, 4, &UnitCost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2, 4]);
        assert_eq!(path.cost, Cost::from_value(2.0));
    }

    #[test]
    fn least_cost_path_002() {
        let graph = graph(&[(1, 2)]);

        let path = least_cost_path(&graph, 1, 1, &UnitCost).unwrap().unwrap();
        assert_eq!(
            path,
            Path {
                cost: Cost::ZERO,
                vertices: vec![1]
            }
        );

        assert_eq!(least_cost_path(&graph, 42, 42, &UnitCost), Ok(None));
        assert_eq!(least_cost_path(&graph, 1, 42, &UnitCost), Ok(None));
        assert_eq!(least_cost_path(&graph, 42, 1, &UnitCost), Ok(None));
    }

    #[test]
    fn least_cost_path_003() {
        // two least cost paths, the tie break is implementation defined
        let graph = graph(&[(1, 2), (1, 3), (2, 4), (3, 4)]);

        let path = least_cost_path(&graph, 1, 4, &UnitCost).unwrap().unwrap();
        assert_eq!(path.cost, Cost::from_value(2.0));
        assert_eq!(path_cost(&path.vertices, &UnitCost), Ok(path.cost));
        assert!(path.vertices == vec![1, 2, 4] || path.vertices == vec![1, 3, 4]);
    }

    #[test]
    fn least_cost_path_004() {
        // the direct edge is more expensive than the detour
        let graph = graph(&[(1, 2), (2, 3), (3, 4), (1, 4)]);
        let cost = |from: i64, to: i64| match (from, to) {
            (1, 4) => Some(Cost::from_value(10.0)),
            _ => Some(Cost::from_value(1.0)),
        };

        let path = least_cost_path(&graph, 1, 4, &cost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2, 3, 4]);
        assert_eq!(path.cost, Cost::from_value(3.0));

        assert_eq!(
            shortest_path(&graph, 1, 4),
            Ok(Some(vec![1, 4])),
            "fewest edges"
        );
    }

    #[test]
    fn least_cost_path_005() {
        // a cheaper path to 4 is found after 4 has been discovered
        let graph = graph(&[(1, 2), (1, 3), (2, 4), (3, 5), (5, 4)]);
        let cost = |from: i64, to: i64| match (from, to) {
            (1, 2) => Some(Cost::from_value(1.0)),
            (2, 4) => Some(Cost::from_value(9.0)),
            (1, 3) => Some(Cost::from_value(2.0)),
            (3, 5) => Some(Cost::from_value(2.0)),
            (5, 4) => Some(Cost::from_value(2.0)),
            _ => None,
        };

        let path = least_cost_path(&graph, 1, 4, &cost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 3, 5, 4]);
        assert_eq!(path.cost, Cost::from_value(6.0));
    }

    #[test]
    fn least_cost_path_006() {
        let graph = graph(&[(1, 2), (2, 3)]);
        let cost = |from: i64, to: i64| (from, to).ne(&(2, 3)).then_some(Cost::from_value(1.0));

        assert_eq!(
            least_cost_path(&graph, 1, 3, &cost),
            Err(GraphError::UndefinedCost((2, 3)))
        );

        // the undefined edge is never traversed
        let path = least_cost_path(&graph, 1, 2, &cost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2]);
    }

    #[test]
    fn least_cost_path_007() {
        let graph = graph(&[(1, 2), (2, 3), (3, 4)]);

        let config = SearchConfig {
            max_cost: Cost::from_value(2.0),
        };

        let path = least_cost_path_with(&config, &graph, 1, 3, &UnitCost)
            .unwrap()
            .unwrap();
        assert_eq!(path.vertices, vec![1, 2, 3]);

        assert_eq!(
            least_cost_path_with(&config, &graph, 1, 4, &UnitCost),
            Ok(None)
        );
    }

    #[test]
    fn least_cost_path_008() {
        // the unreachable component would fail the search if it was ever explored
        let graph = graph(&[(1, 2), (3, 4)]);
        let cost = |_: i64, _: i64| None;

        assert_eq!(least_cost_path(&graph, 1, 4, &cost), Ok(None));
    }

    #[test]
    fn least_cost_path_009() {
        let graph: &Digraph<i64> = &NETWORK_GRAPH;
        let map = &*NETWORK_MAP;

        let path = least_cost_path(graph, 1, 4, map).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2, 6, 4]);
        assert_abs_diff_eq!(path.cost.value(), 0.010, epsilon = 1e-9);

        let path = least_cost_path(graph, 3, 5, map).unwrap().unwrap();
        assert_eq!(path.vertices, vec![3, 4, 6, 5]);
        assert_abs_diff_eq!(path.cost.value(), 0.010472136, epsilon = 1e-9);

        let path = least_cost_path(graph, 4, 1, map).unwrap().unwrap();
        assert_eq!(path.vertices, vec![4, 6, 5, 1]);
        assert_abs_diff_eq!(path.cost.value(), 0.010, epsilon = 1e-9);

        assert_eq!(least_cost_path(graph, 8, 7, map), Ok(None));
        assert_eq!(least_cost_path(graph, 1, 9, map), Ok(None));
    }

    #[test]
    fn least_cost_path_010() {
        let graph: &Digraph<i64> = &NETWORK_GRAPH;

        // unit costs emulate the shortest path
        let path = least_cost_path(graph, 1, 4, &UnitCost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 10, 4]);
        assert_eq!(path.cost, Cost::from_value(2.0));
    }

    #[test]
    fn least_cost_path_011() {
        // total cost overflows to infinity, the default search is still unbounded
        let graph = graph(&[(1, 2), (2, 3)]);
        let cost = |_: i64, _: i64| Some(Cost::from_value(1e308));

        let path = least_cost_path(&graph, 1, 3, &cost).unwrap().unwrap();
        assert_eq!(path.vertices, vec![1, 2, 3]);
        assert_eq!(path.cost, Cost::INFINITY);
    }
}
