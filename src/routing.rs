use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::{Cost, DirectedGraph, GraphError};

mod least_cost;
mod unweighted;

pub use least_cost::{least_cost_path, least_cost_path_with};
pub use unweighted::shortest_path;

/// Cost of traversing a single directed edge.
/// Returns None if the cost of the edge is not defined, which makes any search that needs to
/// traverse the edge fail.
pub trait EdgeCost<VertexId> {
    fn cost(&self, from: VertexId, to: VertexId) -> Option<Cost>;
}

impl<VertexId, F> EdgeCost<VertexId> for F
where
    F: Fn(VertexId, VertexId) -> Option<Cost>,
{
    fn cost(&self, from: VertexId, to: VertexId) -> Option<Cost> {
        self(from, to)
    }
}

/// Every edge costs 1, the cost of a path is its number of edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCost;

impl<VertexId> EdgeCost<VertexId> for UnitCost {
    fn cost(&self, _: VertexId, _: VertexId) -> Option<Cost> {
        Some(Cost::from_value(1.0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Paths that cost more than this are not explored.
    pub max_cost: Cost,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_cost: Cost::INFINITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path<VertexId> {
    pub cost: Cost,
    pub vertices: Vec<VertexId>,
}

/// Returns the total cost of the path, that is the sum of the cost of each step.
/// Staying on the same vertex costs nothing.
pub fn path_cost<V, C>(path: &[V], cost: &C) -> Result<Cost, GraphError<V>>
where
    V: Copy + Eq,
    C: EdgeCost<V> + ?Sized,
{
    path.windows(2)
        .map(|window| match [window[0], window[1]] {
            [from, to] if from == to => Ok(Cost::ZERO),
            [from, to] => edge_cost(cost, from, to),
        })
        .sum()
}

fn edge_cost<V: Copy, C: EdgeCost<V> + ?Sized>(
    cost: &C,
    from: V,
    to: V,
) -> Result<Cost, GraphError<V>> {
    cost.cost(from, to)
        .ok_or(GraphError::UndefinedCost((from, to)))
}

/// Unpacks the path from destination back to the vertex that has no previous vertex.
fn unpack_path<V: Copy + Eq + Hash>(previous_map: &FxHashMap<V, V>, destination: V) -> Vec<V> {
    let mut vertices = vec![destination];
    let mut next = destination;

    while let Some(&previous) = previous_map.get(&next) {
        next = previous;
        vertices.push(previous);
    }

    vertices.reverse();
    vertices
}

/// Returns true only if the graph contains both vertices.
fn contains_vertices<G: DirectedGraph>(graph: &G, a: G::VertexId, b: G::VertexId) -> bool {
    graph.contains_vertex(a) && graph.contains_vertex(b)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use test_log::test;

    use super::*;
    use crate::graph::tests::NETWORK_MAP;

    #[test]
    fn path_cost_001() {
        assert_eq!(path_cost::<i64, _>(&[], &UnitCost), Ok(Cost::ZERO));
        assert_eq!(path_cost(&[1], &UnitCost), Ok(Cost::ZERO));
        assert_eq!(path_cost(&[1, 2, 3], &UnitCost), Ok(Cost::from_value(2.0)));
        assert_eq!(path_cost(&[1, 1, 2, 2], &UnitCost), Ok(Cost::from_value(1.0)));
    }

    #[test]
    fn path_cost_002() {
        let cost = |from: i64, to: i64| (from < to).then_some(Cost::from_value(0.5));

        assert_eq!(path_cost(&[1, 2, 3], &cost), Ok(Cost::from_value(1.0)));
        assert_eq!(
            path_cost(&[1, 3, 2], &cost),
            Err(GraphError::UndefinedCost((3, 2)))
        );
    }

    #[test]
    fn path_cost_003() {
        let map = &*NETWORK_MAP;

        let cost = path_cost(&[1, 2, 6, 4], map).unwrap();
        assert_abs_diff_eq!(cost.value(), 0.010, epsilon = 1e-9);

        let expected = map.cost(1, 2).unwrap() + map.cost(2, 6).unwrap() + map.cost(6, 4).unwrap();
        assert_eq!(cost, expected);
    }

    #[test]
    fn unpack_path_001() {
        let previous_map = FxHashMap::from_iter([(2, 1), (3, 2), (4, 2)]);

        assert_eq!(unpack_path(&previous_map, 3), vec![1, 2, 3]);
        assert_eq!(unpack_path(&previous_map, 4), vec![1, 2, 4]);
        assert_eq!(unpack_path(&previous_map, 1), vec![1]);
    }
}
