use rand::Rng;
use rand::seq::index;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{Digraph, DirectedGraph, GraphError};

/// Runs an iterative depth-first search on the graph from the start vertex and returns the tree
/// of the edges used to discover each vertex.
///
/// The tree contains the start vertex and every vertex reachable from it, each one (other than
/// the start) with exactly one entering edge.
pub fn spanning_tree<G: DirectedGraph>(
    graph: &G,
    start: G::VertexId,
) -> Result<Digraph<G::VertexId>, GraphError<G::VertexId>> {
    let mut visited = FxHashSet::default();
    let mut todo = vec![(start, None)];
    let mut tree = Digraph::new();
    tree.add_vertex(start);

    while let Some((current, edge)) = todo.pop() {
        if !visited.insert(current) {
            continue;
        }

        if let Some((from, to)) = edge {
            tree.add_edge(from, to);
        }

        for next in graph.adjacent_to(current)? {
            if !visited.contains(&next) {
                todo.push((next, Some((current, next))));
            }
        }
    }

    debug!(
        "Spanning tree from {start:?} reaches {} vertices",
        tree.num_vertices()
    );

    Ok(tree)
}

/// Makes a random graph with vertices 0..vertices and exactly the given number of edges, no self
/// loops, using the thread local random number generator.
pub fn random_graph(vertices: usize, edges: usize) -> Result<Digraph<usize>, GraphError<usize>> {
    random_graph_with_rng(vertices, edges, &mut rand::thread_rng())
}

/// Makes a random graph with vertices 0..vertices and exactly the given number of edges, no self
/// loops.
/// Fails if more edges are requested than the complete directed graph has.
pub fn random_graph_with_rng<R: Rng + ?Sized>(
    vertices: usize,
    edges: usize,
    rng: &mut R,
) -> Result<Digraph<usize>, GraphError<usize>> {
    let max = vertices.saturating_mul(vertices.saturating_sub(1));
    if edges > max {
        return Err(GraphError::InvalidEdgeCount {
            vertices,
            edges,
            max,
        });
    }

    let mut graph = Digraph::new();
    for v in 0..vertices {
        graph.add_vertex(v);
    }

    let mut count = 0;
    while count < edges {
        let sample = index::sample(rng, vertices, 2);
        if graph.add_edge(sample.index(0), sample.index(1)) {
            count += 1;
        }
    }

    Ok(graph)
}
