use std::fmt::Debug;
use std::hash::Hash;

use crate::GraphError;

/// Directed graph.
/// Exposes the adjacency of a road network graph in both directions.
/// Implemented by [`Digraph`](crate::Digraph), searches and path utilities are generic over it so
/// they can run on any graph representation.
pub trait DirectedGraph {
    /// Uniquely identify a vertex that belongs to the graph.
    type VertexId: Debug + Copy + Ord + Hash;

    /// Returns true only if the vertex has been added to the graph.
    fn contains_vertex(&self, vertex: Self::VertexId) -> bool;

    /// Gets an iterator over all the vertices reachable from the given vertex through a single
    /// outgoing edge.
    /// Fails if the vertex doesn't belong to the graph.
    fn adjacent_to(
        &self,
        vertex: Self::VertexId,
    ) -> Result<impl Iterator<Item = Self::VertexId>, GraphError<Self::VertexId>>;

    /// Gets an iterator over all the vertices that have an outgoing edge into the given vertex.
    /// Fails if the vertex doesn't belong to the graph.
    fn adjacent_from(
        &self,
        vertex: Self::VertexId,
    ) -> Result<impl Iterator<Item = Self::VertexId>, GraphError<Self::VertexId>>;

    /// Returns true only if the directed edge from -> to belongs to the graph.
    /// Unknown vertices have no edges.
    fn contains_edge(&self, from: Self::VertexId, to: Self::VertexId) -> bool {
        self.adjacent_to(from)
            .is_ok_and(|mut vertices| vertices.any(|v| v == to))
    }
}

pub mod digraph;
pub mod generate;
pub mod path;
