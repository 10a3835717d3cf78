use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{DirectedGraph, GraphError};

/// Directed graph stored as two parallel adjacency indices.
///
/// Every vertex has a (possibly empty) set of vertices it points to and a set of vertices that
/// point to it. Both indices are updated together whenever an edge is added, and adding an edge
/// adds its missing endpoints, so an edge can never reference an unknown vertex.
/// Adjacency is a set: adding the same edge twice has no effect.
#[derive(Debug, Clone)]
pub struct Digraph<V> {
    to_sets: FxHashMap<V, FxHashSet<V>>,
    from_sets: FxHashMap<V, FxHashSet<V>>,
}

impl<V> Default for Digraph<V> {
    fn default() -> Self {
        Self {
            to_sets: FxHashMap::default(),
            from_sets: FxHashMap::default(),
        }
    }
}

// the reverse index is built from the forward one
impl<V: Eq + Hash> PartialEq for Digraph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.to_sets == other.to_sets
    }
}

impl<V: Eq + Hash> Eq for Digraph<V> {}

impl<V: Copy + Eq + Hash> Digraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex with no edges, does nothing if the vertex is already in the graph.
    pub fn add_vertex(&mut self, vertex: V) {
        self.to_sets.entry(vertex).or_default();
        self.from_sets.entry(vertex).or_default();
    }

    /// Adds the directed edge from -> to, adding its endpoints if they are not in the graph yet.
    /// Returns true only if the edge was not already in the graph.
    pub fn add_edge(&mut self, from: V, to: V) -> bool {
        self.add_vertex(from);
        self.add_vertex(to);

        let inserted = self.to_sets.entry(from).or_default().insert(to);
        self.from_sets.entry(to).or_default().insert(from);
        inserted
    }

    pub fn vertices(&self) -> FxHashSet<V> {
        self.to_sets.keys().copied().collect()
    }

    /// Returns the set of all the directed edges as (from, to) pairs.
    /// Running time is O(V + E).
    pub fn edges(&self) -> FxHashSet<(V, V)> {
        self.to_sets
            .iter()
            .flat_map(|(&from, to_set)| to_set.iter().map(move |&to| (from, to)))
            .collect()
    }

    pub fn num_vertices(&self) -> usize {
        self.to_sets.len()
    }

    pub fn num_edges(&self) -> usize {
        self.to_sets.values().map(FxHashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.to_sets.is_empty()
    }
}

impl<V: Debug + Copy + Ord + Hash> DirectedGraph for Digraph<V> {
    type VertexId = V;

    fn contains_vertex(&self, vertex: V) -> bool {
        self.to_sets.contains_key(&vertex)
    }

    fn adjacent_to(&self, vertex: V) -> Result<impl Iterator<Item = V>, GraphError<V>> {
        self.to_sets
            .get(&vertex)
            .map(|to_set| to_set.iter().copied())
            .ok_or(GraphError::UnknownVertex(vertex))
    }

    fn adjacent_from(&self, vertex: V) -> Result<impl Iterator<Item = V>, GraphError<V>> {
        self.from_sets
            .get(&vertex)
            .map(|from_set| from_set.iter().copied())
            .ok_or(GraphError::UnknownVertex(vertex))
    }

    fn contains_edge(&self, from: V, to: V) -> bool {
        self.to_sets
            .get(&from)
            .is_some_and(|to_set| to_set.contains(&to))
    }
}

impl<V: Copy + Eq + Hash> Extend<(V, V)> for Digraph<V> {
    fn extend<I: IntoIterator<Item = (V, V)>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}

impl<V: Copy + Eq + Hash> FromIterator<(V, V)> for Digraph<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(edges: I) -> Self {
        let mut graph = Self::default();
        graph.extend(edges);
        graph
    }
}
