#![doc = include_str!("../README.md")]

mod error;
mod graph;
mod map;
mod model;
mod routing;

pub use error::{GraphError, MapError};
pub use graph::DirectedGraph;
pub use graph::digraph::Digraph;
pub use graph::generate::{random_graph, random_graph_with_rng, spanning_tree};
pub use graph::path::{compress, is_valid_path};
#[cfg(feature = "geo")]
pub use map::HaversineCost;
pub use map::{RoadMap, Route, read_road_map};
pub use model::{Coordinate, Cost};
pub use routing::{
    EdgeCost, Path, SearchConfig, UnitCost, least_cost_path, least_cost_path_with, path_cost,
    shortest_path,
};
