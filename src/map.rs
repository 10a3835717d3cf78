//! Road network map: vertex coordinates and named directed edges, loaded from a line oriented
//! text format, with the glue needed to route between two coordinates.
//!
//! ```text
//! V,<vertex>,<lat>,<lon>
//! E,<from vertex>,<to vertex>,"<name>"
//! ```

use std::fmt::{self, Debug};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::FxHashMap;
use strum::EnumString;
use tracing::debug;

use crate::{
    Cost, Coordinate, Digraph, EdgeCost, GraphError, MapError, SearchConfig, least_cost_path_with,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
enum RecordType {
    #[strum(serialize = "V")]
    Vertex,
    #[strum(serialize = "E")]
    Edge,
}

#[derive(Debug, Clone)]
struct GeospatialVertex {
    vertex: i64,
    location: [f64; 2],
}

impl RTreeObject for GeospatialVertex {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.location)
    }
}

impl PointDistance for GeospatialVertex {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [lat, lon] = self.location;
        (lat - point[0]).powi(2) + (lon - point[1]).powi(2)
    }
}

/// Route between two coordinates, snapped to the nearest vertices of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub cost: Cost,
    pub vertices: Vec<i64>,
    /// Coordinates of the route vertices.
    pub waypoints: Vec<Coordinate>,
}

#[derive(Clone)]
pub struct RoadMap {
    graph: Digraph<i64>,
    coordinates: FxHashMap<i64, Coordinate>,
    edge_names: FxHashMap<(i64, i64), String>,
    geospatial_vertices: RTree<GeospatialVertex>,
}

impl Debug for RoadMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadMap")
            .field("graph", &self.graph)
            .field("coordinates", &self.coordinates)
            .field("edge_names", &self.edge_names)
            .finish_non_exhaustive()
    }
}

/// Reads a road map from vertex (V) and edge (E) records, one per line.
/// Every edge must connect vertices declared by previous vertex records.
pub fn read_road_map<R: BufRead>(reader: R) -> Result<RoadMap, MapError> {
    let mut graph = Digraph::new();
    let mut coordinates = FxHashMap::default();
    let mut edge_names = FxHashMap::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        let line_number = index + 1;

        if line.is_empty() {
            continue;
        }

        let invalid = || MapError::InvalidRecord(line_number);
        let mut fields = line.splitn(4, ',');

        let record_type = fields.next().map(RecordType::from_str);
        let mut next_field = || fields.next().ok_or_else(invalid);

        match record_type {
            Some(Ok(RecordType::Vertex)) => {
                let vertex: i64 = next_field()?.parse().map_err(|_| invalid())?;
                let lat: f64 = next_field()?.parse().map_err(|_| invalid())?;
                let lon: f64 = next_field()?.parse().map_err(|_| invalid())?;

                graph.add_vertex(vertex);
                coordinates.insert(vertex, Coordinate { lat, lon });
            }
            Some(Ok(RecordType::Edge)) => {
                let from: i64 = next_field()?.parse().map_err(|_| invalid())?;
                let to: i64 = next_field()?.parse().map_err(|_| invalid())?;
                let name = next_field()?.trim_matches('"');

                // edges cannot add vertices that have no coordinate
                if !coordinates.contains_key(&from) || !coordinates.contains_key(&to) {
                    return Err(MapError::DanglingEdge((from, to)));
                }

                graph.add_edge(from, to);
                edge_names.insert((from, to), name.to_owned());
            }
            _ => return Err(invalid()),
        }
    }

    debug!(
        "Read road map with {} vertices and {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    Ok(RoadMap::new(graph, coordinates, edge_names))
}

impl RoadMap {
    fn new(
        graph: Digraph<i64>,
        coordinates: FxHashMap<i64, Coordinate>,
        edge_names: FxHashMap<(i64, i64), String>,
    ) -> Self {
        let geospatial_vertices = RTree::bulk_load(
            coordinates
                .iter()
                .map(|(&vertex, coordinate)| GeospatialVertex {
                    vertex,
                    location: [coordinate.lat, coordinate.lon],
                })
                .collect(),
        );

        Self {
            graph,
            coordinates,
            edge_names,
            geospatial_vertices,
        }
    }

    /// Reads the road map from a file.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, MapError> {
        let file = File::open(path)?;
        read_road_map(BufReader::new(file))
    }

    pub const fn graph(&self) -> &Digraph<i64> {
        &self.graph
    }

    pub fn coordinate(&self, vertex: i64) -> Option<Coordinate> {
        self.coordinates.get(&vertex).copied()
    }

    pub fn edge_name(&self, from: i64, to: i64) -> Option<&str> {
        self.edge_names.get(&(from, to)).map(String::as_str)
    }

    /// Gets the vertex located exactly at the given coordinate.
    /// If more vertices share the same coordinate returns the lowest one.
    pub fn find_vertex(&self, coordinate: Coordinate) -> Option<i64> {
        self.coordinates
            .iter()
            .filter(|&(_, c)| *c == coordinate)
            .map(|(&vertex, _)| vertex)
            .min()
    }

    /// Gets the vertex closest to the given coordinate (planar distance).
    /// Returns None only if the map has no vertices.
    pub fn nearest_vertex(&self, coordinate: Coordinate) -> Option<i64> {
        self.geospatial_vertices
            .nearest_neighbor(&[coordinate.lat, coordinate.lon])
            .map(|node| node.vertex)
    }

    /// Finds the least cost route between the vertices nearest to the two coordinates, where the
    /// cost of an edge is the straight-line distance between its vertices.
    /// Returns None if there is no route.
    pub fn route(
        &self,
        config: &SearchConfig,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Option<Route>, GraphError<i64>> {
        let (Some(start), Some(destination)) = (self.nearest_vertex(from), self.nearest_vertex(to))
        else {
            return Ok(None);
        };

        debug!("Routing {from:?} -> {to:?} from vertex {start} to vertex {destination}");

        let Some(path) = least_cost_path_with(config, &self.graph, start, destination, self)?
        else {
            return Ok(None);
        };

        let waypoints = path
            .vertices
            .iter()
            .filter_map(|&vertex| self.coordinate(vertex))
            .collect();

        Ok(Some(Route {
            cost: path.cost,
            vertices: path.vertices,
            waypoints,
        }))
    }
}

/// Straight-line distance between the edge vertices, in degrees.
impl EdgeCost<i64> for RoadMap {
    fn cost(&self, from: i64, to: i64) -> Option<Cost> {
        let from = self.coordinates.get(&from)?;
        let to = self.coordinates.get(&to)?;
        Some(Cost::from_value(from.planar_distance(to)))
    }
}

/// Great-circle distance between the edge vertices, in meters.
#[cfg(feature = "geo")]
#[derive(Debug, Clone, Copy)]
pub struct HaversineCost<'a>(pub &'a RoadMap);

#[cfg(feature = "geo")]
impl EdgeCost<i64> for HaversineCost<'_> {
    fn cost(&self, from: i64, to: i64) -> Option<Cost> {
        use geo::{Distance, Haversine, Point};

        let from = self.0.coordinate(from)?;
        let to = self.0.coordinate(to)?;

        let meters = Haversine.distance(Point::new(from.lon, from.lat), Point::new(to.lon, to.lat));
        Some(Cost::from_value(meters))
    }
}
