use std::io::ErrorKind;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum GraphError<VertexId> {
    #[error("Vertex {0:?} is not in the graph")]
    UnknownVertex(VertexId),
    #[error("For {vertices} vertices, {edges} edges were requested but the maximum is {max}")]
    InvalidEdgeCount {
        vertices: usize,
        edges: usize,
        max: usize,
    },
    #[error("Cost of edge {0:?} is not defined")]
    UndefinedCost((VertexId, VertexId)),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum MapError {
    #[error("Road map I/O error: {0:?}")]
    IO(ErrorKind),
    #[error("Road map record at line {0} is not valid")]
    InvalidRecord(usize),
    #[error("Road map edge {0:?} has an endpoint that is not a vertex")]
    DanglingEdge((i64, i64)),
}

impl From<std::io::Error> for MapError {
    fn from(error: std::io::Error) -> Self {
        Self::IO(error.kind())
    }
}
