use crate::graph::{EdgeId, VertexId};

/// Simple-graph rules an insertion may break.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Violation {
    SelfLoopNotAllowed,
    MultiEdgeNotAllowed,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::SelfLoopNotAllowed => write!(f, "no loops allowed in simple graphs"),
            Violation::MultiEdgeNotAllowed => write!(f, "no multi-edges allowed in simple graphs"),
        }
    }
}

/// Errors raised while building graphs or driving the collections the algorithms rely on.
///
/// Every fallible operation checks before it mutates,
/// so a returned error leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("graph constraint violated: {0}")]
    GraphConstraintViolation(Violation),
    #[error("vertex {0:?} belongs to another graph")]
    ForeignVertex(VertexId),
    #[error("edge {0:?} belongs to another graph")]
    ForeignEdge(EdgeId),
    #[error("vertex {0:?} is not present in the graph")]
    UnknownVertex(VertexId),
    #[error("edge {0:?} is not present in the graph")]
    UnknownEdge(EdgeId),
    #[error("vertex {vertex:?} is neither head nor tail of edge {edge:?}")]
    InvalidEndpoint { edge: EdgeId, vertex: VertexId },
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
    #[error("extracting from an empty heap")]
    EmptyHeap,
    #[error("popping or peeking from an empty stack")]
    EmptyStack,
    #[error("pushing onto a full stack")]
    StackFull,
}

pub type Result<T> = std::result::Result<T, Error>;
