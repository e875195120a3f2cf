//! The multigraph model, its structural queries and compositions.
//!
//! # Vertices and edges
//!
//! Vertices and edges are lightweight ID's.
//! They are essentially `usize`, tagged with the identity of the graph owning them.
//! Algorithm authors may feel free to copy and store these ID's,
//! and a graph refuses ID's minted by another graph.
//!
//! # `Graph`
//!
//! A single type serves directed and undirected, simple and non-simple graphs.
//! Each vertex keeps an incidence map from its neighbours to the edges joining them.
//!
//! # `MappedGraph`
//!
//! Union, difference, complement and duplication never alias their operands.
//! They build a fresh graph and return it together with how its vertices and edges
//! are mapped from the operands.

mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;
mod r#trait;
pub use self::r#trait::*;
mod multigraph;
pub use self::multigraph::*;
mod mapped_graph;
pub use self::mapped_graph::*;
mod generate;
pub use self::generate::*;
mod graph_debug;
pub use self::graph_debug::*;

#[cfg(test)]
pub use self::tests::*;
