//! A multigraph, directed or not, and a handful of classic algorithms over it.
//!
//! * [graph::Graph] holds vertices, labelled and identified by [graph::VertexId],
//!   and weighted edges, identified by [graph::EdgeId].
//!   Parallel edges and self-loops are allowed unless the graph is simple.
//! * [algorithm] offers, as extension traits of [graph::QueryableGraph],
//!   Dijkstra and Bellman-Ford shortest paths, Tarjan's strongly connected components
//!   and Hierholzer's Eulerian trails.
//! * [collections] holds the bounded stack and the indexed min-heap the algorithms run on.
//!
//! ```rust
//! use graphwalk::{algorithm::*, graph::*};
//!
//! let mut g = Graph::directed();
//! let a = g.insert_vertex(Some("a"));
//! let b = g.insert_vertex(Some("b"));
//! g.add_edge(a, b, Some(2.5)).unwrap();
//! let tree = g.dijkstra(&a).unwrap();
//! assert_eq!(tree.distance(&b), 2.5);
//! ```
//!
//! Algorithms log through `tracing`; install a subscriber to see their warnings.
pub mod algorithm;
pub mod collections;
mod error;
pub mod graph;
pub use self::error::*;
