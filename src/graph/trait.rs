use crate::graph::*;
use crate::{Error, Result};

/// Read-only view of a graph, which is all the algorithms need.
pub trait QueryableGraph {
    fn graph_id(&self) -> GraphId;
    fn is_directed(&self) -> bool;
    fn is_simple(&self) -> bool;

    fn vertex_size(&self) -> usize;
    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_>;
    fn contains_vertex(&self, v: &VertexId) -> bool;
    fn label(&self, v: &VertexId) -> Option<&str>;

    fn edge_size(&self) -> usize;
    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_>;
    fn contains_edge(&self, e: &EdgeId) -> bool;
    fn edge(&self, e: &EdgeId) -> Option<Edge>;
    /// Edges from `source` to `sink` for directed graphs or between them for undirected ones.
    fn edges_connecting(
        &self,
        source: &VertexId,
        sink: &VertexId,
    ) -> Box<dyn Iterator<Item = Edge> + '_>;
    /// Every edge touching `v` exactly once, in its stored orientation.
    fn incidence(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_>;
    /// Edges entering `v`. Undirected graphs report every incident edge with `head == v`.
    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_>;
    /// Edges leaving `v`. Undirected graphs report every incident edge with `tail == v`.
    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_>;

    /// Fails unless `v` is a member of this graph.
    fn check_vertex(&self, v: &VertexId) -> Result<()> {
        if v.graph() != self.graph_id() {
            Err(Error::ForeignVertex(*v))
        } else if !self.contains_vertex(v) {
            Err(Error::UnknownVertex(*v))
        } else {
            Ok(())
        }
    }

    fn debug(&self) -> GraphDebug<'_, Self>
    where
        Self: Sized,
    {
        GraphDebug::new(self)
    }
}
