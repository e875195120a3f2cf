use super::{GraphId, VertexId};
use crate::{Error, Result};

/// ID for edges, which are essentially `usize` tagged with their graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct EdgeId {
    graph: GraphId,
    raw: usize,
}

/// A factory to generate `EdgeId` uniquely within a graph.
#[derive(Clone)]
pub struct EdgeIdFactory {
    graph: GraphId,
    next: usize,
}

/// Information about an edge.
///
/// `tail` and `head` are only meaningful in their order for directed graphs.
/// For undirected graphs, queries may hand out the same edge with its endpoints swapped,
/// so that the vertex asked about is always on the expected side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: Option<f64>,
}

impl EdgeIdFactory {
    pub fn new(graph: GraphId) -> Self {
        Self { graph, next: 0 }
    }

    pub fn one_more(&mut self) -> EdgeId {
        let cur = self.next;
        self.next += 1;
        EdgeId {
            graph: self.graph,
            raw: cur,
        }
    }
}

impl EdgeId {
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn to_raw(&self) -> usize {
        self.raw
    }
}

impl Edge {
    /// Given one end of the edge, returns the other one.
    ///
    /// A self-loop returns the vertex itself.
    pub fn other_end(&self, vertex: &VertexId) -> Result<VertexId> {
        if self.tail == *vertex {
            Ok(self.head)
        } else if self.head == *vertex {
            Ok(self.tail)
        } else {
            Err(Error::InvalidEndpoint {
                edge: self.id,
                vertex: *vertex,
            })
        }
    }

    /// Tests whether `vertex` is one of the endpoints.
    pub fn incident(&self, vertex: &VertexId) -> bool {
        self.tail == *vertex || self.head == *vertex
    }

    pub fn is_self_loop(&self) -> bool {
        self.tail == self.head
    }

    /// Weight used by path algorithms. Unweighted edges count as one hop.
    pub fn weight_or_unit(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    pub(crate) fn reversed(self) -> Self {
        Self {
            id: self.id,
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::*;
    use crate::Error;

    #[test]
    fn other_end() {
        let mut g = Graph::directed();
        let a = g.insert_vertex(None);
        let b = g.insert_vertex(None);
        let c = g.insert_vertex(None);
        let eid = g.add_edge(a, b, Some(2.0)).unwrap();
        let e = g.edge(&eid).unwrap();
        assert_eq!(e.other_end(&a), Ok(b));
        assert_eq!(e.other_end(&b), Ok(a));
        assert_eq!(
            e.other_end(&c),
            Err(Error::InvalidEndpoint {
                edge: eid,
                vertex: c
            })
        );
        assert!(e.incident(&a));
        assert!(!e.incident(&c));
    }

    #[test]
    fn self_loop_other_end() {
        let mut g = Graph::undirected();
        let a = g.insert_vertex(None);
        let eid = g.add_edge(a, a, None).unwrap();
        let e = g.edge(&eid).unwrap();
        assert!(e.is_self_loop());
        assert_eq!(e.other_end(&a), Ok(a));
        assert_eq!(e.weight_or_unit(), 1.0);
    }
}
