use std::sync::atomic::{AtomicUsize, Ordering};

/// Identity of a graph instance.
///
/// Each graph draws a fresh one when it is constructed,
/// and every vertex and edge ID carries the one of the graph owning it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct GraphId(usize);

static NEXT_GRAPH_ID: AtomicUsize = AtomicUsize::new(0);

impl GraphId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn to_raw(&self) -> usize {
        self.0
    }
}

/// ID for vertices, which are essentially `usize` tagged with their graph.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VertexId {
    graph: GraphId,
    raw: usize,
}

/// A factory to generate `VertexId` uniquely within a graph.
#[derive(Clone)]
pub struct VertexIdFactory {
    graph: GraphId,
    next: usize,
}

impl VertexIdFactory {
    pub fn new(graph: GraphId) -> Self {
        Self { graph, next: 0 }
    }

    pub fn one_more(&mut self) -> VertexId {
        let cur = self.next;
        self.next += 1;
        VertexId {
            graph: self.graph,
            raw: cur,
        }
    }
}

impl VertexId {
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn to_raw(&self) -> usize {
        self.raw
    }
}
