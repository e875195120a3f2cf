use crate::graph::*;
use ahash::RandomState;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A trail through every edge exactly once, in walking order.
///
/// `vertices[i]` and `vertices[i + 1]` are joined by `edges[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EulerTrail {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
}

impl EulerTrail {
    /// Whether the trail ends where it starts.
    pub fn is_circuit(&self) -> bool {
        self.vertices.first() == self.vertices.last()
    }
}

/// Eulerian trails by Hierholzer's algorithm.
///
/// A graph is eligible when it has edges, no isolated vertex, and balanced degrees:
/// in directed graphs every `out - in` is within `-1..=1`,
/// with either no unbalanced vertex or exactly one of each sign;
/// in undirected graphs zero or two vertices have odd degree, a self-loop counting twice.
///
/// Connectivity is not part of eligibility.
/// A disconnected eligible graph yields no trail.
pub trait EulerianPath
where
    Self: QueryableGraph + Sized,
{
    fn has_eulerian_path(&self) -> bool {
        self.eulerian_start().is_some()
    }

    /// Where a trail has to start: the vertex with one more outgoing than incoming edge,
    /// or the first odd-degree vertex, or else the first vertex.
    ///
    /// `None` if the graph is not eligible.
    fn eulerian_start(&self) -> Option<VertexId> {
        Degrees::of(self).start()
    }

    fn euler_path(&self) -> Option<EulerTrail> {
        let start = self.eulerian_start()?;
        let mut walk = Walk::new(self);
        walk.visit_iterative(start);
        walk.finish()
    }

    /// Same as [EulerianPath::euler_path], but recurses once per edge of the trail.
    fn euler_path_recursive(&self) -> Option<EulerTrail> {
        let start = self.eulerian_start()?;
        let mut walk = Walk::new(self);
        walk.visit_recursive(start, None);
        walk.finish()
    }
}

impl<G: QueryableGraph> EulerianPath for G {}

#[derive(Debug, Clone, Copy, Default)]
struct Degree {
    in_degree: usize,
    out_degree: usize,
}

impl Degree {
    fn imbalance(&self) -> i64 {
        self.out_degree as i64 - self.in_degree as i64
    }
}

struct Degrees {
    directed: bool,
    has_edges: bool,
    // in vertex order
    table: Vec<(VertexId, Degree)>,
}

impl Degrees {
    fn of<G: QueryableGraph>(graph: &G) -> Self {
        let mut table: HashMap<VertexId, Degree, RandomState> =
            HashMap::with_capacity_and_hasher(graph.vertex_size(), RandomState::new());
        for e in graph.iter_edges() {
            table.entry(e.tail).or_default().out_degree += 1;
            table.entry(e.head).or_default().in_degree += 1;
        }
        Self {
            directed: graph.is_directed(),
            has_edges: graph.edge_size() > 0,
            table: graph
                .iter_vertices()
                .map(|v| (v, table.get(&v).copied().unwrap_or_default()))
                .collect(),
        }
    }

    fn start(&self) -> Option<VertexId> {
        if !self.has_edges {
            return None;
        }
        if self
            .table
            .iter()
            .any(|(_, d)| d.in_degree == 0 && d.out_degree == 0)
        {
            return None;
        }
        let first = self.table.first().map(|(v, _)| *v);
        if self.directed {
            if self.table.iter().any(|(_, d)| d.imbalance().abs() > 1) {
                return None;
            }
            let starts: Vec<_> = self
                .table
                .iter()
                .filter(|(_, d)| d.imbalance() == 1)
                .map(|(v, _)| *v)
                .collect();
            let ends = self
                .table
                .iter()
                .filter(|(_, d)| d.imbalance() == -1)
                .count();
            match (starts.len(), ends) {
                (0, 0) => first,
                (1, 1) => starts.first().copied(),
                _ => None,
            }
        } else {
            let odd: Vec<_> = self
                .table
                .iter()
                .filter(|(_, d)| (d.in_degree + d.out_degree) % 2 == 1)
                .map(|(v, _)| *v)
                .collect();
            match odd.len() {
                0 => first,
                2 => odd.first().copied(),
                _ => None,
            }
        }
    }
}

struct Walk<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    // remaining edges leaving each vertex, the next one last
    remaining: HashMap<VertexId, Vec<Edge>, RandomState>,
    // an undirected edge sits in both endpoints' lists
    used: HashSet<EdgeId, RandomState>,
    // (vertex, edge walked to reach it), in reverse walking order
    trail: Vec<(VertexId, Option<EdgeId>)>,
}

impl<'a, G> Walk<'a, G>
where
    G: QueryableGraph,
{
    fn new(graph: &'a G) -> Self {
        let mut remaining = HashMap::with_capacity_and_hasher(graph.vertex_size(), RandomState::new());
        for v in graph.iter_vertices() {
            let mut out: Vec<Edge> = graph.out_edges(&v).collect();
            out.reverse();
            remaining.insert(v, out);
        }
        Self {
            graph,
            remaining,
            used: HashSet::with_capacity_and_hasher(graph.edge_size(), RandomState::new()),
            trail: Vec::with_capacity(graph.edge_size() + 1),
        }
    }

    /// Consumes an unused edge leaving `v`, oriented so that its head is the far end.
    fn consume(&mut self, v: &VertexId) -> Option<Edge> {
        let out = self.remaining.get_mut(v)?;
        while let Some(e) = out.pop() {
            if self.used.insert(e.id) {
                return Some(e);
            }
        }
        None
    }

    fn visit_recursive(&mut self, v: VertexId, via: Option<EdgeId>) {
        while let Some(e) = self.consume(&v) {
            self.visit_recursive(e.head, Some(e.id));
        }
        self.trail.push((v, via));
    }

    fn visit_iterative(&mut self, start: VertexId) {
        let mut stack: Vec<(VertexId, Option<EdgeId>)> = vec![(start, None)];
        while let Some((v, _)) = stack.last().copied() {
            match self.consume(&v) {
                Some(e) => stack.push((e.head, Some(e.id))),
                None => {
                    if let Some(top) = stack.pop() {
                        self.trail.push(top);
                    }
                }
            }
        }
    }

    fn finish(self) -> Option<EulerTrail> {
        let expected = self.graph.edge_size() + 1;
        debug!(
            expected,
            walked = self.trail.len(),
            "hierholzer finished"
        );
        if self.trail.len() != expected {
            return None;
        }
        let mut vertices = Vec::with_capacity(expected);
        let mut edges = Vec::with_capacity(expected - 1);
        for (v, via) in self.trail.into_iter().rev() {
            vertices.push(v);
            edges.extend(via);
        }
        Some(EulerTrail { vertices, edges })
    }
}
