use crate::collections::IndexedMinHeap;
use crate::graph::*;
use crate::Result;
use ahash::RandomState;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace, warn};

/// Single-source shortest paths.
///
/// Edges without a weight count as one hop.
/// The directed variants follow edges from tail to head as stored, even on undirected graphs;
/// the undirected ones relax every edge in both directions.
///
/// Negative weights never abort a run.
/// They are reported as [Advisory]s, both in the result and as `tracing` warnings,
/// and the distances of vertices reachable from the offending edges are flagged unreliable.
pub trait ShortestPaths
where
    Self: QueryableGraph + Sized,
{
    /// Dijkstra's algorithm, directed or not as the graph is.
    fn dijkstra(&self, start: &VertexId) -> Result<ShortestPathTree> {
        run_dijkstra(self, start, self.is_directed())
    }

    fn dijkstra_directed(&self, start: &VertexId) -> Result<ShortestPathTree> {
        run_dijkstra(self, start, true)
    }

    fn dijkstra_undirected(&self, start: &VertexId) -> Result<ShortestPathTree> {
        run_dijkstra(self, start, false)
    }

    /// The Bellman-Ford algorithm, directed or not as the graph is.
    fn bellman_ford(&self, start: &VertexId) -> Result<ShortestPathTree> {
        run_bellman_ford(self, start, self.is_directed())
    }

    fn bellman_ford_directed(&self, start: &VertexId) -> Result<ShortestPathTree> {
        run_bellman_ford(self, start, true)
    }

    fn bellman_ford_undirected(&self, start: &VertexId) -> Result<ShortestPathTree> {
        run_bellman_ford(self, start, false)
    }
}

impl<G: QueryableGraph> ShortestPaths for G {}

/// A non-fatal condition which makes some distances unreliable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advisory {
    /// Dijkstra met an edge of negative weight.
    NegativeEdgeWeight { edge: EdgeId, weight: f64 },
    /// After Bellman-Ford settled, this edge could still be relaxed.
    NegativeCycle { edge: EdgeId },
}

/// Distances and predecessor edges from a start vertex.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    start: VertexId,
    distances: HashMap<VertexId, f64, RandomState>,
    predecessors: HashMap<VertexId, EdgeId, RandomState>,
    advisories: Vec<Advisory>,
    unreliable: HashSet<VertexId, RandomState>,
}

impl ShortestPathTree {
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Distance from the start, or infinity for unreachable vertices.
    pub fn distance(&self, v: &VertexId) -> f64 {
        self.distances.get(v).copied().unwrap_or(f64::INFINITY)
    }

    /// The edge through which `v` was last improved.
    pub fn predecessor_edge(&self, v: &VertexId) -> Option<EdgeId> {
        self.predecessors.get(v).copied()
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn is_reliable(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn is_reliable_for(&self, v: &VertexId) -> bool {
        !self.unreliable.contains(v)
    }

    /// Edges from the start to `v` following predecessor edges.
    ///
    /// `None` if `v` is unreachable, or if predecessors run in circles, which negative cycles may cause.
    pub fn path_to<G>(&self, graph: &G, v: &VertexId) -> Option<Vec<EdgeId>>
    where
        G: QueryableGraph,
    {
        if self.distance(v) == f64::INFINITY {
            return None;
        }
        let mut res = vec![];
        let mut cur = *v;
        while cur != self.start {
            if res.len() >= graph.vertex_size() {
                return None;
            }
            let eid = self.predecessor_edge(&cur)?;
            let edge = graph.edge(&eid)?;
            res.push(eid);
            cur = edge.other_end(&cur).ok()?;
        }
        res.reverse();
        Some(res)
    }
}

struct Search<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    start: VertexId,
    directed: bool,
    distances: HashMap<VertexId, f64, RandomState>,
    predecessors: HashMap<VertexId, EdgeId, RandomState>,
    advisories: Vec<Advisory>,
    suspects: Vec<VertexId>,
}

impl<'a, G> Search<'a, G>
where
    G: QueryableGraph,
{
    fn init(graph: &'a G, start: &VertexId, directed: bool) -> Result<Self> {
        graph.check_vertex(start)?;
        let mut distances =
            HashMap::with_capacity_and_hasher(graph.vertex_size(), RandomState::new());
        for v in graph.iter_vertices() {
            distances.insert(v, f64::INFINITY);
        }
        distances.insert(*start, 0.0);
        Ok(Self {
            graph,
            start: *start,
            directed,
            distances,
            predecessors: HashMap::with_hasher(RandomState::new()),
            advisories: vec![],
            suspects: vec![],
        })
    }

    fn dist(&self, v: &VertexId) -> f64 {
        self.distances.get(v).copied().unwrap_or(f64::INFINITY)
    }

    fn improves(&self, edge: &Edge, u: &VertexId, v: &VertexId) -> bool {
        self.dist(u) + edge.weight_or_unit() < self.dist(v)
    }

    fn relax_along(&mut self, edge: &Edge, u: VertexId, v: VertexId) -> bool {
        if v == self.start || !self.improves(edge, &u, &v) {
            return false;
        }
        let d = self.dist(&u) + edge.weight_or_unit();
        trace!(edge = ?edge.id, vertex = ?v, distance = d, "relaxed");
        self.distances.insert(v, d);
        self.predecessors.insert(v, edge.id);
        true
    }

    /// Relaxes `edge` and returns the vertices whose distances improved.
    fn relax(&mut self, edge: &Edge) -> Vec<VertexId> {
        let mut improved = vec![];
        if self.relax_along(edge, edge.tail, edge.head) {
            improved.push(edge.head);
        }
        if !self.directed && self.relax_along(edge, edge.head, edge.tail) {
            improved.push(edge.tail);
        }
        improved
    }

    fn still_relaxable(&self, edge: &Edge) -> bool {
        self.improves(edge, &edge.tail, &edge.head)
            || (!self.directed && self.improves(edge, &edge.head, &edge.tail))
    }

    fn suspect(&mut self, edge: &Edge) {
        self.suspects.push(edge.head);
        if !self.directed {
            self.suspects.push(edge.tail);
        }
    }

    fn finish(self) -> ShortestPathTree {
        let unreliable = self.reachable_from_suspects();
        ShortestPathTree {
            start: self.start,
            distances: self.distances,
            predecessors: self.predecessors,
            advisories: self.advisories,
            unreliable,
        }
    }

    fn reachable_from_suspects(&self) -> HashSet<VertexId, RandomState> {
        let mut seen = HashSet::with_hasher(RandomState::new());
        let mut queue: VecDeque<VertexId> = self.suspects.iter().copied().collect();
        while let Some(v) = queue.pop_front() {
            if !seen.insert(v) {
                continue;
            }
            for e in leaving(self.graph, v, self.directed) {
                if let Ok(w) = e.other_end(&v) {
                    if !seen.contains(&w) {
                        queue.push_back(w);
                    }
                }
            }
        }
        seen
    }
}

/// Edges to relax from `v`: those with `v` as tail in stored orientation when `directed`,
/// whatever the graph itself is, or else every incident edge.
fn leaving<G>(graph: &G, v: VertexId, directed: bool) -> Box<dyn Iterator<Item = Edge> + '_>
where
    G: QueryableGraph,
{
    if directed {
        Box::new(graph.incidence(&v).filter(move |e| e.tail == v))
    } else {
        graph.incidence(&v)
    }
}

fn by_distance(
    distances: &HashMap<VertexId, f64, RandomState>,
) -> impl Fn(&VertexId, &VertexId) -> Ordering + '_ {
    move |a: &VertexId, b: &VertexId| {
        let da = distances.get(a).copied().unwrap_or(f64::INFINITY);
        let db = distances.get(b).copied().unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    }
}

fn run_dijkstra<G>(graph: &G, start: &VertexId, directed: bool) -> Result<ShortestPathTree>
where
    G: QueryableGraph,
{
    let mut search = Search::init(graph, start, directed)?;
    let mut heap = IndexedMinHeap::with_capacity(graph.vertex_size());
    for v in graph.iter_vertices() {
        heap.insert(v, by_distance(&search.distances));
    }
    let mut warned: HashSet<EdgeId, RandomState> = HashSet::with_hasher(RandomState::new());
    while !heap.is_empty() {
        let u = heap.extract_min(by_distance(&search.distances))?;
        for e in leaving(graph, u, directed) {
            let weight = e.weight_or_unit();
            if weight < 0.0 && warned.insert(e.id) {
                warn!(
                    edge = ?e.id,
                    weight,
                    "negative edge weight, dijkstra will not provide a proper answer"
                );
                search
                    .advisories
                    .push(Advisory::NegativeEdgeWeight { edge: e.id, weight });
                search.suspect(&e);
            }
            for v in search.relax(&e) {
                heap.decrease_key(&v, by_distance(&search.distances));
            }
        }
    }
    debug!(
        vertices = graph.vertex_size(),
        advisories = search.advisories.len(),
        "dijkstra finished"
    );
    Ok(search.finish())
}

fn run_bellman_ford<G>(graph: &G, start: &VertexId, directed: bool) -> Result<ShortestPathTree>
where
    G: QueryableGraph,
{
    let mut search = Search::init(graph, start, directed)?;
    let edges: Vec<Edge> = graph.iter_edges().collect();
    let max_passes = graph.vertex_size().saturating_sub(1);
    let mut passes = 0;
    while passes < max_passes {
        passes += 1;
        let mut changed = false;
        for e in edges.iter() {
            if !search.relax(e).is_empty() {
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    for e in edges.iter() {
        if search.still_relaxable(e) {
            warn!(
                edge = ?e.id,
                tail_distance = search.dist(&e.tail),
                head_distance = search.dist(&e.head),
                weight = e.weight_or_unit(),
                "negative cycle detected, triangle inequality violated after n-1 passes"
            );
            search.advisories.push(Advisory::NegativeCycle { edge: e.id });
            search.suspect(e);
        }
    }
    debug!(
        passes,
        advisories = search.advisories.len(),
        "bellman-ford finished"
    );
    Ok(search.finish())
}
