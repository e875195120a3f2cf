use crate::graph::*;
use crate::{Error, Result, Violation};
use std::collections::{BTreeMap, BTreeSet};

/// A multigraph, either directed or undirected, optionally restricted to simple graphs.
///
/// Each vertex keeps an incidence map from its neighbours to the edges joining them,
/// so multi-edges and self-loops are first-class.
/// Vertices and edges are iterated in their creation order.
///
/// | Operation          | Complexity                                                                 |
/// | ------------------ | -------------------------------------------------------------------------- |
/// | `add_vertex`       | $O(\log \|V\|)$                                                            |
/// | `add_edge`         | $O(\log \|V\| + \log \|E\|)$                                               |
/// | `remove_edge`      | $O(\log \|V\| + \log \|E\|)$                                               |
/// | `remove_vertex`    | $O(\|E'\| (\log \|V\| + \log \|E\|))$, where $E'$ are the incident edges.  |
/// | `find_edge`        | $O(\log \|V\| + \|E'\|)$, where $E'$ are the edges joining the two.        |
/// | `is_adjacent`      | $O(\log \|V\| + \|E'\|)$, where $E'$ are the edges joining the two.        |
/// | `incidence`        | $O(\|E'\| \log \|E'\|)$, where $E'$ are the incident edges.                |
///
/// A graph is not `Clone`: a copy must not share its identity.
/// Use [Graph::duplicate] instead.
pub struct Graph {
    id: GraphId,
    directed: bool,
    simple: bool,
    vid_factory: VertexIdFactory,
    eid_factory: EdgeIdFactory,
    next_label: usize,
    created: BTreeMap<VertexId, String>,
    vertices: BTreeMap<VertexId, VertexEntry>,
    edges: BTreeMap<EdgeId, EdgeEntry>,
}

struct VertexEntry {
    label: String,
    incidence: BTreeMap<VertexId, BTreeSet<EdgeId>>,
}

#[derive(Clone, Copy)]
struct EdgeEntry {
    tail: VertexId,
    head: VertexId,
    weight: Option<f64>,
}

impl EdgeEntry {
    fn to_edge(self, id: EdgeId) -> Edge {
        Edge {
            id,
            tail: self.tail,
            head: self.head,
            weight: self.weight,
        }
    }
}

impl Graph {
    pub fn new(directed: bool, simple: bool) -> Self {
        let id = GraphId::fresh();
        Self {
            id,
            directed,
            simple,
            vid_factory: VertexIdFactory::new(id),
            eid_factory: EdgeIdFactory::new(id),
            next_label: 0,
            created: BTreeMap::new(),
            vertices: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn directed() -> Self {
        Self::new(true, false)
    }

    pub fn undirected() -> Self {
        Self::new(false, false)
    }

    /// A graph which refuses self-loops and parallel edges.
    pub fn simple(directed: bool) -> Self {
        Self::new(directed, true)
    }

    /// Allocates a vertex of this graph without making it a member yet.
    ///
    /// Without a label, the vertex is labelled by a per-graph counter.
    /// Labels need not be unique; reusing one only makes the output of `debug` ambiguous.
    pub fn create_vertex(&mut self, label: Option<&str>) -> VertexId {
        let vid = self.vid_factory.one_more();
        let label = match label {
            Some(l) => l.to_owned(),
            None => self.next_label(),
        };
        self.created.insert(vid, label);
        vid
    }

    /// Creates a vertex and adds it right away.
    pub fn insert_vertex(&mut self, label: Option<&str>) -> VertexId {
        let vid = self.create_vertex(label);
        self.add_vertex_unchecked(vid);
        vid
    }

    /// Makes a created vertex a member. Adding a member again changes nothing.
    pub fn add_vertex(&mut self, v: VertexId) -> Result<()> {
        if v.graph() != self.id {
            return Err(Error::ForeignVertex(v));
        }
        if self.vertices.contains_key(&v) {
            return Ok(());
        }
        if !self.created.contains_key(&v) {
            return Err(Error::UnknownVertex(v));
        }
        self.add_vertex_unchecked(v);
        Ok(())
    }

    /// Adds a created vertex without checking who owns it.
    pub fn add_vertex_unchecked(&mut self, v: VertexId) {
        debug_assert_eq!(v.graph(), self.id);
        if let Some(label) = self.created.remove(&v) {
            self.vertices.insert(
                v,
                VertexEntry {
                    label,
                    incidence: BTreeMap::new(),
                },
            );
        }
    }

    /// Adds an edge from `tail` to `head`.
    ///
    /// Endpoints which are created but not yet members are added as well.
    /// On simple graphs, self-loops and parallel edges are refused.
    pub fn add_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Option<f64>,
    ) -> Result<EdgeId> {
        self.check_known_vertex(&tail)?;
        self.check_known_vertex(&head)?;
        if self.simple {
            if tail == head {
                return Err(Error::GraphConstraintViolation(
                    Violation::SelfLoopNotAllowed,
                ));
            }
            if self.is_adjacent(&tail, &head) {
                return Err(Error::GraphConstraintViolation(
                    Violation::MultiEdgeNotAllowed,
                ));
            }
        }
        self.add_vertex_unchecked(tail);
        self.add_vertex_unchecked(head);
        Ok(self.add_edge_unchecked(tail, head, weight))
    }

    /// Adds an edge between two members with neither simple-graph nor membership checks.
    ///
    /// Meant for constructions which are correct by design.
    pub fn add_edge_unchecked(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Option<f64>,
    ) -> EdgeId {
        debug_assert!(self.vertices.contains_key(&tail));
        debug_assert!(self.vertices.contains_key(&head));
        let eid = self.eid_factory.one_more();
        self.edges.insert(eid, EdgeEntry { tail, head, weight });
        if let Some(entry) = self.vertices.get_mut(&tail) {
            entry.incidence.entry(head).or_default().insert(eid);
        }
        if let Some(entry) = self.vertices.get_mut(&head) {
            entry.incidence.entry(tail).or_default().insert(eid);
        }
        eid
    }

    /// Removes an edge and detaches it from both endpoints.
    pub fn remove_edge(&mut self, e: &EdgeId) -> Result<Edge> {
        if e.graph() != self.id {
            return Err(Error::ForeignEdge(*e));
        }
        let entry = self.edges.remove(e).ok_or(Error::UnknownEdge(*e))?;
        self.detach(&entry.tail, &entry.head, e);
        self.detach(&entry.head, &entry.tail, e);
        Ok(entry.to_edge(*e))
    }

    fn detach(&mut self, from: &VertexId, to: &VertexId, e: &EdgeId) {
        if let Some(entry) = self.vertices.get_mut(from) {
            if let Some(es) = entry.incidence.get_mut(to) {
                es.remove(e);
                if es.is_empty() {
                    entry.incidence.remove(to);
                }
            }
        }
    }

    /// Removes a vertex with all edges touching it and returns these edges.
    pub fn remove_vertex(&mut self, v: &VertexId) -> Result<Vec<Edge>> {
        if v.graph() != self.id {
            return Err(Error::ForeignVertex(*v));
        }
        if self.created.remove(v).is_some() {
            return Ok(vec![]);
        }
        let eids: BTreeSet<EdgeId> = match self.vertices.get(v) {
            None => return Err(Error::UnknownVertex(*v)),
            Some(entry) => entry.incidence.values().flatten().copied().collect(),
        };
        let mut res = Vec::with_capacity(eids.len());
        for eid in eids.iter() {
            res.push(self.remove_edge(eid)?);
        }
        self.vertices.remove(v);
        Ok(res)
    }

    /// Edges from `u` to `v` for directed graphs or between them for undirected ones.
    pub fn find_edge(&self, u: &VertexId, v: &VertexId) -> BTreeSet<EdgeId> {
        self.edges_connecting(u, v).map(|e| e.id).collect()
    }

    /// Whether an edge leads from `u` to `v`, or joins them when undirected.
    pub fn is_adjacent(&self, u: &VertexId, v: &VertexId) -> bool {
        self.edges_connecting(u, v).next().is_some()
    }

    pub fn neighbours(&self, v: &VertexId) -> Vec<VertexId> {
        self.vertices
            .get(v)
            .map(|entry| entry.incidence.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of edge ends at `v`. A self-loop counts twice.
    pub fn degree(&self, v: &VertexId) -> usize {
        self.incidence(v)
            .map(|e| if e.is_self_loop() { 2 } else { 1 })
            .sum()
    }

    pub fn out_degree(&self, v: &VertexId) -> usize {
        self.out_edges(v).count()
    }

    pub fn in_degree(&self, v: &VertexId) -> usize {
        self.in_edges(v).count()
    }

    fn check_known_vertex(&self, v: &VertexId) -> Result<()> {
        if v.graph() != self.id {
            Err(Error::ForeignVertex(*v))
        } else if self.vertices.contains_key(v) || self.created.contains_key(v) {
            Ok(())
        } else {
            Err(Error::UnknownVertex(*v))
        }
    }

    fn next_label(&mut self) -> String {
        let res = self.next_label;
        self.next_label += 1;
        res.to_string()
    }
}

impl QueryableGraph for Graph {
    fn graph_id(&self) -> GraphId {
        self.id
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn is_simple(&self) -> bool {
        self.simple
    }

    fn vertex_size(&self) -> usize {
        self.vertices.len()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new(self.vertices.keys().copied())
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        self.vertices.contains_key(v)
    }

    fn label(&self, v: &VertexId) -> Option<&str> {
        self.vertices
            .get(v)
            .map(|entry| entry.label.as_str())
            .or_else(|| self.created.get(v).map(|l| l.as_str()))
    }

    fn edge_size(&self) -> usize {
        self.edges.len()
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        Box::new(self.edges.iter().map(|(id, entry)| entry.to_edge(*id)))
    }

    fn contains_edge(&self, e: &EdgeId) -> bool {
        self.edges.contains_key(e)
    }

    fn edge(&self, e: &EdgeId) -> Option<Edge> {
        self.edges.get(e).map(|entry| entry.to_edge(*e))
    }

    fn edges_connecting(
        &self,
        source: &VertexId,
        sink: &VertexId,
    ) -> Box<dyn Iterator<Item = Edge> + '_> {
        let es = match self.vertices.get(source).and_then(|x| x.incidence.get(sink)) {
            None => return Box::new(std::iter::empty()),
            Some(es) => es,
        };
        let source = *source;
        let sink = *sink;
        let directed = self.directed;
        let it = es
            .iter()
            .filter_map(move |eid| self.edge(eid))
            .filter(move |e| !directed || (e.tail == source && e.head == sink));
        Box::new(it)
    }

    fn incidence(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        let eids: BTreeSet<EdgeId> = match self.vertices.get(v) {
            None => return Box::new(std::iter::empty()),
            Some(entry) => entry.incidence.values().flatten().copied().collect(),
        };
        Box::new(eids.into_iter().filter_map(move |eid| self.edge(&eid)))
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        let v = *v;
        if self.directed {
            Box::new(self.incidence(&v).filter(move |e| e.head == v))
        } else {
            Box::new(
                self.incidence(&v)
                    .map(move |e| if e.head == v { e } else { e.reversed() }),
            )
        }
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        let v = *v;
        if self.directed {
            Box::new(self.incidence(&v).filter(move |e| e.tail == v))
        } else {
            Box::new(
                self.incidence(&v)
                    .map(move |e| if e.tail == v { e } else { e.reversed() }),
            )
        }
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph(directed={}, simple={}) {{",
            self.directed, self.simple
        )?;
        write!(f, "{:?}", self.debug().indent(2, 2))?;
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let vs: Vec<_> = self.vertices.values().map(|x| x.label.as_str()).collect();
        write!(f, "V=[{}]\nE=[", vs.join(", "))?;
        for (i, e) in self.edges.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "({}, {})",
                self.label(&e.tail).unwrap_or("?"),
                self.label(&e.head).unwrap_or("?")
            )?;
        }
        write!(f, "]")
    }
}
