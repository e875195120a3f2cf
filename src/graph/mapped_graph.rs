use crate::graph::*;
use crate::Result;
use ahash::RandomState;
use bimap::BiHashMap;
use std::collections::HashSet;

/// This wraps a graph and how its vertices and edges are mapped from other graphs.
///
/// Left sides of `vmap` and `emap` are IDs in `graph`; right sides are IDs in the source graphs.
/// Sources are never aliased: every vertex and edge of `graph` is a fresh one.
pub struct MappedGraph {
    pub graph: Graph,
    pub vmap: BiHashMap<VertexId, VertexId>,
    pub emap: BiHashMap<EdgeId, EdgeId>,
}

impl MappedGraph {
    fn new(directed: bool, simple: bool) -> Self {
        Self {
            graph: Graph::new(directed, simple),
            vmap: BiHashMap::new(),
            emap: BiHashMap::new(),
        }
    }

    /// The vertex in `graph` which was copied from `source`.
    pub fn vertex_from(&self, source: &VertexId) -> Option<VertexId> {
        self.vmap.get_by_right(source).copied()
    }

    /// The source vertex `v` of `graph` was copied from.
    pub fn source_of_vertex(&self, v: &VertexId) -> Option<VertexId> {
        self.vmap.get_by_left(v).copied()
    }

    pub fn edge_from(&self, source: &EdgeId) -> Option<EdgeId> {
        self.emap.get_by_right(source).copied()
    }

    pub fn source_of_edge(&self, e: &EdgeId) -> Option<EdgeId> {
        self.emap.get_by_left(e).copied()
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    fn copy_vertices(&mut self, from: &Graph) {
        for v in from.iter_vertices() {
            let new_v = self.graph.insert_vertex(from.label(&v));
            self.vmap.insert(new_v, v);
        }
    }

    fn copy_edges(&mut self, from: &Graph) -> Result<()> {
        for e in from.iter_edges() {
            let (tail, head) = match (self.vertex_from(&e.tail), self.vertex_from(&e.head)) {
                (Some(tail), Some(head)) => (tail, head),
                _ => continue,
            };
            let new_e = self.graph.add_edge(tail, head, e.weight)?;
            self.emap.insert(new_e, e.id);
        }
        Ok(())
    }

    fn copy_from(&mut self, from: &Graph) -> Result<()> {
        self.copy_vertices(from);
        self.copy_edges(from)
    }
}

impl Graph {
    /// An exact copy with fresh identities.
    pub fn duplicate(&self) -> MappedGraph {
        let mut res = MappedGraph::new(self.is_directed(), self.is_simple());
        res.copy_vertices(self);
        for e in self.iter_edges() {
            if let (Some(tail), Some(head)) = (res.vertex_from(&e.tail), res.vertex_from(&e.head))
            {
                let new_e = res.graph.add_edge_unchecked(tail, head, e.weight);
                res.emap.insert(new_e, e.id);
            }
        }
        res
    }

    /// Disjoint union of two graphs.
    ///
    /// The result is directed if either operand is, and simple if either operand is.
    /// Copying a non-simple operand into a simple result may fail.
    pub fn union(&self, other: &Graph) -> Result<MappedGraph> {
        let mut res = MappedGraph::new(
            self.is_directed() || other.is_directed(),
            self.is_simple() || other.is_simple(),
        );
        res.copy_from(self)?;
        res.copy_from(other)?;
        Ok(res)
    }

    /// A copy of `self` without edges whose endpoint labels match an edge of `other`.
    ///
    /// When `self` is undirected, matching ignores orientation. Vertices are all kept.
    ///
    /// Only labels are compared, never ids. Auto-labels (`"0"`, `"1"`, ...) restart in every graph,
    /// so two unrelated graphs built with them share labels and their edges match.
    /// Give vertices distinct labels when that is not intended.
    pub fn difference(&self, other: &Graph) -> MappedGraph {
        let mut res = self.duplicate();
        let mut doomed: HashSet<(&str, &str), RandomState> = HashSet::with_hasher(RandomState::new());
        for e in other.iter_edges() {
            if let (Some(tail), Some(head)) = (other.label(&e.tail), other.label(&e.head)) {
                doomed.insert((tail, head));
                if !self.is_directed() {
                    doomed.insert((head, tail));
                }
            }
        }
        let to_remove: Vec<EdgeId> = self
            .iter_edges()
            .filter(|e| match (self.label(&e.tail), self.label(&e.head)) {
                (Some(tail), Some(head)) => doomed.contains(&(tail, head)),
                _ => false,
            })
            .filter_map(|e| res.edge_from(&e.id))
            .collect();
        for eid in to_remove {
            if res.graph.remove_edge(&eid).is_ok() {
                res.emap.remove_by_left(&eid);
            }
        }
        res
    }

    /// The complement: same vertices and flags, with an edge joining every non-adjacent pair.
    ///
    /// Self-loops are added to loop-free vertices only when `self` is not simple.
    /// Edges of the complement carry no weight and map to no source edge.
    pub fn complement(&self) -> MappedGraph {
        let mut res = MappedGraph::new(self.is_directed(), self.is_simple());
        res.copy_vertices(self);
        let vs: Vec<VertexId> = self.iter_vertices().collect();
        for (i, u) in vs.iter().enumerate() {
            let candidates = if self.is_directed() { &vs[..] } else { &vs[i..] };
            for v in candidates {
                if u == v && self.is_simple() {
                    continue;
                }
                if self.is_adjacent(u, v) {
                    continue;
                }
                if let (Some(tail), Some(head)) = (res.vertex_from(u), res.vertex_from(v)) {
                    res.graph.add_edge_unchecked(tail, head, None);
                }
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::*;
    use crate::{Error, Violation};
    use quickcheck_macros::quickcheck;

    fn path(directed: bool, simple: bool, labels: &[&str]) -> Graph {
        let mut g = Graph::new(directed, simple);
        let vs: Vec<_> = labels.iter().map(|l| g.insert_vertex(Some(l))).collect();
        for w in vs.windows(2) {
            g.add_edge(w[0], w[1], Some(1.0)).unwrap();
        }
        g
    }

    #[test]
    fn union_is_disjoint() {
        let a = path(true, false, &["a", "b"]);
        let b = path(false, false, &["c", "d", "e"]);
        let u = a.union(&b).unwrap();
        assert!(u.graph.is_directed());
        assert!(!u.graph.is_simple());
        assert_eq!(u.graph.vertex_size(), 5);
        assert_eq!(u.graph.edge_size(), 3);
        for v in a.iter_vertices().chain(b.iter_vertices()) {
            let new_v = u.vertex_from(&v).unwrap();
            assert_ne!(new_v, v);
            assert_eq!(u.graph.label(&new_v), a.label(&v).or_else(|| b.label(&v)));
            assert_eq!(u.source_of_vertex(&new_v), Some(v));
        }
        for e in a.iter_edges().chain(b.iter_edges()) {
            let new_e = u.graph.edge(&u.edge_from(&e.id).unwrap()).unwrap();
            assert_eq!(Some(new_e.tail), u.vertex_from(&e.tail));
            assert_eq!(Some(new_e.head), u.vertex_from(&e.head));
            assert_eq!(new_e.weight, e.weight);
        }
    }

    #[test]
    fn union_into_simple_may_fail() {
        let simple = path(false, true, &["a", "b"]);
        let mut multi = Graph::undirected();
        let x = multi.insert_vertex(None);
        multi.add_edge(x, x, None).unwrap();
        assert_eq!(
            simple.union(&multi).err(),
            Some(Error::GraphConstraintViolation(
                Violation::SelfLoopNotAllowed
            ))
        );
    }

    #[test]
    fn difference_by_labels() {
        let a = path(false, false, &["a", "b", "c"]);
        let b = path(false, false, &["c", "b"]);
        let d = a.difference(&b);
        assert_eq!(d.graph.vertex_size(), 3);
        assert_eq!(d.graph.edge_size(), 1);
        let e = d.graph.iter_edges().next().unwrap();
        assert_eq!(d.graph.label(&e.tail), Some("a"));
        assert_eq!(d.graph.label(&e.head), Some("b"));
        assert_eq!(d.emap.len(), 1);

        let da = path(true, false, &["a", "b", "c"]);
        let db = path(true, false, &["c", "b"]);
        assert_eq!(da.difference(&db).graph.edge_size(), 2);
    }

    #[test]
    fn difference_matches_auto_labels_across_graphs() {
        let mut a = Graph::directed();
        let a0 = a.insert_vertex(None);
        let a1 = a.insert_vertex(None);
        a.add_edge(a0, a1, None).unwrap();
        let mut b = Graph::directed();
        let b0 = b.insert_vertex(None);
        let b1 = b.insert_vertex(None);
        b.add_edge(b0, b1, None).unwrap();
        assert_eq!(a.difference(&b).graph.edge_size(), 0);

        let mut c = Graph::directed();
        let c0 = c.insert_vertex(Some("x"));
        let c1 = c.insert_vertex(Some("y"));
        c.add_edge(c0, c1, None).unwrap();
        assert_eq!(a.difference(&c).graph.edge_size(), 1);
    }

    #[test]
    fn complement_of_simple_path() {
        let g = path(false, true, &["a", "b", "c"]);
        let c = g.complement();
        assert_eq!(c.graph.edge_size(), 1);
        let e = c.graph.iter_edges().next().unwrap();
        assert_eq!(c.graph.label(&e.tail), Some("a"));
        assert_eq!(c.graph.label(&e.head), Some("c"));

        let dg = path(true, true, &["a", "b", "c"]);
        assert_eq!(dg.complement().graph.edge_size(), 6 - 2);
    }

    #[test]
    fn complement_adds_loops_when_not_simple() {
        let g = path(false, false, &["a", "b"]);
        assert_eq!(g.complement().graph.edge_size(), 2);
    }

    #[quickcheck]
    fn duplicate_has_same_shape(rg: RandomGraph, directed: bool) {
        let (g, _) = rg.build(directed, 0.0);
        let d = g.duplicate();
        assert_eq!(d.graph.vertex_size(), g.vertex_size());
        assert_eq!(d.graph.edge_size(), g.edge_size());
        for e in g.iter_edges() {
            let new_e = d.graph.edge(&d.edge_from(&e.id).unwrap()).unwrap();
            assert_eq!(d.source_of_vertex(&new_e.tail), Some(e.tail));
            assert_eq!(d.source_of_vertex(&new_e.head), Some(e.head));
        }
    }

    #[quickcheck]
    fn complement_of_simple_graph_partitions_pairs(rg: RandomGraph, directed: bool) {
        let mut g = Graph::simple(directed);
        let vs: Vec<_> = (0..rg.vertex_size).map(|_| g.insert_vertex(None)).collect();
        for (tail, head, _) in rg.edges.iter() {
            let _ = g.add_edge(vs[*tail], vs[*head], None);
        }
        let c = g.complement();
        let n = g.vertex_size();
        let pairs = if directed { n * (n - 1) } else { n * (n - 1) / 2 };
        assert_eq!(g.edge_size() + c.graph.edge_size(), pairs);
        for u in vs.iter() {
            for v in vs.iter() {
                if u == v {
                    continue;
                }
                let (cu, cv) = (c.vertex_from(u).unwrap(), c.vertex_from(v).unwrap());
                assert_ne!(g.is_adjacent(u, v), c.graph.is_adjacent(&cu, &cv));
            }
        }
    }
}
