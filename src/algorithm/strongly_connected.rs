use crate::collections::BoundedStack;
use crate::graph::*;
use ahash::RandomState;
use std::collections::HashMap;
use tracing::debug;

/// Tarjan's strongly connected components.
///
/// Components are complete and pairwise disjoint, but come in no particular order.
/// Self-loops are ignored.
/// On undirected graphs, components are the connected components.
pub trait StronglyConnectedComponents
where
    Self: QueryableGraph + Sized,
{
    /// Walks the graph with explicit frames, so deep graphs are fine.
    fn find_scc(&self) -> Vec<Vec<VertexId>> {
        let mut tarjan = Tarjan::new(self);
        for v in self.iter_vertices() {
            if !tarjan.marks.contains_key(&v) {
                tarjan.visit_iterative(v);
            }
        }
        tarjan.finish()
    }

    /// Same as [StronglyConnectedComponents::find_scc], but recurses once per vertex on the DFS path.
    fn find_scc_recursive(&self) -> Vec<Vec<VertexId>> {
        let mut tarjan = Tarjan::new(self);
        for v in self.iter_vertices() {
            if !tarjan.marks.contains_key(&v) {
                tarjan.visit_recursive(v);
            }
        }
        tarjan.finish()
    }
}

impl<G: QueryableGraph> StronglyConnectedComponents for G {}

#[derive(Debug, Clone, Copy)]
struct Mark {
    dfs: usize,
    low: usize,
    finalized: bool,
}

struct Tarjan<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    counter: usize,
    // a vertex is visited iff it is marked
    marks: HashMap<VertexId, Mark, RandomState>,
    stack: BoundedStack<VertexId>,
    components: Vec<Vec<VertexId>>,
}

impl<'a, G> Tarjan<'a, G>
where
    G: QueryableGraph,
{
    fn new(graph: &'a G) -> Self {
        Self {
            graph,
            counter: 0,
            marks: HashMap::with_capacity_and_hasher(graph.vertex_size(), RandomState::new()),
            stack: BoundedStack::with_capacity(graph.vertex_size()),
            components: vec![],
        }
    }

    fn finish(self) -> Vec<Vec<VertexId>> {
        debug!(
            vertices = self.graph.vertex_size(),
            components = self.components.len(),
            "tarjan finished"
        );
        self.components
    }

    fn discover(&mut self, v: VertexId) {
        self.marks.insert(
            v,
            Mark {
                dfs: self.counter,
                low: self.counter,
                finalized: false,
            },
        );
        self.counter += 1;
        // each vertex is discovered once, so the stack never exceeds |V|
        let pushed = self.stack.push(v);
        debug_assert!(pushed.is_ok());
    }

    fn successors(&self, v: &VertexId) -> Vec<VertexId> {
        self.graph
            .out_edges(v)
            .filter(|e| !e.is_self_loop())
            .map(|e| e.head)
            .collect()
    }

    fn low(&self, v: &VertexId) -> usize {
        self.marks.get(v).map_or(usize::MAX, |m| m.low)
    }

    fn lower(&mut self, v: &VertexId, to: usize) {
        if let Some(m) = self.marks.get_mut(v) {
            m.low = m.low.min(to);
        }
    }

    /// Handles the edge `v -> w` of an already visited `w`.
    fn touch(&mut self, v: &VertexId, w: &VertexId) {
        if let Some(m) = self.marks.get(w).copied() {
            if !m.finalized {
                self.lower(v, m.dfs);
            }
        }
    }

    /// Emits the component rooted at `v`, if `v` is a root.
    fn close(&mut self, v: &VertexId) {
        let is_root = match self.marks.get(v) {
            Some(m) => m.low == m.dfs,
            None => false,
        };
        if !is_root {
            return;
        }
        let mut component = vec![];
        while let Ok(w) = self.stack.pop() {
            if let Some(m) = self.marks.get_mut(&w) {
                m.finalized = true;
            }
            component.push(w);
            if w == *v {
                break;
            }
        }
        self.components.push(component);
    }

    fn visit_recursive(&mut self, v: VertexId) {
        self.discover(v);
        for w in self.successors(&v) {
            if self.marks.contains_key(&w) {
                self.touch(&v, &w);
            } else {
                self.visit_recursive(w);
                let low = self.low(&w);
                self.lower(&v, low);
            }
        }
        self.close(&v);
    }

    fn visit_iterative(&mut self, root: VertexId) {
        let mut frames: Vec<(VertexId, std::vec::IntoIter<VertexId>)> = vec![];
        self.discover(root);
        frames.push((root, self.successors(&root).into_iter()));
        loop {
            let (v, next) = match frames.last_mut() {
                None => break,
                Some((v, it)) => (*v, it.next()),
            };
            match next {
                Some(w) if self.marks.contains_key(&w) => self.touch(&v, &w),
                Some(w) => {
                    self.discover(w);
                    frames.push((w, self.successors(&w).into_iter()));
                }
                None => {
                    frames.pop();
                    self.close(&v);
                    if let Some((parent, _)) = frames.last() {
                        let low = self.low(&v);
                        self.lower(parent, low);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::NodeIndex;
    use quickcheck_macros::quickcheck;

    fn normalize(mut components: Vec<Vec<VertexId>>) -> Vec<Vec<VertexId>> {
        for c in components.iter_mut() {
            c.sort();
        }
        components.sort();
        components
    }

    fn sizes(components: &[Vec<VertexId>]) -> Vec<usize> {
        let mut res: Vec<_> = components.iter().map(|c| c.len()).collect();
        res.sort_unstable();
        res
    }

    #[test]
    fn two_triangles() {
        let mut g = Graph::directed();
        let vs: Vec<_> = (0..6).map(|_| g.insert_vertex(None)).collect();
        for (s, t) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            g.add_edge(vs[s], vs[t], None).unwrap();
        }
        let trial = normalize(g.find_scc());
        assert_eq!(
            trial,
            vec![vec![vs[0], vs[1], vs[2]], vec![vs[3], vs[4], vs[5]]]
        );
        assert_eq!(normalize(g.find_scc_recursive()), trial);
    }

    #[test]
    fn bridge_between_triangles() {
        let mut g = Graph::directed();
        let vs: Vec<_> = (0..6).map(|_| g.insert_vertex(None)).collect();
        for (s, t) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)] {
            g.add_edge(vs[s], vs[t], None).unwrap();
        }
        assert_eq!(sizes(&g.find_scc()), vec![3, 3]);
        g.add_edge(vs[5], vs[0], None).unwrap();
        assert_eq!(sizes(&g.find_scc()), vec![6]);
    }

    #[test]
    fn chain_and_self_loop() {
        let mut g = Graph::directed();
        let vs: Vec<_> = (0..3).map(|_| g.insert_vertex(None)).collect();
        g.add_edge(vs[0], vs[1], None).unwrap();
        g.add_edge(vs[1], vs[2], None).unwrap();
        g.add_edge(vs[1], vs[1], None).unwrap();
        assert_eq!(
            normalize(g.find_scc()),
            vec![vec![vs[0]], vec![vs[1]], vec![vs[2]]]
        );
    }

    #[test]
    fn empty_graph() {
        assert!(Graph::directed().find_scc().is_empty());
    }

    #[test]
    fn undirected_components() {
        let g = Graph::generate(&GraphOptions::new(7).path(2).cycle(3)).unwrap();
        assert_eq!(sizes(&g.find_scc()), vec![1, 3, 3]);
    }

    #[test]
    fn deep_path() {
        let n = 50_000;
        let g = Graph::generate(&GraphOptions::new(n).directed(true).path(n - 1)).unwrap();
        let trial = g.find_scc();
        assert_eq!(trial.len(), n);
        assert!(trial.iter().all(|c| c.len() == 1));
    }

    #[quickcheck]
    fn agrees_with_petgraph(rg: RandomGraph) {
        let (g, vs) = rg.build(true, 0.0);
        let mut pg = petgraph::Graph::<(), ()>::new();
        for _ in vs.iter() {
            pg.add_node(());
        }
        for (tail, head, _) in rg.edges.iter() {
            pg.add_edge(NodeIndex::new(*tail), NodeIndex::new(*head), ());
        }
        let oracle: Vec<Vec<VertexId>> = petgraph::algo::tarjan_scc(&pg)
            .into_iter()
            .map(|c| c.into_iter().map(|n| vs[n.index()]).collect())
            .collect();
        assert_eq!(normalize(g.find_scc()), normalize(oracle));
    }

    #[quickcheck]
    fn iterative_agrees_with_recursive(rg: RandomGraph, directed: bool) {
        let (g, _) = rg.build(directed, 0.0);
        let iterative = normalize(g.find_scc());
        assert_eq!(iterative, normalize(g.find_scc_recursive()));
        assert_eq!(iterative, normalize(g.find_scc()));
        let covered: usize = iterative.iter().map(|c| c.len()).sum();
        assert_eq!(covered, g.vertex_size());
    }
}
