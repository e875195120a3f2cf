use crate::graph::*;
use crate::{Error, Result};

/// Options to generate a graph with some vertices and, optionally, a path, a cycle, or all edges.
///
/// ```rust
/// use graphwalk::graph::*;
///
/// let g = Graph::generate(&GraphOptions::new(5).directed(true).cycle(3)).unwrap();
/// assert_eq!(g.vertex_size(), 5);
/// assert_eq!(g.edge_size(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub n: usize,
    pub directed: bool,
    pub simple: bool,
    pub path: bool,
    pub path_length: usize,
    pub cycle: bool,
    pub cycle_length: usize,
    pub complete: bool,
}

impl GraphOptions {
    /// `n` isolated vertices, undirected and not simple.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = simple;
        self
    }

    /// A path of `length` edges over the leading vertices.
    pub fn path(mut self, length: usize) -> Self {
        self.path = true;
        self.path_length = length;
        self
    }

    /// A cycle of `length` edges over the vertices following the path, if any.
    pub fn cycle(mut self, length: usize) -> Self {
        self.cycle = true;
        self.cycle_length = length;
        self
    }

    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    /// Shortest cycle the graph can hold.
    pub fn min_cycle(&self) -> usize {
        match (self.simple, self.directed) {
            (false, _) => 1,
            (true, true) => 2,
            (true, false) => 3,
        }
    }

    /// Checks whether the requested topology fits into `n` vertices.
    pub fn validate(&self) -> Result<()> {
        if self.complete {
            if self.path || self.cycle {
                return Err(Error::InvalidTopology(format!(
                    "can not create a complete graph with path:{} or cycle:{}",
                    self.path, self.cycle
                )));
            }
            return Ok(());
        }
        if self.cycle && (self.cycle_length < self.min_cycle() || self.cycle_length > self.n) {
            return Err(Error::InvalidTopology(format!(
                "can not create a cycle of length {} with {} vertices when simple:{}",
                self.cycle_length, self.n, self.simple
            )));
        }
        if self.path && self.path_length >= self.n {
            return Err(Error::InvalidTopology(format!(
                "can not create a path of length {} with {} vertices",
                self.path_length, self.n
            )));
        }
        if self.path && self.cycle && self.path_length + self.cycle_length >= self.n {
            return Err(Error::InvalidTopology(format!(
                "can not create both a path of length {} and a cycle of length {} with {} vertices",
                self.path_length, self.cycle_length, self.n
            )));
        }
        Ok(())
    }
}

impl Graph {
    /// Generates a graph as configured.
    ///
    /// The path runs over vertices `0..=path_length`.
    /// The cycle runs over the next `cycle_length` vertices, or the leading ones without a path.
    /// A complete graph joins every pair of distinct vertices once
    /// (every ordered pair when directed) and adds a self-loop per vertex when not simple.
    pub fn generate(options: &GraphOptions) -> Result<Graph> {
        options.validate()?;
        let mut g = Graph::new(options.directed, options.simple);
        let vs: Vec<VertexId> = (0..options.n).map(|_| g.insert_vertex(None)).collect();
        if options.complete {
            g.complete(&vs);
            return Ok(g);
        }
        let mut cycle_start = 0;
        if options.path {
            for w in vs[..=options.path_length].windows(2) {
                g.add_edge_unchecked(w[0], w[1], None);
            }
            cycle_start = options.path_length + 1;
        }
        if options.cycle {
            g.cycle(&vs[cycle_start..cycle_start + options.cycle_length]);
        }
        Ok(g)
    }

    fn cycle(&mut self, vs: &[VertexId]) {
        for (i, v) in vs.iter().enumerate() {
            self.add_edge_unchecked(*v, vs[(i + 1) % vs.len()], None);
        }
    }

    fn complete(&mut self, vs: &[VertexId]) {
        for (i, u) in vs.iter().enumerate() {
            if !self.is_simple() {
                self.add_edge_unchecked(*u, *u, None);
            }
            for (j, v) in vs.iter().enumerate() {
                if i == j || (!self.is_directed() && j < i) {
                    continue;
                }
                self.add_edge_unchecked(*u, *v, None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::*;
    use crate::Error;

    #[test]
    fn isolated() {
        let g = Graph::generate(&GraphOptions::new(4)).unwrap();
        assert_eq!(g.vertex_size(), 4);
        assert_eq!(g.edge_size(), 0);
        assert!(!g.is_directed());
    }

    #[test]
    fn path_then_cycle() {
        let opts = GraphOptions::new(6).directed(true).path(2).cycle(3);
        let g = Graph::generate(&opts).unwrap();
        let vs: Vec<_> = g.iter_vertices().collect();
        assert_eq!(g.edge_size(), 5);
        assert!(g.is_adjacent(&vs[0], &vs[1]));
        assert!(g.is_adjacent(&vs[1], &vs[2]));
        assert!(!g.is_adjacent(&vs[2], &vs[3]));
        assert!(g.is_adjacent(&vs[3], &vs[4]));
        assert!(g.is_adjacent(&vs[4], &vs[5]));
        assert!(g.is_adjacent(&vs[5], &vs[3]));
    }

    #[test]
    fn cycle_alone_starts_at_first_vertex() {
        let g = Graph::generate(&GraphOptions::new(3).directed(true).cycle(3)).unwrap();
        let vs: Vec<_> = g.iter_vertices().collect();
        assert!(g.is_adjacent(&vs[2], &vs[0]));
        assert!(g.iter_vertices().all(|v| g.out_degree(&v) == 1));
    }

    #[test]
    fn loop_as_cycle_of_one() {
        let g = Graph::generate(&GraphOptions::new(1).cycle(1)).unwrap();
        assert!(g.iter_edges().all(|e| e.is_self_loop()));
        assert_eq!(g.edge_size(), 1);
    }

    #[test]
    fn complete_graphs() {
        let g = Graph::generate(&GraphOptions::new(4).simple(true).complete(true)).unwrap();
        assert_eq!(g.edge_size(), 6);
        let g = Graph::generate(
            &GraphOptions::new(4)
                .simple(true)
                .directed(true)
                .complete(true),
        )
        .unwrap();
        assert_eq!(g.edge_size(), 12);
        let g = Graph::generate(&GraphOptions::new(4).complete(true)).unwrap();
        assert_eq!(g.edge_size(), 10);
    }

    #[test]
    fn invalid_topologies() {
        let cases = vec![
            GraphOptions::new(3).cycle(4),
            GraphOptions::new(3).cycle(0),
            GraphOptions::new(3).simple(true).cycle(2),
            GraphOptions::new(3).simple(true).directed(true).cycle(1),
            GraphOptions::new(3).path(3),
            GraphOptions::new(5).path(2).cycle(3),
            GraphOptions::new(5).path(1).complete(true),
            GraphOptions::new(5).cycle(3).complete(true),
        ];
        for opts in cases {
            match Graph::generate(&opts) {
                Err(Error::InvalidTopology(_)) => {}
                _ => panic!("{:?} should be refused", opts),
            }
        }
    }

    #[test]
    fn simple_generated_graphs_respect_simplicity() {
        let g = Graph::generate(&GraphOptions::new(3).simple(true).directed(true).cycle(2)).unwrap();
        assert_eq!(g.edge_size(), 2);
        let g = Graph::generate(&GraphOptions::new(7).simple(true).path(3).cycle(3)).unwrap();
        for e in g.iter_edges() {
            assert!(!e.is_self_loop());
            assert_eq!(g.find_edge(&e.tail, &e.head).len(), 1);
        }
    }
}
