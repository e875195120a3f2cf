use crate::graph::*;
use std::fmt;

/// Lists each vertex by its label, then one line per outgoing edge,
/// e.g., `-> b (3)` for a directed edge of weight 3 or `-- b` for an unweighted undirected one.
pub struct GraphDebug<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    margin: usize,
    step: usize,
}

impl<'a, G> GraphDebug<'a, G>
where
    G: QueryableGraph,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            margin: 0,
            step: 2,
        }
    }

    /// Vertex lines start after `margin` spaces; edge lines after `margin + step`.
    pub fn indent(self, margin: usize, step: usize) -> Self {
        Self {
            margin,
            step,
            ..self
        }
    }

    fn name(&self, v: &VertexId) -> &str {
        self.graph.label(v).unwrap_or("?")
    }
}

impl<'a, G> fmt::Debug for GraphDebug<'a, G>
where
    G: QueryableGraph,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.graph.is_directed() { "->" } else { "--" };
        let edge_margin = self.margin + self.step;
        for v in self.graph.iter_vertices() {
            writeln!(f, "{:pad$}{}", "", self.name(&v), pad = self.margin)?;
            for e in self.graph.out_edges(&v) {
                write!(f, "{:pad$}{} {}", "", arrow, self.name(&e.head), pad = edge_margin)?;
                if let Some(w) = e.weight {
                    write!(f, " ({})", w)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
