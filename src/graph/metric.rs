//! Dense pairwise distances over a [`Graph`]: direct-edge weights, the metric closure computed by
//! Floyd–Warshall and the derived complete graph.

use super::*;
use log::{debug, trace};

/// Relative slack used when comparing sums of floating-point distances
const EPSILON: Weight = 1e-9;

/// Row-major `n x n` matrix of distances; absent connections are `Weight::INFINITY`
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: NumNodes,
    dist: Vec<Weight>,
}

impl DistanceMatrix {
    /// Direct edge weights only (the cheapest one for parallel edges); `0` on the diagonal
    pub fn from_direct_edges(graph: &Graph) -> Self {
        let n = graph.number_of_nodes();
        let mut matrix = Self {
            n,
            dist: vec![Weight::INFINITY; n as usize * n as usize],
        };

        for u in graph.vertices() {
            matrix.set(u, u, 0.0);
            for e in graph.edges_of(u) {
                if e.destination != u && e.weight < matrix.get(u, e.destination) {
                    matrix.set(u, e.destination, e.weight);
                }
            }
        }

        matrix
    }

    /// All-pairs shortest path distances
    pub fn floyd_warshall(graph: &Graph) -> Self {
        let mut matrix = Self::from_direct_edges(graph);
        let n = matrix.n as usize;
        debug!("Floyd-Warshall on n={n}");

        for k in 0..n {
            trace!("Floyd-Warshall intermediate {k}");
            for i in 0..n {
                let d_ik = matrix.dist[i * n + k];
                if d_ik == Weight::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let via = d_ik + matrix.dist[k * n + j];
                    if via < matrix.dist[i * n + j] {
                        matrix.dist[i * n + j] = via;
                    }
                }
            }
        }

        matrix
    }

    /// Returns the metric closure of `graph`. If the graph is already complete, its direct
    /// weights are used as they are (the triangle inequality may then fail, see
    /// [`DistanceMatrix::respects_triangle_inequality`]).
    pub fn metric_closure(graph: &Graph) -> Self {
        if graph.is_complete() {
            Self::from_direct_edges(graph)
        } else {
            Self::floyd_warshall(graph)
        }
    }

    #[inline]
    pub fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    #[inline]
    pub fn get(&self, u: Node, v: Node) -> Weight {
        self.dist[u as usize * self.n as usize + v as usize]
    }

    #[inline]
    fn set(&mut self, u: Node, v: Node, w: Weight) {
        self.dist[u as usize * self.n as usize + v as usize] = w;
    }

    pub fn row(&self, u: Node) -> &[Weight] {
        let n = self.n as usize;
        &self.dist[u as usize * n..(u as usize + 1) * n]
    }

    /// Returns true if every pair of vertices has a finite distance
    pub fn is_finite(&self) -> bool {
        self.dist.iter().all(|d| d.is_finite())
    }

    /// Checks `d(a,c) <= d(a,b) + d(b,c)` for all triples
    pub fn respects_triangle_inequality(&self) -> bool {
        self.find_triangle_violation().is_none()
    }

    /// Returns a triple `(a, b, c)` with `d(a,c) > d(a,b) + d(b,c)`, if any
    pub fn find_triangle_violation(&self) -> Option<(Node, Node, Node)> {
        for a in 0..self.n {
            for b in 0..self.n {
                let d_ab = self.get(a, b);
                if d_ab == Weight::INFINITY {
                    continue;
                }
                for c in 0..self.n {
                    let via = d_ab + self.get(b, c);
                    let direct = self.get(a, c);
                    if direct > via + EPSILON * via.abs().max(1.0) {
                        return Some((a, b, c));
                    }
                }
            }
        }
        None
    }

    /// Builds a fresh complete graph on the same vertices (positions are carried over) with one
    /// edge per pair `(i, j)`, `i < j`, weighted by the matrix entry. Infinite entries are skipped.
    pub fn to_complete_graph(&self, original: &Graph) -> Graph {
        let mut graph = original.empty_copy();

        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let w = self.get(i, j);
                if w.is_finite() {
                    graph.link(i, j, w);
                }
            }
        }

        graph
    }

    pub fn tour_length(&self, order: &[Node]) -> Weight {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }
}
