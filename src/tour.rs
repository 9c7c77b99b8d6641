use serde::Serialize;

use crate::{
    errors::{InvariantCheck, TourError},
    graph::*,
};

/// A closed walk visiting every vertex exactly once. `order` starts and ends with the start
/// vertex, i.e. it holds `n + 1` entries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tour {
    pub order: Vec<Node>,
    pub length: Weight,
}

impl Tour {
    /// Closes `path` (which must not repeat its first vertex) and sums the given weights
    pub fn from_path(mut path: Vec<Node>, weight: impl Fn(Node, Node) -> Weight) -> Self {
        if let Some(&start) = path.first() {
            path.push(start);
        }
        let length = path
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| weight(w[0], w[1]))
            .sum();
        Self {
            order: path,
            length,
        }
    }

    pub fn start(&self) -> Option<Node> {
        self.order.first().copied()
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.order.len().saturating_sub(1) as NumNodes
    }

    /// Consecutive pairs of the closed walk
    pub fn legs(&self) -> impl Iterator<Item = Edge> + '_ {
        self.order.windows(2).map(|w| Edge(w[0], w[1]))
    }

    /// Recomputes the length over the direct edges of `graph`; `None` if a leg has no edge
    pub fn length_in(&self, graph: &Graph) -> Option<Weight> {
        self.legs()
            .filter(|e| !e.is_loop())
            .map(|Edge(u, v)| graph.weight_of(u, v))
            .sum()
    }

    /// Checks the invariant against a graph with `n` vertices
    pub fn is_tour_of(&self, n: NumNodes) -> Result<(), TourError> {
        let (&first, &last) = match (self.order.first(), self.order.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TourError::Empty),
        };

        if first != last || self.order.len() < 2 {
            return Err(TourError::NotClosed { first, last });
        }

        let mut seen = BitSet::new(n);
        for &u in &self.order[..self.order.len() - 1] {
            if u >= n {
                return Err(TourError::UnknownVertex(u));
            }
            if seen.set_bit(u) {
                return Err(TourError::Repeated(u));
            }
        }

        if seen.cardinality() != n {
            return Err(TourError::WrongSize {
                visited: seen.cardinality(),
                expected: n,
            });
        }

        Ok(())
    }
}

impl InvariantCheck<TourError> for (&Tour, &Graph) {
    fn is_correct(&self) -> Result<(), TourError> {
        self.0.is_tour_of(self.1.number_of_nodes())
    }
}

/// Result of the real-world heuristic. Legs of the tour that are not backed by a direct edge of
/// the input graph are reported instead of being hidden in an ordinary [`Tour`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RealWorldTour {
    pub tour: Tour,
    /// Legs taken without a direct edge (fallback jumps and a synthetic closing leg)
    pub synthetic_edges: Vec<Edge>,
    /// Synthetic legs for which neither a path nor coordinates were available; they add nothing
    /// to the length
    pub unpriced_jumps: usize,
}

impl RealWorldTour {
    pub fn is_degraded(&self) -> bool {
        !self.synthetic_edges.is_empty()
    }
}
