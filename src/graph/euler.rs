use super::*;
use crate::errors::{Error, Result};
use smallvec::SmallVec;

/// Undirected multigraph used for Euler tours; parallel edges are allowed and every edge carries
/// an id so it can be consumed exactly once.
#[derive(Clone, Debug)]
pub struct EulerianMultigraph {
    adjacency: Vec<SmallVec<[(Node, u32); 4]>>,
    number_of_edges: u32,
}

impl EulerianMultigraph {
    pub fn new(n: NumNodes) -> Self {
        Self {
            adjacency: vec![SmallVec::new(); n as usize],
            number_of_edges: 0,
        }
    }

    pub fn from_edges(n: NumNodes, edges: impl IntoIterator<Item = impl Into<Edge>>) -> Self {
        let mut graph = Self::new(n);
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            graph.add_edge(u, v);
        }
        graph
    }

    pub fn add_edge(&mut self, u: Node, v: Node) {
        let id = self.number_of_edges;
        self.adjacency[u as usize].push((v, id));
        self.adjacency[v as usize].push((u, id));
        self.number_of_edges += 1;
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.adjacency.len() as NumNodes
    }

    pub fn number_of_edges(&self) -> u32 {
        self.number_of_edges
    }

    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.adjacency[u as usize].len() as NumNodes
    }

    pub fn odd_vertices(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.number_of_nodes()).filter(|&u| self.degree_of(u) % 2 == 1)
    }

    /// Closed walk from `start` using every edge exactly once (Hierholzer with an explicit stack).
    /// Fails if a vertex has odd degree or some edge cannot be reached from `start`.
    pub fn circuit(&self, start: Node) -> Result<Vec<Node>> {
        if start >= self.number_of_nodes() {
            return Err(Error::MissingVertex(start));
        }

        if let Some(u) = self.odd_vertices().next() {
            return Err(Error::infeasible(format!(
                "vertex {u} has odd degree {}",
                self.degree_of(u)
            )));
        }

        let mut used = BitSet::new(self.number_of_edges);
        let mut cursor = vec![0usize; self.adjacency.len()];
        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(self.number_of_edges as usize + 1);

        while let Some(&u) = stack.last() {
            let neighbors = &self.adjacency[u as usize];
            let next = loop {
                match neighbors.get(cursor[u as usize]) {
                    None => break None,
                    Some(&(v, id)) => {
                        cursor[u as usize] += 1;
                        if !used.set_bit(id) {
                            break Some(v);
                        }
                    }
                }
            };

            match next {
                Some(v) => stack.push(v),
                None => {
                    stack.pop();
                    circuit.push(u);
                }
            }
        }

        if circuit.len() != self.number_of_edges as usize + 1 {
            return Err(Error::infeasible(format!(
                "only {} of {} edges are reachable from {start}",
                circuit.len() - 1,
                self.number_of_edges
            )));
        }

        circuit.reverse();
        Ok(circuit)
    }
}

/// Keeps the first occurrence of every vertex of `circuit` and returns to its first vertex.
/// The result holds each visited vertex once plus the closing repetition of the start.
pub fn shortcut(circuit: &[Node], n: NumNodes) -> Vec<Node> {
    let Some(&start) = circuit.first() else {
        return Vec::new();
    };

    let mut seen = BitSet::new(n);
    let mut order: Vec<Node> = circuit.iter().copied().filter(|&u| !seen.set_bit(u)).collect();
    order.push(start);
    order
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn doubled_path() {
        let graph = EulerianMultigraph::from_edges(
            4,
            [Edge(0, 1), Edge(1, 0), Edge(1, 2), Edge(2, 1), Edge(1, 3), Edge(3, 1)],
        );
        let circuit = graph.circuit(0).unwrap();

        assert_eq!(circuit.len(), 7);
        assert_eq!(circuit.first(), Some(&0));
        assert_eq!(circuit.last(), Some(&0));
        assert_eq!(circuit, [0, 1, 2, 1, 3, 1, 0]);

        assert_eq!(shortcut(&circuit, 4), [0, 1, 2, 3, 0]);
    }

    #[test]
    fn figure_eight_uses_every_edge_once() {
        // two triangles sharing vertex 2
        let edges: [(Node, Node); 6] = [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)];
        let graph = EulerianMultigraph::from_edges(5, edges);
        assert_eq!(graph.degree_of(2), 4);

        for start in 0..5 {
            let circuit = graph.circuit(start).unwrap();
            assert_eq!(circuit.len(), edges.len() + 1);
            assert_eq!(circuit[0], start);
            assert_eq!(circuit[circuit.len() - 1], start);

            let mut walked: Vec<_> = circuit
                .windows(2)
                .map(|w| Edge(w[0], w[1]).normalized())
                .collect();
            walked.sort();
            let mut expected: Vec<_> = edges.iter().map(|e| Edge::from(e).normalized()).collect();
            expected.sort();
            assert_eq!(walked, expected);

            let order = shortcut(&circuit, 5);
            assert_eq!(order.len(), 6);
            assert_eq!(order[0], start);
            assert_eq!(order[5], start);
        }
    }

    #[test]
    fn rejects_odd_and_unreachable() {
        let graph = EulerianMultigraph::from_edges(3, [Edge(0, 1), Edge(1, 2)]);
        assert!(matches!(graph.circuit(0), Err(Error::Infeasible(_))));

        let graph = EulerianMultigraph::from_edges(4, [Edge(0, 1), Edge(1, 0), Edge(2, 3), Edge(3, 2)]);
        assert!(matches!(graph.circuit(0), Err(Error::Infeasible(_))));
        assert!(matches!(graph.circuit(4), Err(Error::MissingVertex(4))));
    }

    #[test]
    fn single_vertex() {
        let graph = EulerianMultigraph::new(1);
        let circuit = graph.circuit(0).unwrap();
        assert_eq!(circuit, [0]);
        assert_eq!(shortcut(&circuit, 1), [0, 0]);
    }
}
