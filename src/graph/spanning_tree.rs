use super::*;
use crate::utils::UnionFind;
use log::debug;

/// Minimum spanning forest together with the degree every vertex has within it
#[derive(Clone, Debug)]
pub struct SpanningTree {
    edges: Vec<WeightedEdge>,
    degrees: Vec<NumNodes>,
}

impl SpanningTree {
    /// Kruskal over all connections of `graph`; ties in weight keep the graph's edge order
    pub fn kruskal(graph: &Graph) -> Self {
        Self::from_candidates(graph.number_of_nodes(), graph.edges())
    }

    /// Kruskal over an arbitrary list of candidate edges on the nodes `0..n`
    pub fn from_candidates(n: NumNodes, candidates: impl IntoIterator<Item = WeightedEdge>) -> Self {
        let mut candidates: Vec<_> = candidates.into_iter().filter(|e| !e.is_loop()).collect();
        // stable, hence equal weights are processed in input order
        candidates.sort_by(|a, b| a.weight().total_cmp(&b.weight()));

        let mut components = UnionFind::new(n);
        let mut edges = Vec::with_capacity(n.saturating_sub(1) as usize);
        let mut degrees = vec![0; n as usize];

        for e in candidates {
            if edges.len() + 1 >= n as usize {
                break;
            }

            if components.union(e.0, e.1) {
                degrees[e.0 as usize] += 1;
                degrees[e.1 as usize] += 1;
                edges.push(e);
            }
        }

        debug!(
            "Kruskal selected {} edges on {} nodes ({} components)",
            edges.len(),
            n,
            components.number_of_sets()
        );

        Self { edges, degrees }
    }

    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    pub fn weight(&self) -> Weight {
        self.edges.iter().map(|e| e.weight()).sum()
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.degrees.len() as NumNodes
    }

    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.degrees[u as usize]
    }

    /// Returns true if the tree connects all nodes
    pub fn is_spanning(&self) -> bool {
        self.edges.len() + 1 == self.degrees.len() || self.degrees.len() <= 1
    }

    /// Nodes of odd degree in ascending order; always an even number of them
    pub fn odd_vertices(&self) -> Vec<Node> {
        (0..self.number_of_nodes())
            .filter(|&u| self.degree_of(u) % 2 == 1)
            .collect()
    }
}
