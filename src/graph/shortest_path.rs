use super::*;
use crate::utils::radix::DistanceHeap;

/// Single-source shortest paths over non-negative edge weights
pub struct Dijkstra<'a, G: AdjacencyList> {
    graph: &'a G,
    heap: DistanceHeap,
    settled: BitSet,
    tentative: Vec<Weight>,
}

impl<'a, G: AdjacencyList> Dijkstra<'a, G> {
    pub fn new(graph: &'a G, source: Node) -> Self {
        let n = graph.number_of_nodes();
        let mut heap = DistanceHeap::new(n as usize, 0.0);
        let mut tentative = vec![Weight::INFINITY; n as usize];

        heap.push(0.0, source);
        tentative[source as usize] = 0.0;

        Self {
            graph,
            heap,
            settled: BitSet::new(n),
            tentative,
        }
    }

    /// Distances of all settled nodes; `INFINITY` for unreachable ones after exhaustion
    pub fn distances(mut self) -> Vec<Weight> {
        while self.next().is_some() {}
        self.tentative
    }
}

impl<G: AdjacencyList> Iterator for Dijkstra<'_, G> {
    /// Nodes in order of non-decreasing distance from the source
    type Item = (Node, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        let (dist, u) = self.heap.pop()?;
        self.settled.set_bit(u);

        for e in self.graph.edges_of(u) {
            let v = e.destination;
            if self.settled.at(v) {
                continue;
            }

            let via = dist + e.weight;
            if via < self.tentative[v as usize] {
                self.tentative[v as usize] = via;
                self.heap.push_or_update(via, v);
            }
        }

        Some((u, dist))
    }
}

pub trait ShortestPaths: AdjacencyList + Sized {
    fn dijkstra(&self, source: Node) -> Dijkstra<'_, Self> {
        Dijkstra::new(self, source)
    }

    /// Returns the closest node (by shortest path distance) other than `source` satisfying
    /// `predicate`, or `None` if no such node is reachable
    fn nearest_reachable(
        &self,
        source: Node,
        mut predicate: impl FnMut(Node) -> bool,
    ) -> Option<(Node, Weight)> {
        self.dijkstra(source)
            .skip(1)
            .find(|&(u, _)| predicate(u))
    }
}

impl<G: AdjacencyList> ShortestPaths for G {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn dijkstra_on_path() {
        let graph = Graph::test_only_from([(0, 1, 4.0), (1, 2, 1.0), (0, 2, 7.0), (2, 3, 0.5)]);
        let dist = graph.dijkstra(0).distances();
        assert_eq!(dist, [0.0, 4.0, 5.0, 5.5]);

        let order: Vec<_> = graph.dijkstra(3).map(|(u, _)| u).collect();
        assert_eq!(order, [3, 2, 1, 0]);
    }

    #[test]
    fn unreachable_nodes() {
        let mut graph = Graph::with_nodes(4);
        graph.add_edges([(0, 1, 1.0), (2, 3, 1.0)]).unwrap();

        let dist = graph.dijkstra(1).distances();
        assert_eq!(dist[0], 1.0);
        assert_eq!(dist[2], Weight::INFINITY);

        assert_eq!(graph.nearest_reachable(0, |u| u != 1), None);
        assert_eq!(graph.nearest_reachable(0, |_| true), Some((1, 1.0)));
    }

    #[test]
    fn agrees_with_floyd_warshall() {
        let mut rng = Pcg64Mcg::seed_from_u64(0xdead);
        for n in [3, 8, 20, 40] {
            let graph = random_sparse_graph(&mut rng, n, 0.2);
            let fw = DistanceMatrix::floyd_warshall(&graph);
            for s in graph.vertices() {
                let dist = graph.dijkstra(s).distances();
                for t in graph.vertices() {
                    assert_eq!(dist[t as usize], fw.get(s, t), "s={s} t={t}");
                }
            }
        }
    }
}
