use crate::graph::*;
use itertools::Itertools;
use rand::Rng;

/// G(n,p) with integer weights in `1..=20`; may be disconnected
pub fn random_sparse_graph(rng: &mut impl Rng, n: NumNodes, p: f64) -> Graph {
    let mut graph = Graph::with_nodes(n);
    for (u, v) in (0..n).tuple_combinations() {
        if rng.gen_bool(p) {
            graph.add_edge(u, v, rng.gen_range(1..=20) as Weight).unwrap();
        }
    }
    graph
}

/// Complete graph with integer weights in `67..=100`; any such weights satisfy the triangle
/// inequality and no tour is longer than 1.5 times any other
pub fn random_metric_graph(rng: &mut impl Rng, n: NumNodes) -> Graph {
    let mut graph = Graph::with_nodes(n);
    for (u, v) in (0..n).tuple_combinations() {
        graph.add_edge(u, v, rng.gen_range(67..=100) as Weight).unwrap();
    }
    graph
}

/// Complete graph over random points in the square `[0, 100]^2` weighted by Euclidean distance
pub fn random_euclidean_graph(rng: &mut impl Rng, n: NumNodes) -> Graph {
    let points = (0..n)
        .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect_vec();

    let mut graph = Graph::with_nodes(n);
    for (u, v) in (0..n).tuple_combinations() {
        let (a, b): ((f64, f64), (f64, f64)) = (points[u as usize], points[v as usize]);
        graph
            .add_edge(u, v, (a.0 - b.0).hypot(a.1 - b.1))
            .unwrap();
    }
    graph
}

/// Shortest tour from `start` over direct edges by trying all permutations; `None` if no tour
/// exists. Only feasible for tiny graphs.
pub fn brute_force_optimum(graph: &Graph, start: Node) -> Option<Weight> {
    let n = graph.number_of_nodes();
    if n == 1 {
        return Some(0.0);
    }

    let others = graph.vertices().filter(|&u| u != start).collect_vec();
    others
        .iter()
        .copied()
        .permutations(others.len())
        .filter_map(|perm| {
            std::iter::once(start)
                .chain(perm)
                .chain(std::iter::once(start))
                .tuple_windows()
                .map(|(u, v)| graph.weight_of(u, v))
                .sum::<Option<Weight>>()
        })
        .min_by(|a, b| a.total_cmp(b))
}
