use log::info;

use super::MetricInstance;
use crate::{errors::Result, graph::*, tour::Tour};

/// Doubles the edges of a minimum spanning tree of the metric closure and shortcuts an Euler
/// circuit of the resulting multigraph. At most twice the optimum if the triangle inequality
/// holds.
pub fn double_tree(graph: &Graph, start: Node) -> Result<Tour> {
    let instance = MetricInstance::prepare(graph, start)?;
    let tree = SpanningTree::kruskal(&instance.complete);

    let multigraph = EulerianMultigraph::from_edges(
        instance.complete.number_of_nodes(),
        tree.edges()
            .iter()
            .flat_map(|e| [e.as_edge(), e.as_edge()]),
    );

    let tour = instance.tour_from_multigraph(&multigraph, start)?;
    info!(
        "Double-tree tour of length {} (tree weight {})",
        tour.length,
        tree.weight()
    );
    Ok(tour)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        errors::{Error, InvariantCheck},
        exact::held_karp::{held_karp, DEFAULT_MAX_NODES},
        testing::*,
    };
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn preorder_of_path_tree() {
        let graph = Graph::test_only_from([
            (0, 1, 1.0),
            (1, 2, 1.0),
            (2, 3, 1.0),
            (0, 2, 2.0),
            (1, 3, 2.0),
            (0, 3, 3.0),
        ]);

        let tour = double_tree(&graph, 0).unwrap();
        assert_eq!(tour.order, [0, 1, 2, 3, 0]);
        assert_eq!(tour.length, 6.0);
    }

    #[test]
    fn sparse_input_uses_shortest_paths() {
        let graph = Graph::test_only_from([(0, 1, 10.0), (1, 2, 15.0), (2, 3, 20.0), (3, 0, 25.0)]);
        let tour = double_tree(&graph, 0).unwrap();
        assert!((&tour, &graph).is_correct().is_ok());
        assert!(tour.length >= 70.0);
    }

    #[test]
    fn disconnected_is_infeasible() {
        let mut graph = Graph::with_nodes(4);
        graph.add_edges([(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
        assert!(matches!(double_tree(&graph, 0), Err(Error::Infeasible(_))));
        assert!(matches!(double_tree(&graph, 9), Err(Error::MissingVertex(9))));
    }

    #[test]
    fn single_vertex() {
        let tour = double_tree(&Graph::with_nodes(1), 0).unwrap();
        assert_eq!(tour.order, [0, 0]);
        assert_eq!(tour.length, 0.0);
    }

    #[test]
    fn at_most_twice_the_optimum() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x2a);
        for n in 3..=10 {
            for _ in 0..5 {
                let graph = random_euclidean_graph(&mut rng, n);
                let opt = held_karp(&graph, 0, DEFAULT_MAX_NODES).unwrap().length;
                let tour = double_tree(&graph, 0).unwrap();

                assert!((&tour, &graph).is_correct().is_ok());
                assert!(tour.length <= 2.0 * opt + 1e-9, "{} vs opt {}", tour.length, opt);
                assert!(tour.length >= opt - 1e-9);
            }
        }
    }

    #[test]
    fn sparse_inputs_within_twice_the_closure_optimum() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x2b);
        let mut checked = 0;
        for n in 4..=9 {
            for _ in 0..10 {
                let graph = random_sparse_graph(&mut rng, n, 0.4);
                if !graph.is_connected() {
                    continue;
                }

                let closure = DistanceMatrix::metric_closure(&graph);
                let opt = held_karp(&closure.to_complete_graph(&graph), 0, DEFAULT_MAX_NODES)
                    .unwrap()
                    .length;
                let tour = double_tree(&graph, 0).unwrap();

                assert!((&tour, &graph).is_correct().is_ok());
                assert_eq!(tour.length, closure.tour_length(&tour.order));
                assert!(tour.length <= 2.0 * opt, "{} vs opt {}", tour.length, opt);
                if let Some(direct) = brute_force_optimum(&graph, 0) {
                    assert!(opt <= direct);
                }
                checked += 1;
            }
        }
        assert!(checked > 0);
    }
}
