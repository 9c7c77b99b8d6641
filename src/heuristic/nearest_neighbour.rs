use log::{debug, info};

use crate::{
    errors::{Error, Result},
    graph::*,
    tour::Tour,
};

/// Cheapest direct edge from `u` to a vertex not yet in `visited`; ties go to the lowest id
pub(crate) fn nearest_unvisited(graph: &Graph, u: Node, visited: &BitSet) -> Option<(Node, Weight)> {
    graph
        .edges_of(u)
        .iter()
        .filter(|e| !visited.at(e.destination))
        .map(|e| (e.destination, e.weight))
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
}

/// Greedily extends the path from `start` along the cheapest edge to an unvisited vertex and
/// closes it with the direct edge back to `start`. Fails if the path gets stuck or no closing
/// edge exists.
pub fn nearest_neighbour(graph: &Graph, start: Node) -> Result<Tour> {
    if graph.find_vertex(start).is_none() {
        return Err(Error::MissingVertex(start));
    }

    let n = graph.number_of_nodes();
    let mut visited = BitSet::new(n);
    visited.set_bit(start);

    let mut order = Vec::with_capacity(n as usize + 1);
    order.push(start);
    let mut length = 0.0;
    let mut current = start;

    while !visited.full() {
        let Some((next, weight)) = nearest_unvisited(graph, current, &visited) else {
            return Err(Error::infeasible(format!(
                "dead end at vertex {current} after visiting {} of {n} vertices",
                visited.cardinality()
            )));
        };

        visited.set_bit(next);
        order.push(next);
        length += weight;
        current = next;
    }

    if current != start {
        let Some(weight) = graph.weight_of(current, start) else {
            return Err(Error::infeasible(format!(
                "no edge closes the tour from {current} back to {start}"
            )));
        };
        length += weight;
    }
    order.push(start);

    debug!("Nearest neighbour visited all {n} vertices");
    info!("Nearest neighbour tour of length {length}");

    Ok(Tour { order, length })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{errors::InvariantCheck, testing::*};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn follows_cheapest_edges() {
        let graph = Graph::test_only_from([
            (0, 1, 1.0),
            (0, 2, 4.0),
            (0, 3, 3.0),
            (1, 2, 2.0),
            (1, 3, 5.0),
            (2, 3, 1.5),
        ]);

        let tour = nearest_neighbour(&graph, 0).unwrap();
        assert_eq!(tour.order, [0, 1, 2, 3, 0]);
        assert_eq!(tour.length, 1.0 + 2.0 + 1.5 + 3.0);
        assert!((&tour, &graph).is_correct().is_ok());
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let graph = Graph::test_only_from([(0, 3, 1.0), (0, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        let tour = nearest_neighbour(&graph, 0).unwrap();
        assert_eq!(tour.order, [0, 1, 2, 3, 0]);
    }

    #[test]
    fn isolated_vertex_is_infeasible() {
        let mut graph = Graph::with_nodes(4);
        graph.add_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]).unwrap();
        assert!(matches!(nearest_neighbour(&graph, 0), Err(Error::Infeasible(_))));
        assert!(matches!(nearest_neighbour(&graph, 3), Err(Error::Infeasible(_))));
    }

    #[test]
    fn missing_closing_edge() {
        let graph = Graph::test_only_from([(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        assert!(matches!(nearest_neighbour(&graph, 0), Err(Error::Infeasible(_))));
        assert!(matches!(nearest_neighbour(&graph, 7), Err(Error::MissingVertex(7))));
    }

    #[test]
    fn single_vertex() {
        let tour = nearest_neighbour(&Graph::with_nodes(1), 0).unwrap();
        assert_eq!(tour.order, [0, 0]);
        assert_eq!(tour.length, 0.0);
    }

    #[test]
    fn always_a_tour_on_complete_graphs() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        for n in 2..40 {
            let graph = random_metric_graph(&mut rng, n);
            let tour = nearest_neighbour(&graph, n / 2).unwrap();
            assert!((&tour, &graph).is_correct().is_ok());
            assert_eq!(tour.length_in(&graph), Some(tour.length));
        }
    }
}
