use itertools::Itertools;
use log::debug;

use crate::graph::*;

/// Pairs up `vertices` greedily: all pairs are sorted by distance (ties keep the order of
/// `vertices`) and a pair is taken whenever both of its ends are still free.
///
/// The result is a perfect matching for an even number of vertices, but not necessarily one of
/// minimum weight. Christofides' 1.5 bound is therefore not guaranteed when this matching is used.
pub fn greedy_matching(vertices: &[Node], dist: &DistanceMatrix) -> Vec<WeightedEdge> {
    let mut candidates = vertices
        .iter()
        .tuple_combinations()
        .map(|(&u, &v)| WeightedEdge(u, v, dist.get(u, v)))
        .collect_vec();
    candidates.sort_by(|a, b| a.weight().total_cmp(&b.weight()));

    let mut matched = BitSet::new(dist.number_of_nodes());
    let mut matching = Vec::with_capacity(vertices.len() / 2);

    for e in candidates {
        if matching.len() * 2 + 1 >= vertices.len() {
            break;
        }

        if matched.at(e.0) || matched.at(e.1) {
            continue;
        }

        matched.set_bit(e.0);
        matched.set_bit(e.1);
        matching.push(e);
    }

    debug!(
        "Greedy matching of {} vertices with weight {}",
        vertices.len(),
        matching.iter().map(|e| e.weight()).sum::<Weight>()
    );

    matching
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pairs_cheapest_first() {
        // points on a line at 0, 1, 5, 6
        let graph = Graph::test_only_from([(0, 1, 1.0), (1, 2, 4.0), (2, 3, 1.0)]);
        let dist = DistanceMatrix::floyd_warshall(&graph);

        let matching = greedy_matching(&[0, 1, 2, 3], &dist);
        assert_eq!(matching, [WeightedEdge(0, 1, 1.0), WeightedEdge(2, 3, 1.0)]);
    }

    #[test]
    fn greedy_is_not_optimal() {
        // greedy takes {1,2} first and is then forced into the expensive {0,3}
        let graph = Graph::test_only_from([(0, 1, 2.0), (1, 2, 1.0), (2, 3, 2.0)]);
        let dist = DistanceMatrix::floyd_warshall(&graph);

        let matching = greedy_matching(&[0, 1, 2, 3], &dist);
        let weight: Weight = matching.iter().map(|e| e.weight()).sum();
        assert_eq!(matching.len(), 2);
        assert_eq!(weight, 1.0 + 5.0);
    }

    #[test]
    fn every_vertex_matched_once() {
        let graph = Graph::test_only_from([(0, 1, 3.0), (1, 2, 1.0), (2, 3, 7.0), (3, 4, 2.0), (4, 5, 1.0)]);
        let dist = DistanceMatrix::floyd_warshall(&graph);

        let odd = [5, 0, 3, 1];
        let matching = greedy_matching(&odd, &dist);
        assert_eq!(matching.len(), 2);

        let mut ends: Vec<Node> = matching.iter().flat_map(|e| [e.0, e.1]).collect();
        ends.sort();
        assert_eq!(ends, [0, 1, 3, 5]);

        assert!(greedy_matching(&[], &dist).is_empty());
    }
}
