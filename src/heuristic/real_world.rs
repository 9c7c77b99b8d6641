//! Nearest neighbour for sparse road networks. Instead of failing at a dead end, the tour jumps
//! to the closest unvisited vertex. Such jumps are not backed by an edge of the input and are
//! reported in the [`RealWorldTour`].

use log::{debug, info, warn};

use super::nearest_neighbour::nearest_unvisited;
use crate::{
    errors::{Error, Result},
    graph::*,
    tour::{RealWorldTour, Tour},
};

/// How a leg without a direct edge was priced
#[derive(Clone, Copy, Debug, PartialEq)]
enum Jump {
    ShortestPath(Weight),
    Haversine(Weight),
    Unpriced,
}

impl Jump {
    fn length(&self) -> Weight {
        match *self {
            Jump::ShortestPath(w) | Jump::Haversine(w) => w,
            Jump::Unpriced => 0.0,
        }
    }
}

/// Fallback target for a dead end at `u`: the closest unvisited vertex by shortest path, else by
/// great-circle distance, else the unvisited vertex with the lowest id
fn jump_target(graph: &Graph, u: Node, visited: &BitSet) -> Option<(Node, Jump)> {
    if let Some((v, d)) = graph.nearest_reachable(u, |v| !visited.at(v)) {
        return Some((v, Jump::ShortestPath(d)));
    }

    if let Some(from) = graph.position_of(u) {
        let closest = visited
            .iter_cleared_bits()
            .filter_map(|v| Some((v, from.haversine_distance(&graph.position_of(v)?))))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        if let Some((v, d)) = closest {
            return Some((v, Jump::Haversine(d)));
        }
    }

    visited.get_first_unset().map(|v| (v, Jump::Unpriced))
}

/// Prices the closing leg from `u` back to `start` when no direct edge exists
fn closing_jump(graph: &Graph, u: Node, start: Node) -> Jump {
    if let Some((_, d)) = graph.dijkstra(u).find(|&(v, _)| v == start) {
        return Jump::ShortestPath(d);
    }

    match (graph.position_of(u), graph.position_of(start)) {
        (Some(a), Some(b)) => Jump::Haversine(a.haversine_distance(&b)),
        _ => Jump::Unpriced,
    }
}

/// Nearest-neighbour tour that never fails on a non-empty graph
pub fn real_world(graph: &Graph, start: Node) -> Result<RealWorldTour> {
    if graph.find_vertex(start).is_none() {
        return Err(Error::MissingVertex(start));
    }

    let n = graph.number_of_nodes();
    let components = graph.connected_components();
    debug!(
        "Real-world heuristic on n={} m={} with {} components",
        n,
        graph.number_of_edges(),
        components.number_of_classes()
    );

    let mut visited = BitSet::new(n);
    visited.set_bit(start);

    let mut order = Vec::with_capacity(n as usize + 1);
    order.push(start);

    let mut length = 0.0;
    let mut synthetic_edges = Vec::new();
    let mut unpriced_jumps = 0;
    let mut current = start;

    let mut take_jump = |from: Node, to: Node, jump: Jump, length: &mut Weight| {
        let crossing = components.class_of_node(from) != components.class_of_node(to);
        debug!("Synthetic leg {from} -> {to}: {jump:?} (leaves component: {crossing})");
        synthetic_edges.push(Edge(from, to));
        unpriced_jumps += (jump == Jump::Unpriced) as usize;
        *length += jump.length();
    };

    while !visited.full() {
        let next = match nearest_unvisited(graph, current, &visited) {
            Some((next, weight)) => {
                length += weight;
                next
            }
            None => {
                let Some((next, jump)) = jump_target(graph, current, &visited) else {
                    break;
                };
                take_jump(current, next, jump, &mut length);
                next
            }
        };

        visited.set_bit(next);
        order.push(next);
        current = next;
    }

    if current != start {
        match graph.weight_of(current, start) {
            Some(weight) => length += weight,
            None => take_jump(current, start, closing_jump(graph, current, start), &mut length),
        }
    }
    order.push(start);

    let result = RealWorldTour {
        tour: Tour { order, length },
        synthetic_edges,
        unpriced_jumps,
    };

    if result.is_degraded() {
        warn!(
            "Real-world tour uses {} synthetic legs ({} without a known distance)",
            result.synthetic_edges.len(),
            result.unpriced_jumps
        );
    }
    info!("Real-world tour of length {length}");

    Ok(result)
}
