use log::{debug, info};

use super::{MetricInstance, greedy_matching};
use crate::{errors::Result, graph::*, tour::Tour};

/// Christofides' heuristic over the metric closure: a minimum spanning tree plus a matching of its
/// odd-degree vertices form an Eulerian multigraph whose circuit is shortcut into a tour.
///
/// The matching is computed greedily (see [`greedy_matching`]), so the textbook 1.5 approximation
/// guarantee does not carry over.
pub fn christofides(graph: &Graph, start: Node) -> Result<Tour> {
    let instance = MetricInstance::prepare(graph, start)?;
    let tree = SpanningTree::kruskal(&instance.complete);

    let odd = tree.odd_vertices();
    let matching = greedy_matching(&odd, &instance.dist);
    debug!(
        "Tree weight {} with {} odd vertices; matching weight {}",
        tree.weight(),
        odd.len(),
        matching.iter().map(|e| e.weight()).sum::<Weight>()
    );

    let multigraph = EulerianMultigraph::from_edges(
        instance.complete.number_of_nodes(),
        tree.edges()
            .iter()
            .chain(matching.iter())
            .map(|e| e.as_edge()),
    );

    let tour = instance.tour_from_multigraph(&multigraph, start)?;
    info!("Christofides tour of length {}", tour.length);
    Ok(tour)
}
