pub mod christofides;
pub mod double_tree;
pub mod matching;
pub mod nearest_neighbour;
pub mod real_world;

pub use christofides::christofides;
pub use double_tree::double_tree;
pub use matching::greedy_matching;
pub use nearest_neighbour::nearest_neighbour;
pub use real_world::real_world;

use log::{debug, warn};

use crate::{
    errors::{Error, Result},
    graph::*,
    tour::Tour,
};

/// Metric closure of an input graph together with the complete graph built from it
pub(crate) struct MetricInstance {
    pub dist: DistanceMatrix,
    pub complete: Graph,
}

impl MetricInstance {
    /// Fails if `start` does not exist or some pair of vertices is not connected. A violated
    /// triangle inequality is only reported, since the tree heuristics still yield a tour.
    pub fn prepare(graph: &Graph, start: Node) -> Result<Self> {
        if graph.find_vertex(start).is_none() {
            return Err(Error::MissingVertex(start));
        }

        let dist = DistanceMatrix::metric_closure(graph);
        if !dist.is_finite() {
            return Err(Error::infeasible(format!(
                "graph has {} connected components",
                graph.connected_components().number_of_classes()
            )));
        }

        if let Some((a, b, c)) = dist.find_triangle_violation() {
            warn!(
                "Triangle inequality violated: d({a},{c})={} > d({a},{b})+d({b},{c})={}; \
                 approximation bound does not hold",
                dist.get(a, c),
                dist.get(a, b) + dist.get(b, c)
            );
        }

        let complete = dist.to_complete_graph(graph);
        debug!(
            "Complete metric graph with n={} m={}",
            complete.number_of_nodes(),
            complete.number_of_edges()
        );

        Ok(Self { dist, complete })
    }

    /// Shortcuts the Euler circuit of `multigraph` starting at `start`; the length is measured
    /// in the metric closure
    pub fn tour_from_multigraph(&self, multigraph: &EulerianMultigraph, start: Node) -> Result<Tour> {
        let circuit = multigraph.circuit(start)?;
        let order = shortcut(&circuit, self.complete.number_of_nodes());
        let length = self.dist.tour_length(&order);
        Ok(Tour { order, length })
    }
}
