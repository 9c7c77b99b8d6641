//! Exhaustive backtracking search over Hamiltonian cycles through a fixed start vertex.
//!
//! The recursion is unrolled into an explicit stack of [`Frame`]s so that the search can be
//! suspended after a bounded number of expansions (see [`IterativeAlgorithm`]). A branch is
//! pruned as soon as its partial length (optionally plus a lower bound on the remaining legs)
//! meets or exceeds the best complete tour found so far.

use log::{debug, trace};

use super::run_exact_solver;
use crate::{
    algorithm::{IterativeAlgorithm, TerminatingIterativeAlgorithm},
    errors::{Error, Result},
    graph::*,
    tour::Tour,
};

const EXPANSIONS_PER_STEP: usize = 1 << 12;

#[derive(Clone, Copy, Debug)]
pub struct FeatureConfiguration {
    /// Explore cheaper edges first; the remaining neighbours of a vertex are cut off at the first
    /// edge that exceeds the bound
    pub sort_neighbors: bool,
    /// Adds the cheapest incident edge of every unvisited vertex and of the start to the bound
    pub cheapest_edge_bound: bool,
}

impl Default for FeatureConfiguration {
    fn default() -> Self {
        Self {
            sort_neighbors: true,
            cheapest_edge_bound: true,
        }
    }
}

impl FeatureConfiguration {
    pub fn pessimistic() -> Self {
        Self {
            sort_neighbors: false,
            cheapest_edge_bound: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: Node,
    /// Position of the next neighbour to explore
    cursor: usize,
    /// Length of the path from the start up to `node`
    length: Weight,
}

pub struct BranchAndBound<'a> {
    graph: &'a Graph,
    start: Node,
    features: FeatureConfiguration,

    neighbors: Vec<Vec<(Node, Weight)>>,
    cheapest: Vec<Weight>,
    closing: Vec<Weight>,

    stack: Vec<Frame>,
    visited: BitSet,
    best: Option<Tour>,
    best_length: Weight,

    started: bool,
    completed: bool,
    expansions: u64,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(graph: &'a Graph, start: Node) -> Result<Self> {
        if graph.find_vertex(start).is_none() {
            return Err(Error::MissingVertex(start));
        }

        let mut algo = Self {
            graph,
            start,
            features: Default::default(),
            neighbors: Vec::new(),
            cheapest: Vec::new(),
            closing: Vec::new(),
            stack: Vec::new(),
            visited: BitSet::new(graph.number_of_nodes()),
            best: None,
            best_length: Weight::INFINITY,
            started: false,
            completed: false,
            expansions: 0,
        };

        if graph.number_of_nodes() == 1 {
            algo.best = Some(Tour::from_path(vec![start], |_, _| 0.0));
            algo.best_length = 0.0;
            algo.completed = true;
        }

        Ok(algo)
    }

    /// Has to be called before the first step
    pub fn configure_features(&mut self, features: FeatureConfiguration) {
        self.features = features;
    }

    pub fn best_length(&self) -> Weight {
        self.best_length
    }

    pub fn number_of_expansions(&self) -> u64 {
        self.expansions
    }

    fn prepare(&mut self) {
        self.started = true;

        if !self.graph.is_connected() {
            debug!("Graph is disconnected; no tour exists");
            self.completed = true;
            return;
        }

        let graph = self.graph;
        self.neighbors = graph
            .vertices()
            .map(|u| {
                let mut list: Vec<_> = graph
                    .edges_of(u)
                    .iter()
                    .filter(|e| e.destination != u)
                    .map(|e| (e.destination, e.weight))
                    .collect();

                // keep only the cheapest of parallel edges
                list.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
                list.dedup_by_key(|x| x.0);

                if self.features.sort_neighbors {
                    list.sort_by(|a, b| a.1.total_cmp(&b.1));
                }
                list
            })
            .collect();

        self.cheapest = self
            .neighbors
            .iter()
            .map(|list| list.iter().map(|x| x.1).fold(Weight::INFINITY, Weight::min))
            .collect();

        self.closing = vec![Weight::INFINITY; graph.len()];
        for &(v, w) in &self.neighbors[self.start as usize] {
            self.closing[v as usize] = w;
        }

        self.visited.set_bit(self.start);
        self.stack.push(Frame {
            node: self.start,
            cursor: 0,
            length: 0.0,
        });
    }

    /// Lower bound on the legs still missing once `next` is appended: every unvisited vertex and
    /// finally the start have to be entered via some edge
    fn remaining_bound(&self, next: Node) -> Weight {
        self.visited
            .iter_cleared_bits()
            .filter(|&x| x != next)
            .map(|x| self.cheapest[x as usize])
            .sum::<Weight>()
            + self.cheapest[self.start as usize]
    }

    /// Performs a single descent or backtrack; returns false once the search space is exhausted
    fn expand(&mut self) -> bool {
        let Some(&Frame {
            node: u,
            cursor,
            length,
        }) = self.stack.last()
        else {
            return false;
        };
        self.expansions += 1;

        if self.stack.len() == self.graph.len() {
            let total = length + self.closing[u as usize];
            if total < self.best_length {
                self.record_tour(total);
            }
            self.backtrack();
            return true;
        }

        let neighbors = &self.neighbors[u as usize];
        let mut cursor = cursor;
        while let Some(&(v, w)) = neighbors.get(cursor) {
            cursor += 1;
            if self.visited.at(v) {
                continue;
            }

            let length = length + w;
            if length >= self.best_length {
                if self.features.sort_neighbors {
                    break;
                }
                continue;
            }

            if self.features.cheapest_edge_bound
                && length + self.remaining_bound(v) >= self.best_length
            {
                continue;
            }

            if let Some(top) = self.stack.last_mut() {
                top.cursor = cursor;
            }
            self.visited.set_bit(v);
            self.stack.push(Frame {
                node: v,
                cursor: 0,
                length,
            });
            return true;
        }

        self.backtrack();
        true
    }

    fn backtrack(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.visited.unset_bit(frame.node);
        }
    }

    fn record_tour(&mut self, length: Weight) {
        trace!(
            "Improved tour {} -> {} after {} expansions",
            self.best_length, length, self.expansions
        );

        let mut order: Vec<Node> = self.stack.iter().map(|f| f.node).collect();
        order.push(self.start);

        self.best = Some(Tour { order, length });
        self.best_length = length;
    }
}

impl IterativeAlgorithm<Tour> for BranchAndBound<'_> {
    fn execute_step(&mut self) {
        if !self.started {
            self.prepare();
        }

        for _ in 0..EXPANSIONS_PER_STEP {
            if self.completed {
                return;
            }

            if !self.expand() {
                debug!(
                    "Branch-and-bound completed after {} expansions; best length {}",
                    self.expansions, self.best_length
                );
                self.completed = true;
            }
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn best_known_solution(&mut self) -> Option<Tour> {
        self.best.clone()
    }
}

impl TerminatingIterativeAlgorithm<Tour> for BranchAndBound<'_> {}

/// Optimal tour from `start` using only direct edges of `graph`
pub fn branch_and_bound(graph: &Graph, start: Node) -> Result<Tour> {
    run_exact_solver(BranchAndBound::new(graph, start)?, None, "Branch-and-bound")
}
