//! Subset dynamic programming over paths from a fixed start vertex.
//!
//! `cost[S][j]` is the length of the shortest path that leaves the start, visits exactly the
//! non-start vertices in `S` and ends in `j ∈ S`. Subsets are processed in increasing order of
//! their bitmask, hence every `S \ {j}` is final before `S` is touched. Absent edges are treated
//! as infinitely expensive, so incomplete graphs are solved exactly as well.

use log::debug;

use super::run_exact_solver;
use crate::{
    algorithm::{IterativeAlgorithm, TerminatingIterativeAlgorithm},
    errors::{Error, Result},
    graph::*,
    tour::Tour,
};

/// Default ceiling on the number of vertices; the table then takes roughly 90 MB
pub const DEFAULT_MAX_NODES: NumNodes = 20;

/// Subsets are stored as machine words and predecessors as bytes
const HARD_MAX_NODES: NumNodes = 32;

/// Upper bound on the memory taken by the cost and parent tables together
const MAX_TABLE_BYTES: usize = 1 << 31;

const MASKS_PER_STEP: usize = 1 << 10;
const NO_PARENT: u8 = u8::MAX;

pub struct HeldKarp {
    start: Node,
    /// Non-start vertices; bit `j` of a subset refers to `others[j]`
    others: Vec<Node>,
    dist: DistanceMatrix,
    cost: Vec<Weight>,
    parent: Vec<u8>,
    next_mask: usize,
    completed: bool,
    best: Option<Tour>,
}

impl HeldKarp {
    /// Fails with `SizeExceeded` before allocating anything if `graph` has more than `max_nodes`
    /// vertices or its tables would not fit into `MAX_TABLE_BYTES`
    pub fn new(graph: &Graph, start: Node, max_nodes: NumNodes) -> Result<Self> {
        if graph.find_vertex(start).is_none() {
            return Err(Error::MissingVertex(start));
        }

        let n = graph.number_of_nodes();
        let limit = max_nodes.min(size_limit());
        if n > limit {
            return Err(Error::SizeExceeded { nodes: n, limit });
        }

        let others: Vec<Node> = graph.vertices().filter(|&u| u != start).collect();
        let m = others.len();
        let states = (1usize << m) * m;
        debug!(
            "Held-Karp on n={n} with {states} states ({} bytes)",
            table_bytes(n).unwrap_or_default()
        );

        let too_large = || Error::SizeExceeded { nodes: n, limit };
        let mut cost: Vec<Weight> = Vec::new();
        cost.try_reserve_exact(states).map_err(|_| too_large())?;
        cost.resize(states, Weight::INFINITY);
        let mut parent: Vec<u8> = Vec::new();
        parent.try_reserve_exact(states).map_err(|_| too_large())?;
        parent.resize(states, NO_PARENT);

        let mut algo = Self {
            start,
            others,
            dist: DistanceMatrix::from_direct_edges(graph),
            cost,
            parent,
            next_mask: 1,
            completed: false,
            best: None,
        };

        if m == 0 {
            algo.best = Some(Tour::from_path(vec![start], |_, _| 0.0));
            algo.completed = true;
        }

        for j in 0..m {
            algo.cost[(1 << j) * m + j] = algo.dist.get(start, algo.others[j]);
        }

        Ok(algo)
    }

    fn process_mask(&mut self, mask: usize) {
        if mask.count_ones() < 2 {
            return;
        }

        let m = self.others.len();
        for j in bits_of(mask) {
            let prev = mask ^ (1 << j);
            let to = self.others[j];

            let mut best = Weight::INFINITY;
            let mut parent = NO_PARENT;
            for k in bits_of(prev) {
                let via = self.cost[prev * m + k] + self.dist.get(self.others[k], to);
                if via < best {
                    best = via;
                    parent = k as u8;
                }
            }

            self.cost[mask * m + j] = best;
            self.parent[mask * m + j] = parent;
        }
    }

    fn finish(&mut self) {
        self.completed = true;

        let m = self.others.len();
        let full = (1usize << m) - 1;

        let Some((last, length)) = (0..m)
            .map(|j| {
                (
                    j,
                    self.cost[full * m + j] + self.dist.get(self.others[j], self.start),
                )
            })
            .filter(|(_, c)| c.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            debug!("Held-Karp found no Hamiltonian cycle");
            return;
        };

        let mut order = Vec::with_capacity(m + 2);
        let (mut mask, mut j) = (full, last);
        loop {
            order.push(self.others[j]);
            let parent = self.parent[mask * m + j];
            mask ^= 1 << j;
            if mask == 0 || parent == NO_PARENT {
                break;
            }
            j = parent as usize;
        }
        order.push(self.start);
        order.reverse();
        order.push(self.start);

        self.best = Some(Tour { order, length });
    }
}

/// Bytes of the cost and parent tables for a graph with `n` vertices, `None` on overflow
fn table_bytes(n: NumNodes) -> Option<usize> {
    let m = n.saturating_sub(1) as usize;
    1usize
        .checked_shl(m as u32)?
        .checked_mul(m)?
        .checked_mul(size_of::<Weight>() + size_of::<u8>())
}

/// Largest number of vertices accepted regardless of the caller's limit
pub fn size_limit() -> NumNodes {
    (1..=HARD_MAX_NODES)
        .take_while(|&n| table_bytes(n).is_some_and(|bytes| bytes <= MAX_TABLE_BYTES))
        .last()
        .unwrap_or(1)
}

fn bits_of(mask: usize) -> impl Iterator<Item = usize> {
    let mut rest = mask;
    std::iter::from_fn(move || {
        if rest == 0 {
            return None;
        }
        let j = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        Some(j)
    })
}

impl IterativeAlgorithm<Tour> for HeldKarp {
    fn execute_step(&mut self) {
        let end = 1usize << self.others.len();
        for _ in 0..MASKS_PER_STEP {
            if self.completed {
                return;
            }

            if self.next_mask == end {
                self.finish();
                return;
            }

            self.process_mask(self.next_mask);
            self.next_mask += 1;
        }
    }

    fn is_completed(&self) -> bool {
        self.completed
    }

    fn best_known_solution(&mut self) -> Option<Tour> {
        self.best.clone()
    }
}

impl TerminatingIterativeAlgorithm<Tour> for HeldKarp {}

pub fn held_karp(graph: &Graph, start: Node, max_nodes: NumNodes) -> Result<Tour> {
    run_exact_solver(HeldKarp::new(graph, start, max_nodes)?, None, "Held-Karp")
}
