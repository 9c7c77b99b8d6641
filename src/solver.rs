use std::{fmt, str::FromStr, time::Duration};

use log::info;
use serde::Serialize;

use crate::{
    errors::Result,
    exact::{self, BranchAndBound, FeatureConfiguration, HeldKarp},
    graph::*,
    heuristic,
    tour::{RealWorldTour, Tour},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Backtracking,
    HeldKarp,
    DoubleTree,
    NearestNeighbour,
    Christofides,
    RealWorld,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Backtracking,
        Algorithm::HeldKarp,
        Algorithm::DoubleTree,
        Algorithm::NearestNeighbour,
        Algorithm::Christofides,
        Algorithm::RealWorld,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Backtracking => "backtracking",
            Algorithm::HeldKarp => "held-karp",
            Algorithm::DoubleTree => "double-tree",
            Algorithm::NearestNeighbour => "nearest-neighbour",
            Algorithm::Christofides => "christofides",
            Algorithm::RealWorld => "real-world",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase().replace('_', "-");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown algorithm {s:?}; expected one of {}",
                    Algorithm::ALL.map(|a| a.name()).join(", ")
                )
            })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    pub start: Node,
    /// Larger graphs are rejected by Held-Karp before any allocation
    pub held_karp_max_nodes: NumNodes,
    /// Deadline for the exact solvers; `None` runs them to completion
    pub timeout: Option<Duration>,
    pub branch_and_bound: FeatureConfiguration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            start: 0,
            held_karp_max_nodes: exact::held_karp::DEFAULT_MAX_NODES,
            timeout: None,
            branch_and_bound: FeatureConfiguration::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Solution {
    Tour(Tour),
    RealWorld(RealWorldTour),
}

impl Solution {
    pub fn tour(&self) -> &Tour {
        match self {
            Solution::Tour(tour) => tour,
            Solution::RealWorld(result) => &result.tour,
        }
    }
}

/// Runs exactly one algorithm; there is no fallback to another algorithm on failure
pub fn solve(graph: &Graph, algorithm: Algorithm, config: &SolverConfig) -> Result<Solution> {
    info!(
        "Solve n={} m={} with {algorithm} from vertex {}",
        graph.number_of_nodes(),
        graph.number_of_edges(),
        config.start
    );

    let start = config.start;
    let tour = match algorithm {
        Algorithm::Backtracking => {
            let mut algo = BranchAndBound::new(graph, start)?;
            algo.configure_features(config.branch_and_bound);
            exact::run_exact_solver(algo, config.timeout, "Branch-and-bound")?
        }
        Algorithm::HeldKarp => {
            let algo = HeldKarp::new(graph, start, config.held_karp_max_nodes)?;
            exact::run_exact_solver(algo, config.timeout, "Held-Karp")?
        }
        Algorithm::DoubleTree => heuristic::double_tree(graph, start)?,
        Algorithm::NearestNeighbour => heuristic::nearest_neighbour(graph, start)?,
        Algorithm::Christofides => heuristic::christofides(graph, start)?,
        Algorithm::RealWorld => return Ok(Solution::RealWorld(heuristic::real_world(graph, start)?)),
    };

    Ok(Solution::Tour(tour))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::{Error, InvariantCheck};
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn toy_cycle() -> Graph {
        Graph::test_only_from([(0, 1, 10.0), (1, 2, 15.0), (2, 3, 20.0), (3, 0, 25.0)])
    }

    #[test]
    fn names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!("Held_Karp".parse::<Algorithm>(), Ok(Algorithm::HeldKarp));
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn every_algorithm_on_toy_cycle() {
        let graph = toy_cycle();
        let config = SolverConfig::default();

        for algorithm in Algorithm::ALL {
            let solution = solve(&graph, algorithm, &config).unwrap();
            let tour = solution.tour();
            assert!((tour, &graph).is_correct().is_ok(), "{algorithm}");

            match algorithm {
                Algorithm::DoubleTree | Algorithm::Christofides => assert!(tour.length >= 70.0),
                _ => assert_eq!(tour.length, 70.0, "{algorithm}"),
            }
        }

        assert!(matches!(
            solve(&graph, Algorithm::RealWorld, &config),
            Ok(Solution::RealWorld(RealWorldTour { unpriced_jumps: 0, .. }))
        ));
    }

    #[test]
    fn missing_start_for_every_algorithm() {
        let graph = toy_cycle();
        let config = SolverConfig {
            start: 4,
            ..Default::default()
        };

        for algorithm in Algorithm::ALL {
            assert!(
                matches!(solve(&graph, algorithm, &config), Err(Error::MissingVertex(4))),
                "{algorithm}"
            );
        }
    }

    #[test]
    fn held_karp_limit_from_config() {
        let graph = toy_cycle();
        let config = SolverConfig {
            held_karp_max_nodes: 3,
            ..Default::default()
        };

        assert!(matches!(
            solve(&graph, Algorithm::HeldKarp, &config),
            Err(Error::SizeExceeded { nodes: 4, limit: 3 })
        ));
        assert!(solve(&graph, Algorithm::Backtracking, &config).is_ok());
    }

    #[test]
    fn timeout_still_returns_tour() {
        let graph = toy_cycle();
        let config = SolverConfig {
            timeout: Some(Duration::from_secs(60)),
            ..Default::default()
        };
        let solution = solve(&graph, Algorithm::Backtracking, &config).unwrap();
        assert_eq!(solution.tour().length, 70.0);
    }

    #[test]
    fn zero_timeout_interrupts_exact_solvers() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let graph = random_metric_graph(&mut rng, 14);
        let config = SolverConfig {
            timeout: Some(Duration::ZERO),
            branch_and_bound: FeatureConfiguration::pessimistic(),
            ..Default::default()
        };

        let solution = solve(&graph, Algorithm::Backtracking, &config).unwrap();
        assert!(solution.tour().is_tour_of(14).is_ok());

        assert!(matches!(
            solve(&graph, Algorithm::HeldKarp, &config),
            Err(Error::Interrupted)
        ));
    }
}
