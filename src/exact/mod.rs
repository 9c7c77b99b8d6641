pub mod branch_and_bound;
pub mod held_karp;

pub use branch_and_bound::{BranchAndBound, FeatureConfiguration};
pub use held_karp::HeldKarp;

use std::time::Duration;

use log::{info, warn};

use crate::{
    algorithm::IterativeAlgorithm,
    errors::{Error, Result},
    tour::Tour,
};

/// Drives an exact solver until completion, `timeout` or Ctrl-C. A tour found before an
/// interruption is returned with a warning; without any tour the result is `Interrupted`, or
/// `Infeasible` if the search space was exhausted.
pub fn run_exact_solver<A: IterativeAlgorithm<Tour>>(
    mut algo: A,
    timeout: Option<Duration>,
    name: &str,
) -> Result<Tour> {
    match timeout {
        Some(timeout) => algo.run_until_timeout(timeout),
        None => algo.run_while(|_| true),
    }

    let completed = algo.is_completed();
    match (algo.best_known_solution(), completed) {
        (Some(tour), true) => {
            info!("{name} found optimal tour of length {}", tour.length);
            Ok(tour)
        }
        (Some(tour), false) => {
            warn!(
                "{name} was interrupted; tour of length {} is not proven optimal",
                tour.length
            );
            Ok(tour)
        }
        (None, true) => Err(Error::infeasible(format!(
            "{name} exhausted the search without finding a Hamiltonian cycle"
        ))),
        (None, false) => Err(Error::Interrupted),
    }
}
