//! The exact solvers are exponential, so they are implemented via the [`IterativeAlgorithm`] trait.
//!
//! An algorithm does a bounded amount of work per step and then returns control to the caller,
//! which decides whether to continue (timeouts, Ctrl-C) and may query the best tour found so far.

use crate::utils::signal_handling;
use std::time::{Duration, Instant};

/// [`IterativeAlgorithm`] provides a consistent interface to execute long-running solvers.
/// Construction is left to the solver since each has specific parameters; it should be cheap.
///
/// Adopters implement [`IterativeAlgorithm::execute_step`], [`IterativeAlgorithm::is_completed`]
/// and [`IterativeAlgorithm::best_known_solution`]. Algorithms that eventually terminate should
/// also implement the marker trait [`TerminatingIterativeAlgorithm`].
///
/// # Example
/// ```
/// use tsp::algorithm::{IterativeAlgorithm, TerminatingIterativeAlgorithm};
///
/// struct CountDown {
///     remaining: u32,
/// }
///
/// impl IterativeAlgorithm<u32> for CountDown {
///     fn execute_step(&mut self) {
///         self.remaining -= 1;
///     }
///
///     fn is_completed(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn best_known_solution(&mut self) -> Option<u32> {
///         self.is_completed().then_some(42)
///     }
/// }
///
/// impl TerminatingIterativeAlgorithm<u32> for CountDown {}
///
/// assert_eq!(CountDown { remaining: 3 }.run_to_completion(), Some(42));
/// ```
pub trait IterativeAlgorithm<Result> {
    /// Advances the computation. A step should take at most a few milliseconds for expected inputs.
    fn execute_step(&mut self);

    /// Returns true iff the algorithm is completed and [`IterativeAlgorithm::execute_step`] may not
    /// be called again.
    fn is_completed(&self) -> bool;

    /// Returns the currently best known solution or None if no solution is known yet.
    fn best_known_solution(&mut self) -> Option<Result>;

    /// Keeps calling [`IterativeAlgorithm::execute_step`] until the `predicate` becomes false, a
    /// termination signal was received, or [`IterativeAlgorithm::is_completed`] becomes true.
    /// The `predicate` is evaluated after each step, i.e. at least one step is carried out.
    fn run_while<F: FnMut(&mut Self) -> bool>(&mut self, mut predicate: F) {
        while !self.is_completed() && !signal_handling::received_ctrl_c() {
            self.execute_step();

            if !predicate(self) {
                break;
            }
        }
    }

    /// Like [`IterativeAlgorithm::run_while`] with a deadline. The timeout only prevents further
    /// calls of [`IterativeAlgorithm::execute_step`]; a running step is not aborted.
    fn run_until_timeout(&mut self, timeout: Duration) {
        let start = Instant::now();
        self.run_while(|_| start.elapsed() < timeout);
    }
}

/// Marker trait for algorithms that eventually terminate.
pub trait TerminatingIterativeAlgorithm<Result>: IterativeAlgorithm<Result> {
    /// Execute the algorithm until it completed (or the termination signal was received) and
    /// return the solution if one was found.
    fn run_to_completion(&mut self) -> Option<Result> {
        while !self.is_completed() && !signal_handling::received_ctrl_c() {
            self.execute_step();
        }
        self.best_known_solution()
    }
}
