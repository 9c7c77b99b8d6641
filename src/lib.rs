pub mod algorithm;
pub mod errors;
pub mod exact;
pub mod graph;
pub mod heuristic;
pub mod io;
pub mod log;
pub mod solver;
pub mod tour;
pub mod utils;

pub mod prelude {
    pub use super::algorithm::*;
    pub use super::errors::*;
    pub use super::exact::*;
    pub use super::graph::*;
    pub use super::heuristic::*;
    pub use super::io::{
        DistanceSource, GraphCsvReader, GraphFormat, ReaderOptions, RowReader, read_graph,
    };
    pub use super::solver::*;
    pub use super::tour::*;
    pub use super::utils::signal_handling;
}

#[cfg(test)]
mod testing;
