use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::graph::{Node, NumNodes};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: std::error::Error> {
    fn is_correct(&self) -> std::result::Result<(), E>;
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed input in {} (line {line}): {reason}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("vertex {0} does not exist")]
    MissingVertex(Node),
    #[error("vertex id {found} is out of sequence; expected {expected}")]
    DuplicateVertex { expected: Node, found: Node },
    #[error("no tour exists: {0}")]
    Infeasible(String),
    #[error("{nodes} vertices exceed the limit of {limit} for this solver")]
    SizeExceeded { nodes: NumNodes, limit: NumNodes },
    #[error("interrupted before a tour was found")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn infeasible(message: impl Into<String>) -> Self {
        Self::Infeasible(message.into())
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

/// Violation of the [`InvariantCheck`] of a [`crate::tour::Tour`]
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum TourError {
    #[error("tour is empty")]
    Empty,
    #[error("tour starts at {first} but ends at {last}")]
    NotClosed { first: Node, last: Node },
    #[error("tour visits {visited} distinct vertices, graph has {expected}")]
    WrongSize { visited: NumNodes, expected: NumNodes },
    #[error("vertex {0} is visited more than once")]
    Repeated(Node),
    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(Node),
}
