use super::*;
use serde::Serialize;

pub trait EdgeOps {
    fn normalized(&self) -> Self;
    fn is_normalized(&self) -> bool;
    fn is_loop(&self) -> bool;
    fn reverse(&self) -> Self;
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
pub struct Edge(pub Node, pub Node);

/// An undirected connection together with its weight. Used wherever edges are sorted or
/// collected outside of a [`Graph`], e.g. spanning trees and matchings.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct WeightedEdge(pub Node, pub Node, pub Weight);

/// Non-owning handle of a [`DirectedEdge`]: the origin vertex and the position within its
/// adjacency list. Resolved through [`Graph::resolve`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct EdgeRef {
    pub node: Node,
    pub index: u32,
}

/// Every undirected connection of a [`Graph`] is stored as two `DirectedEdge`s, each pointing
/// to the other via `reverse`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DirectedEdge {
    pub origin: Node,
    pub destination: Node,
    pub weight: Weight,
    pub reverse: EdgeRef,
}

impl DirectedEdge {
    pub fn as_edge(&self) -> Edge {
        Edge(self.origin, self.destination)
    }

    pub fn as_weighted(&self) -> WeightedEdge {
        WeightedEdge(self.origin, self.destination, self.weight)
    }
}

impl EdgeOps for Edge {
    fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl EdgeOps for WeightedEdge {
    fn normalized(&self) -> Self {
        WeightedEdge(self.0.min(self.1), self.0.max(self.1), self.2)
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        WeightedEdge(self.1, self.0, self.2)
    }
}

impl WeightedEdge {
    pub fn weight(&self) -> Weight {
        self.2
    }

    pub fn as_edge(&self) -> Edge {
        Edge(self.0, self.1)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}
