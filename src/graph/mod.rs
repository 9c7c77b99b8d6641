pub mod adj_array;
pub mod bitset;
pub mod connectivity;
pub mod edge;
pub mod euler;
pub mod metric;
pub mod shortest_path;
pub mod spanning_tree;
pub mod traversal;
pub mod vertex;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;
pub type Weight = f64;

use std::ops::Range;

pub use adj_array::*;
pub use bitset::*;
pub use connectivity::*;
pub use edge::*;
pub use euler::*;
pub use metric::*;
pub use shortest_path::*;
pub use spanning_tree::*;
pub use traversal::*;
pub use vertex::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
        self.vertices_range()
    }

    /// Returns a range of vertices. In contrast to self.vertices(), the range does not borrow
    /// self and hence may be used where additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of undirected edges of the graph
    fn number_of_edges(&self) -> NumEdges;
}

pub trait AdjacencyList: GraphNodeOrder + Sized {
    /// Returns the outgoing edges of a given vertex.
    /// ** Panics if the u >= n **
    fn edges_of(&self, u: Node) -> &[DirectedEdge];

    /// Returns the number of outgoing edges of [`u`]
    fn degree_of(&self, u: Node) -> NumNodes {
        self.edges_of(u).len() as NumNodes
    }

    /// Returns the destinations of all outgoing edges of [`u`] (with repetitions for parallel edges)
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.edges_of(u).iter().map(|e| e.destination)
    }

    fn degrees(&self) -> impl Iterator<Item = NumNodes> + '_ {
        self.vertices().map(|u| self.degree_of(u))
    }
}

/// Provides tests whether an edge exists
pub trait AdjacencyTest {
    /// Returns *true* exactly if the graph contains an edge (u, v)
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.weight_of(u, v).is_some()
    }

    /// Returns the weight of the cheapest edge (u, v), if any
    fn weight_of(&self, u: Node, v: Node) -> Option<Weight>;
}
