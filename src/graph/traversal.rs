use super::*;
use std::collections::VecDeque;

/// Breadth-first search that can be restarted at unvisited nodes once it runs dry
pub struct BFS<'a, G: AdjacencyList> {
    graph: &'a G,
    visited: BitSet,
    queue: VecDeque<Node>,
}

impl<G: AdjacencyList> Iterator for BFS<'_, G> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for v in self.graph.neighbors_of(u) {
            if !self.visited.set_bit(v) {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.queue.len(),
            Some(self.graph.len() - self.visited.cardinality() as usize + self.queue.len()),
        )
    }
}

impl<'a, G: AdjacencyList> BFS<'a, G> {
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut visited = BitSet::new(graph.number_of_nodes());
        visited.set_bit(start);
        Self {
            graph,
            visited,
            queue: VecDeque::from(vec![start]),
        }
    }

    /// Tries to restart the search at an yet unvisited node and returns
    /// true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        debug_assert!(self.queue.is_empty());
        match self.visited.get_first_unset() {
            None => false,
            Some(x) => {
                self.visited.set_bit(x);
                self.queue.push_back(x);
                true
            }
        }
    }
}

pub trait Traversal: AdjacencyList + Sized {
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }
}

impl<G: AdjacencyList> Traversal for G {}
