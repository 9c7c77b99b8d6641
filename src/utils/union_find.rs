use crate::graph::{Node, NumNodes};

/// Disjoint sets over `0..n` with path halving and union by size
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<Node>,
    size: Vec<NumNodes>,
    number_of_sets: NumNodes,
}

impl UnionFind {
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n as usize],
            number_of_sets: n,
        }
    }

    pub fn find(&mut self, mut u: Node) -> Node {
        while self.parent[u as usize] != u {
            let grand_parent = self.parent[self.parent[u as usize] as usize];
            self.parent[u as usize] = grand_parent;
            u = grand_parent;
        }
        u
    }

    /// Merges the sets of `u` and `v`; returns false if they were already the same
    pub fn union(&mut self, u: Node, v: Node) -> bool {
        let (mut ru, mut rv) = (self.find(u), self.find(v));
        if ru == rv {
            return false;
        }

        if self.size[ru as usize] < self.size[rv as usize] {
            std::mem::swap(&mut ru, &mut rv);
        }

        self.parent[rv as usize] = ru;
        self.size[ru as usize] += self.size[rv as usize];
        self.number_of_sets -= 1;
        true
    }

    pub fn number_of_sets(&self) -> NumNodes {
        self.number_of_sets
    }
}
