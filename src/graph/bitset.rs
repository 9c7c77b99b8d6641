use super::*;
use bitvec::prelude::*;
use std::fmt::{Debug, Formatter};
use std::ops::Index;
use std::fmt;

/// Fixed-size set of nodes; used as call-local visited marker by all traversals and solvers
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    cardinality: NumNodes,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bit_vec: [{}]}}",
            self.cardinality,
            values.join(", "),
        )
    }
}

const fn block_size() -> usize {
    std::mem::size_of::<usize>() * 8
}

impl BitSet {
    #[inline]
    pub fn new(size: NumNodes) -> Self {
        Self {
            cardinality: 0,
            bit_vec: BitVec::repeat(false, size as usize),
        }
    }

    #[inline]
    pub fn full(&self) -> bool {
        self.cardinality as usize == self.bit_vec.len()
    }

    /// Sets the bit and returns its previous value
    #[inline]
    pub fn set_bit(&mut self, idx: Node) -> bool {
        let prev = self.bit_vec.replace(idx as usize, true);
        self.cardinality += !prev as NumNodes;
        prev
    }

    /// Clears the bit and returns its previous value
    #[inline]
    pub fn unset_bit(&mut self, idx: Node) -> bool {
        let prev = self.bit_vec.replace(idx as usize, false);
        self.cardinality -= prev as NumNodes;
        prev
    }

    #[inline]
    pub fn cardinality(&self) -> NumNodes {
        self.cardinality
    }

    #[inline]
    pub fn len(&self) -> NumNodes {
        self.bit_vec.len() as NumNodes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_vec.is_empty()
    }

    pub fn unset_all(&mut self) {
        self.bit_vec.fill(false);
        self.cardinality = 0;
    }

    #[inline]
    pub fn get_first_unset(&self) -> Option<Node> {
        if self.cardinality != self.len() {
            return self.get_next_unset(0);
        }
        None
    }

    #[inline]
    pub fn get_next_unset(&self, idx: Node) -> Option<Node> {
        let idx = idx as usize;
        if idx >= self.bit_vec.len() {
            return None;
        }
        let mut block_idx = idx / block_size();
        let word_idx = idx % block_size();
        let mut block = self.bit_vec.as_raw_slice()[block_idx];
        let max = self.bit_vec.as_raw_slice().len();
        block |= (1usize << word_idx) - 1;
        while block == usize::MAX {
            block_idx += 1;
            if block_idx >= max {
                return None;
            }
            block = self.bit_vec.as_raw_slice()[block_idx];
        }
        let v = block_idx * block_size() + block.trailing_ones() as usize;
        if v >= self.bit_vec.len() {
            None
        } else {
            Some(v as Node)
        }
    }

    #[inline]
    pub fn at(&self, idx: Node) -> bool {
        self.bit_vec[idx as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.bit_vec.iter_ones().map(|i| i as Node)
    }

    pub fn iter_cleared_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.bit_vec.iter_zeros().map(|i| i as Node)
    }
}

impl Index<Node> for BitSet {
    type Output = bool;

    #[inline]
    fn index(&self, index: Node) -> &Self::Output {
        self.bit_vec.index(index as usize)
    }
}
