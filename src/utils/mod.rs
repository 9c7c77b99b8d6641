pub mod radix;
pub mod signal_handling;
pub mod union_find;

pub use union_find::UnionFind;
