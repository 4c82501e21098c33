//! Supporting data structures shared by the graph algorithms.

mod bitset;

pub use bitset::BitSet;
