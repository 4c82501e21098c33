//! A fixed-capacity bit vector used as a dense visited set.
//!
//! Traversals and searches over integer graphs mark vertices by their dense
//! index. A [`BitSet`] stores one bit per vertex, 64 vertices per word, which
//! keeps the visited state of large graphs in a few cache lines.
//!
//! # Example
//!
//! ```rust
//! use digraph::utils::BitSet;
//!
//! let mut visited = BitSet::new(100);
//! assert!(visited.insert(50));
//! assert!(!visited.insert(50));
//! assert!(visited.contains(50));
//! assert_eq!(visited.iter().collect::<Vec<_>>(), vec![50]);
//! ```

use std::fmt;

use crate::graph::VertexId;

const WORD_BITS: usize = 64;

/// A compact set of indices in `0..len`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Creates an empty set able to hold the indices `0..capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            len: capacity,
        }
    }

    /// Returns the capacity of the set, which is one past the largest index
    /// it can hold.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no index is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Sets `index` and returns `true` if it was not set before.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < self.len, "index {index} out of bounds for {}", self.len);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    /// Clears `index` and returns `true` if it was set before.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        assert!(index < self.len, "index {index} out of bounds for {}", self.len);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        let present = *word & mask != 0;
        *word &= !mask;
        present
    }

    /// Returns `true` if `index` is set. Indices past the capacity are never set.
    #[must_use]
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Returns the number of set indices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Clears every index, keeping the capacity.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Clears every index and changes the capacity to `capacity`.
    ///
    /// Reuses the existing allocation when it is large enough.
    pub fn reset(&mut self, capacity: usize) {
        self.words.clear();
        self.words.resize(capacity.div_ceil(WORD_BITS), 0);
        self.len = capacity;
    }

    /// Returns an iterator over the set indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(w * WORD_BITS + bit)
            })
        })
    }

    /// Turns the set into a visited predicate for integer traversals.
    ///
    /// The returned closure marks a vertex and returns `true` only the first
    /// time it sees it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use digraph::{utils::BitSet, VertexId};
    ///
    /// let mut visit = BitSet::new(4).into_visitor();
    /// assert!(visit(&VertexId::new(2)));
    /// assert!(!visit(&VertexId::new(2)));
    /// ```
    pub fn into_visitor(mut self) -> impl FnMut(&VertexId) -> bool {
        move |vertex| self.insert(vertex.index())
    }

    /// Borrows the set as a visited predicate; marks stay in the set after
    /// the traversal ends.
    pub fn visitor(&mut self) -> impl FnMut(&VertexId) -> bool + '_ {
        move |vertex| self.insert(vertex.index())
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<VertexId> for BitSet {
    /// Collects vertex ids into a set sized to the largest id.
    fn from_iter<I: IntoIterator<Item = VertexId>>(iter: I) -> Self {
        let ids: Vec<usize> = iter.into_iter().map(VertexId::index).collect();
        let mut set = BitSet::new(ids.iter().max().map_or(0, |&max| max + 1));
        for id in ids {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitset_basic() {
        let mut bs = BitSet::new(100);
        assert!(bs.is_empty());
        assert_eq!(bs.count(), 0);

        assert!(bs.insert(0));
        assert!(bs.insert(50));
        assert!(bs.insert(99));
        assert!(!bs.insert(99));

        assert!(!bs.is_empty());
        assert_eq!(bs.count(), 3);
        assert!(bs.contains(50));
        assert!(!bs.contains(1));
        assert!(!bs.contains(1000));
    }

    #[test]
    fn test_bitset_remove() {
        let mut bs = BitSet::new(10);
        bs.insert(4);
        assert!(bs.remove(4));
        assert!(!bs.remove(4));
        assert!(!bs.contains(4));
    }

    #[test]
    fn test_bitset_iter_across_words() {
        let mut bs = BitSet::new(200);
        for i in [0, 63, 64, 127, 128, 199] {
            bs.insert(i);
        }
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![0, 63, 64, 127, 128, 199]);
        assert_eq!(format!("{bs:?}"), "{0, 63, 64, 127, 128, 199}");
    }

    #[test]
    fn test_bitset_reset() {
        let mut bs = BitSet::new(10);
        bs.insert(3);
        bs.reset(130);
        assert_eq!(bs.len(), 130);
        assert!(bs.is_empty());
        assert!(bs.insert(129));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_bitset_insert_out_of_bounds() {
        let mut bs = BitSet::new(8);
        bs.insert(8);
    }

    #[test]
    fn test_bitset_visitor_keeps_marks() {
        let mut bs = BitSet::new(5);
        {
            let mut visit = bs.visitor();
            assert!(visit(&VertexId::new(1)));
            assert!(!visit(&VertexId::new(1)));
            assert!(visit(&VertexId::new(4)));
        }
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_bitset_from_vertex_ids() {
        let bs: BitSet = [VertexId::new(3), VertexId::new(7)].into_iter().collect();
        assert_eq!(bs.len(), 8);
        assert_eq!(bs.count(), 2);
    }
}
