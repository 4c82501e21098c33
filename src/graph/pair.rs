//! Endpoint pairs used as arrow values.
//!
//! [`Pair`] is an ordered `(first, second)` pair, the natural arrow value for a
//! graph whose arrows carry nothing but their endpoints. [`UnorderedPair`]
//! compares and hashes symmetrically, which is what undirected bookkeeping such
//! as spanning-forest construction needs.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// An ordered pair of values.
///
/// Two pairs are equal only if both components are equal in the same position.
///
/// # Examples
///
/// ```rust
/// use digraph::Pair;
///
/// let ab = Pair::new("A", "B");
/// assert_eq!(ab.first(), &"A");
/// assert_eq!(ab.second(), &"B");
/// assert_ne!(ab, Pair::new("B", "A"));
/// assert_eq!(ab.reversed(), Pair::new("B", "A"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pair<V> {
    first: V,
    second: V,
}

impl<V> Pair<V> {
    /// Creates a new ordered pair.
    #[must_use]
    pub const fn new(first: V, second: V) -> Self {
        Pair { first, second }
    }

    /// Returns the first component.
    #[must_use]
    pub const fn first(&self) -> &V {
        &self.first
    }

    /// Returns the second component.
    #[must_use]
    pub const fn second(&self) -> &V {
        &self.second
    }

    /// Returns the pair with its components swapped.
    #[must_use]
    pub fn reversed(self) -> Self {
        Pair {
            first: self.second,
            second: self.first,
        }
    }

    /// Splits the pair into its components.
    #[must_use]
    pub fn into_inner(self) -> (V, V) {
        (self.first, self.second)
    }
}

impl<V> From<(V, V)> for Pair<V> {
    fn from((first, second): (V, V)) -> Self {
        Pair::new(first, second)
    }
}

impl<V: fmt::Debug> fmt::Debug for Pair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}->{:?}", self.first, self.second)
    }
}

impl<V: fmt::Display> fmt::Display for Pair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.first, self.second)
    }
}

/// A pair of values whose equality ignores component order.
///
/// `UnorderedPair::new(a, b) == UnorderedPair::new(b, a)`, and both hash to the
/// same value. The components are still retrievable in construction order.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashSet;
/// use digraph::UnorderedPair;
///
/// let mut seen = HashSet::new();
/// seen.insert(UnorderedPair::new(1, 2));
/// assert!(seen.contains(&UnorderedPair::new(2, 1)));
/// ```
#[derive(Clone, Copy)]
pub struct UnorderedPair<V> {
    first: V,
    second: V,
}

impl<V> UnorderedPair<V> {
    /// Creates a new unordered pair.
    #[must_use]
    pub const fn new(first: V, second: V) -> Self {
        UnorderedPair { first, second }
    }

    /// Returns the first component in construction order.
    #[must_use]
    pub const fn first(&self) -> &V {
        &self.first
    }

    /// Returns the second component in construction order.
    #[must_use]
    pub const fn second(&self) -> &V {
        &self.second
    }

    /// Returns `true` if `value` is one of the components.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.first == *value || self.second == *value
    }
}

impl<V: PartialEq> PartialEq for UnorderedPair<V> {
    fn eq(&self, other: &Self) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }
}

impl<V: Eq> Eq for UnorderedPair<V> {}

impl<V: Hash> Hash for UnorderedPair<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Combine the component hashes with a commutative operation
        let mut first = std::collections::hash_map::DefaultHasher::new();
        self.first.hash(&mut first);
        let mut second = std::collections::hash_map::DefaultHasher::new();
        self.second.hash(&mut second);
        state.write_u64(first.finish() ^ second.finish());
    }
}

impl<V: fmt::Debug> fmt::Debug for UnorderedPair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}, {:?}}}", self.first, self.second)
    }
}

impl<V> From<Pair<V>> for UnorderedPair<V> {
    fn from(pair: Pair<V>) -> Self {
        let (first, second) = pair.into_inner();
        UnorderedPair::new(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_is_ordered() {
        let ab = Pair::new('a', 'b');
        assert_ne!(ab, Pair::new('b', 'a'));
        assert_eq!(ab.reversed(), Pair::new('b', 'a'));
        assert_eq!(format!("{ab:?}"), "'a'->'b'");
        assert_eq!(format!("{ab}"), "a->b");
    }

    #[test]
    fn test_unordered_pair_symmetric_equality() {
        let ab = UnorderedPair::new("a", "b");
        let ba = UnorderedPair::new("b", "a");
        assert_eq!(ab, ba);
        assert_ne!(ab, UnorderedPair::new("a", "c"));
        assert!(ab.contains(&"b"));
        assert!(!ab.contains(&"c"));
    }

    #[test]
    fn test_unordered_pair_symmetric_hash() {
        let set: HashSet<UnorderedPair<u32>> = [
            UnorderedPair::new(1, 2),
            UnorderedPair::new(2, 1),
            UnorderedPair::new(2, 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unordered_pair_self_loop() {
        assert_eq!(UnorderedPair::new(4, 4), UnorderedPair::new(4, 4));
        assert_ne!(UnorderedPair::new(4, 4), UnorderedPair::new(4, 5));
    }
}
