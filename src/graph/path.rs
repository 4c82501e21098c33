//! Immutable path values returned by the path finders.
//!
//! A [`VertexPath`] lists the vertices visited from start to goal, an [`EdgePath`]
//! lists the arrows taken. Both are built once by a search and never change;
//! they expose their contents as slices and iterators only.
//! [`CostedPath`] pairs a path with the accumulated cost the search assigned to it.

use std::{fmt, ops::Index, sync::Arc};

/// An ordered, immutable sequence of vertices.
///
/// A path found by a search always contains at least the start vertex. A path
/// of a single vertex means the start already satisfied the goal.
///
/// Cloning a `VertexPath` is cheap; the vertices are shared.
///
/// # Examples
///
/// ```rust
/// use digraph::VertexPath;
///
/// let path = VertexPath::new(vec!["A", "B", "C"]);
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.first(), Some(&"A"));
/// assert_eq!(path.last(), Some(&"C"));
/// assert_eq!(path.arrow_count(), 2);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VertexPath<V> {
    vertices: Arc<[V]>,
}

impl<V> VertexPath<V> {
    /// Creates a path from the given vertices.
    #[must_use]
    pub fn new(vertices: Vec<V>) -> Self {
        VertexPath {
            vertices: vertices.into(),
        }
    }

    /// Returns the number of vertices on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the path contains no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of arrows on the path.
    #[must_use]
    pub fn arrow_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns the start vertex.
    #[must_use]
    pub fn first(&self) -> Option<&V> {
        self.vertices.first()
    }

    /// Returns the goal vertex.
    #[must_use]
    pub fn last(&self) -> Option<&V> {
        self.vertices.last()
    }

    /// Returns the vertices as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[V] {
        &self.vertices
    }

    /// Returns an iterator over the vertices.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.vertices.iter()
    }

    /// Returns `true` if `vertex` occurs on the path.
    pub fn contains(&self, vertex: &V) -> bool
    where
        V: PartialEq,
    {
        self.vertices.contains(vertex)
    }
}

impl<V> Index<usize> for VertexPath<V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        &self.vertices[index]
    }
}

impl<'a, V> IntoIterator for &'a VertexPath<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

impl<V> FromIterator<V> for VertexPath<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        VertexPath::new(iter.into_iter().collect())
    }
}

impl<V: fmt::Debug> fmt::Debug for VertexPath<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexPath")?;
        f.debug_list().entries(self.vertices.iter()).finish()
    }
}

/// An ordered, immutable sequence of arrows.
///
/// The arrows are the arrow values of the searched graph, in the order they are
/// traversed. A search whose start satisfies the goal yields an empty edge path.
///
/// # Examples
///
/// ```rust
/// use digraph::{EdgePath, Pair};
///
/// let path = EdgePath::new(vec![Pair::new("A", "B"), Pair::new("B", "C")]);
/// assert_eq!(path.len(), 2);
/// assert_eq!(path[1], Pair::new("B", "C"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EdgePath<A> {
    arrows: Arc<[A]>,
}

impl<A> EdgePath<A> {
    /// Creates a path from the given arrows.
    #[must_use]
    pub fn new(arrows: Vec<A>) -> Self {
        EdgePath {
            arrows: arrows.into(),
        }
    }

    /// Returns the number of arrows on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    /// Returns `true` if the path contains no arrows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }

    /// Returns the arrows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[A] {
        &self.arrows
    }

    /// Returns an iterator over the arrows.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.arrows.iter()
    }
}

impl<A> Index<usize> for EdgePath<A> {
    type Output = A;

    fn index(&self, index: usize) -> &A {
        &self.arrows[index]
    }
}

impl<'a, A> IntoIterator for &'a EdgePath<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.arrows.iter()
    }
}

impl<A> FromIterator<A> for EdgePath<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        EdgePath::new(iter.into_iter().collect())
    }
}

impl<A: fmt::Debug> fmt::Debug for EdgePath<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgePath")?;
        f.debug_list().entries(self.arrows.iter()).finish()
    }
}

/// A path together with the cost accumulated along it.
///
/// Any-path searches report the number of arrows as cost.
#[derive(Debug, Clone, PartialEq)]
pub struct CostedPath<P> {
    /// The path itself.
    pub path: P,
    /// The summed cost of all arrows on the path.
    pub cost: f64,
}

impl<P> CostedPath<P> {
    /// Creates a new costed path.
    #[must_use]
    pub const fn new(path: P, cost: f64) -> Self {
        CostedPath { path, cost }
    }

    /// Discards the cost and returns the path.
    #[must_use]
    pub fn into_path(self) -> P {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_path_accessors() {
        let path: VertexPath<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(path.len(), 3);
        assert_eq!(path.arrow_count(), 2);
        assert_eq!(path.first(), Some(&1));
        assert_eq!(path.last(), Some(&3));
        assert!(path.contains(&2));
        assert_eq!(path[1], 2);
        assert_eq!(path.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_vertex_path_single_vertex() {
        let path = VertexPath::new(vec!["A"]);
        assert_eq!(path.arrow_count(), 0);
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn test_vertex_path_clone_shares_storage() {
        let path = VertexPath::new(vec![String::from("x"), String::from("y")]);
        let copy = path.clone();
        assert_eq!(path, copy);
        assert!(std::ptr::eq(path.as_slice(), copy.as_slice()));
    }

    #[test]
    fn test_edge_path_debug() {
        let path = EdgePath::new(vec!["a", "b"]);
        assert_eq!(format!("{path:?}"), "EdgePath[\"a\", \"b\"]");
        assert!(EdgePath::<u8>::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_costed_path_into_path() {
        let costed = CostedPath::new(VertexPath::new(vec![1, 2]), 3.5);
        assert_eq!(costed.cost, 3.5);
        assert_eq!(costed.into_path().len(), 2);
    }
}
