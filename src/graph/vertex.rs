//! Dense vertex identifier for the integer-indexed graph representation.
//!
//! This module provides the [`VertexId`] type, a strongly-typed index into the
//! `0..vertex_count` range of an integer graph. The newtype wrapper keeps vertex
//! indices from being confused with arrow slots, offsets or arrow counts, which
//! are all plain `usize` values in the compact representation.

use std::fmt;

/// A strongly-typed identifier for a vertex of an integer-indexed graph.
///
/// `VertexId` wraps a `usize` index. Integer graphs keep their vertices dense:
/// a graph with `n` vertices uses exactly the ids `0..n`, and removing a vertex
/// from an [`IntGraphBuilder`](crate::IntGraphBuilder) compacts the range by
/// moving the last vertex into the freed slot.
///
/// # Examples
///
/// ```rust
/// use digraph::{IntGraphBuilder, VertexId};
///
/// let mut builder: IntGraphBuilder = IntGraphBuilder::new();
/// let a = builder.add_vertex();
/// let b = builder.add_vertex();
///
/// assert_eq!(a, VertexId::new(0));
/// assert_eq!(b.index(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Creates a new `VertexId` from a raw index value.
    ///
    /// Normal usage obtains ids from [`IntGraphBuilder::add_vertex`](crate::IntGraphBuilder::add_vertex)
    /// or from the neighbour queries of an integer graph.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        VertexId(index)
    }

    /// Returns the raw index value of this vertex.
    ///
    /// The index can be used directly to address per-vertex tables such as
    /// distance arrays or a [`BitSet`](crate::utils::BitSet).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<usize> for VertexId {
    #[inline]
    fn from(index: usize) -> Self {
        VertexId(index)
    }
}

impl From<VertexId> for usize {
    #[inline]
    fn from(vertex: VertexId) -> Self {
        vertex.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertex_id_roundtrip() {
        let vertex: VertexId = 123usize.into();
        assert_eq!(vertex.index(), 123);
        let raw: usize = vertex.into();
        assert_eq!(raw, 123);
    }

    #[test]
    fn test_vertex_id_ordering() {
        let mut vertices = vec![VertexId::new(3), VertexId::new(1), VertexId::new(2)];
        vertices.sort();
        assert_eq!(
            vertices,
            vec![VertexId::new(1), VertexId::new(2), VertexId::new(3)]
        );
    }

    #[test]
    fn test_vertex_id_hash_dedup() {
        let set: HashSet<VertexId> = [VertexId::new(1), VertexId::new(2), VertexId::new(1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_vertex_id_formats() {
        let vertex = VertexId::new(42);
        assert_eq!(format!("{vertex:?}"), "VertexId(42)");
        assert_eq!(format!("{vertex}"), "v42");
    }
}
