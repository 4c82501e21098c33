//! Trait definitions for graph capabilities.
//!
//! Algorithms in this crate are written against these traits rather than against
//! concrete graph types, so the same traversal, search and analysis code runs on
//! mutable builders and on compiled snapshots alike.
//!
//! # Architecture
//!
//! There are two families of traits:
//!
//! - **Integer graphs** address vertices by a dense [`VertexId`] in `0..vertex_count`:
//!   - [`IntDirectedGraph`] - forward adjacency
//!   - [`IntBidiGraph`] - forward and backward adjacency
//!   - [`IntAttributedDirectedGraph`] - forward adjacency with arrow data
//! - **Object graphs** address vertices by value:
//!   - [`DirectedGraph`] - forward adjacency with typed vertices and arrows
//!   - [`BidiGraph`] - forward and backward adjacency
//!   - [`IndexedGraph`] - optional capability of an object graph that also keeps
//!     its vertices in a dense table, used by the path finders to switch to
//!     array-backed bookkeeping
//!
//! # Panics
//!
//! Query methods take vertices and slot indices that are expected to be valid.
//! Handing them a vertex that is not in the graph, or a slot index that is not
//! below the vertex's arrow count, is a precondition violation and panics.
//! Fallible construction goes through the builders, which return
//! [`Result`](crate::Result) instead.

use crate::graph::VertexId;

/// Forward adjacency over dense integer vertices.
///
/// # Examples
///
/// ```rust
/// use digraph::{IntDirectedGraph, IntGraphBuilder};
///
/// let mut builder: IntGraphBuilder = IntGraphBuilder::new();
/// let a = builder.add_vertex();
/// let b = builder.add_vertex();
/// let c = builder.add_vertex();
/// builder.add_arrow(a, b, ())?;
/// builder.add_arrow(a, c, ())?;
///
/// assert_eq!(builder.next_count(a), 2);
/// assert_eq!(builder.next(a, 1), c);
/// let next: Vec<_> = builder.next_vertices(a).collect();
/// assert_eq!(next, vec![b, c]);
/// # Ok::<(), digraph::Error>(())
/// ```
pub trait IntDirectedGraph {
    /// Returns the number of vertices; valid ids are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Returns the total number of arrows.
    fn arrow_count(&self) -> usize;

    /// Returns the number of outgoing arrows of `vertex`.
    fn next_count(&self, vertex: VertexId) -> usize;

    /// Returns the head of the `index`-th outgoing arrow of `vertex`.
    fn next(&self, vertex: VertexId, index: usize) -> VertexId;

    /// Returns an iterator over the heads of all outgoing arrows of `vertex`,
    /// in slot order.
    fn next_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId>;

    /// Returns an iterator over all vertex ids in ascending order.
    fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertex_count()).map(VertexId::new)
    }
}

/// Forward and backward adjacency over dense integer vertices.
pub trait IntBidiGraph: IntDirectedGraph {
    /// Returns the number of incoming arrows of `vertex`.
    fn prev_count(&self, vertex: VertexId) -> usize;

    /// Returns the tail of the `index`-th incoming arrow of `vertex`.
    fn prev(&self, vertex: VertexId, index: usize) -> VertexId;

    /// Returns an iterator over the tails of all incoming arrows of `vertex`.
    fn prev_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId>;
}

/// Forward adjacency over dense integer vertices where every arrow carries data.
pub trait IntAttributedDirectedGraph<A>: IntDirectedGraph {
    /// Returns the data of the `index`-th outgoing arrow of `vertex`.
    fn next_arrow(&self, vertex: VertexId, index: usize) -> &A;

    /// Returns an iterator over `(head, data)` for all outgoing arrows of `vertex`.
    fn next_arrows<'a>(&'a self, vertex: VertexId) -> impl Iterator<Item = (VertexId, &'a A)>
    where
        A: 'a,
    {
        (0..self.next_count(vertex)).map(move |i| (self.next(vertex, i), self.next_arrow(vertex, i)))
    }
}

/// Forward adjacency over typed vertices and arrows.
///
/// Vertices are identified by value. Every implementation in this crate keeps
/// its vertices in insertion order, so [`vertices`](DirectedGraph::vertices)
/// is deterministic.
///
/// # Examples
///
/// ```rust
/// use digraph::{DirectedGraph, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<&str, u32> = DirectedGraphBuilder::new();
/// builder.add_vertex("A");
/// builder.add_vertex("B");
/// builder.add_arrow("A", "B", 7)?;
///
/// assert_eq!(builder.next_count(&"A"), 1);
/// assert_eq!(builder.next(&"A", 0), &"B");
/// assert_eq!(builder.next_arrow(&"A", 0), &7);
/// # Ok::<(), digraph::Error>(())
/// ```
pub trait DirectedGraph {
    /// The vertex type.
    type Vertex;
    /// The arrow data type.
    type Arrow;

    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns the total number of arrows.
    fn arrow_count(&self) -> usize;

    /// Returns an iterator over all vertices in insertion order.
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex>;

    /// Returns `true` if `vertex` is part of the graph.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;

    /// Returns the number of outgoing arrows of `vertex`.
    fn next_count(&self, vertex: &Self::Vertex) -> usize;

    /// Returns the head of the `index`-th outgoing arrow of `vertex`.
    fn next(&self, vertex: &Self::Vertex, index: usize) -> &Self::Vertex;

    /// Returns the data of the `index`-th outgoing arrow of `vertex`.
    fn next_arrow(&self, vertex: &Self::Vertex, index: usize) -> &Self::Arrow;

    /// Returns an iterator over the heads of all outgoing arrows of `vertex`.
    fn next_vertices<'a>(&'a self, vertex: &'a Self::Vertex) -> impl Iterator<Item = &'a Self::Vertex> {
        (0..self.next_count(vertex)).map(move |i| self.next(vertex, i))
    }

    /// Returns an iterator over `(head, data)` for all outgoing arrows of `vertex`.
    fn next_arrows<'a>(
        &'a self,
        vertex: &'a Self::Vertex,
    ) -> impl Iterator<Item = (&'a Self::Vertex, &'a Self::Arrow)> {
        (0..self.next_count(vertex)).map(move |i| (self.next(vertex, i), self.next_arrow(vertex, i)))
    }

    /// Returns an iterator over every arrow as `(tail, head, data)`, grouped by
    /// tail in vertex order.
    fn arrows(&self) -> impl Iterator<Item = (&Self::Vertex, &Self::Vertex, &Self::Arrow)> {
        self.vertices().flat_map(move |tail| {
            self.next_arrows(tail)
                .map(move |(head, data)| (tail, head, data))
        })
    }

    /// Exposes the dense-index capability of this graph, if it has one.
    ///
    /// Graphs that store their vertices in a `0..vertex_count` table return
    /// `Some(self)`. The path finders use this to replace hash-map bookkeeping
    /// with plain arrays; results are identical either way.
    fn as_indexed(&self) -> Option<&dyn IndexedGraph<Self::Vertex, Self::Arrow>> {
        None
    }
}

/// Forward and backward adjacency over typed vertices and arrows.
pub trait BidiGraph: DirectedGraph {
    /// Returns the number of incoming arrows of `vertex`.
    fn prev_count(&self, vertex: &Self::Vertex) -> usize;

    /// Returns the tail of the `index`-th incoming arrow of `vertex`.
    fn prev(&self, vertex: &Self::Vertex, index: usize) -> &Self::Vertex;

    /// Returns the data of the `index`-th incoming arrow of `vertex`.
    fn prev_arrow(&self, vertex: &Self::Vertex, index: usize) -> &Self::Arrow;

    /// Returns an iterator over the tails of all incoming arrows of `vertex`.
    fn prev_vertices<'a>(&'a self, vertex: &'a Self::Vertex) -> impl Iterator<Item = &'a Self::Vertex> {
        (0..self.prev_count(vertex)).map(move |i| self.prev(vertex, i))
    }
}

/// Dense-index view of an object graph.
///
/// This trait is object safe; [`DirectedGraph::as_indexed`] hands it out as a
/// trait object so algorithms can ask for it at runtime.
pub trait IndexedGraph<V, A> {
    /// Returns the dense id of `vertex`, or `None` if it is not in the graph.
    fn index_of(&self, vertex: &V) -> Option<VertexId>;

    /// Returns the vertex stored at `id`.
    fn vertex_at(&self, id: VertexId) -> &V;

    /// Returns the number of outgoing arrows of the vertex at `id`.
    fn next_count_at(&self, id: VertexId) -> usize;

    /// Returns the dense id of the head of the `index`-th outgoing arrow.
    fn next_at(&self, id: VertexId, index: usize) -> VertexId;

    /// Returns the data of the `index`-th outgoing arrow.
    fn next_arrow_at(&self, id: VertexId, index: usize) -> &A;
}
