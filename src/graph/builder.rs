//! Object-keyed mutable graph builder with forward adjacency.
//!
//! This module provides [`DirectedGraphBuilder`], the incremental builder for
//! graphs whose vertices are arbitrary hashable values. Vertices are kept in
//! insertion order in an [`IndexMap`], which gives every vertex a dense index
//! for free; outgoing arrows are stored per vertex as `(head index, data)`.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `add_vertex` | O(1) amortized |
//! | `add_arrow` | O(1) amortized |
//! | `next` / `next_arrow` | O(1) |
//! | `remove_arrow` | O(k), k = out-degree of the tail |
//! | `remove_vertex` | O(V + E) |

use std::{fmt, hash::Hash};

use indexmap::IndexMap;

use crate::{
    graph::{DirectedGraph, IndexedGraph, VertexId},
    Error, Result,
};

/// One outgoing arrow: dense index of the head plus the arrow data.
#[derive(Debug, Clone)]
struct NextArrow<A> {
    head: usize,
    data: A,
}

/// A mutable directed graph keyed by vertex values.
///
/// `DirectedGraphBuilder<V, A>` stores vertices of type `V` and arrows carrying
/// data of type `A`. Parallel arrows and self loops are allowed; arrow identity
/// is the slot index in the tail's outgoing list.
///
/// Vertices must be added before arrows can reference them. Adding a vertex
/// twice is a no-op.
///
/// # Examples
///
/// ```rust
/// use digraph::{DirectedGraph, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<&str, f64> = DirectedGraphBuilder::new();
/// for vertex in ["A", "B", "C"] {
///     builder.add_vertex(vertex);
/// }
/// builder.add_arrow("A", "B", 1.0)?;
/// builder.add_arrow("A", "C", 2.5)?;
///
/// assert_eq!(builder.vertex_count(), 3);
/// assert_eq!(builder.arrow_count(), 2);
/// assert_eq!(builder.next_vertices(&"A").copied().collect::<Vec<_>>(), vec!["B", "C"]);
///
/// builder.remove_arrow(&"A", 0)?;
/// assert_eq!(builder.next_count(&"A"), 1);
/// # Ok::<(), digraph::Error>(())
/// ```
#[derive(Clone)]
pub struct DirectedGraphBuilder<V, A> {
    /// Vertices in insertion order with their outgoing arrows
    vertices: IndexMap<V, Vec<NextArrow<A>>>,
    /// Total number of arrows across all adjacency lists
    arrow_count: usize,
}

impl<V, A> Default for DirectedGraphBuilder<V, A> {
    fn default() -> Self {
        Self {
            vertices: IndexMap::new(),
            arrow_count: 0,
        }
    }
}

impl<V, A> DirectedGraphBuilder<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty builder with room for `vertex_capacity` vertices.
    #[must_use]
    pub fn with_capacity(vertex_capacity: usize) -> Self {
        Self {
            vertices: IndexMap::with_capacity(vertex_capacity),
            arrow_count: 0,
        }
    }

    /// Adds a vertex, or does nothing if it is already present.
    ///
    /// # Returns
    ///
    /// The dense id of the vertex, which is stable until a vertex is removed.
    pub fn add_vertex(&mut self, vertex: V) -> VertexId {
        let entry = self.vertices.entry(vertex);
        let index = entry.index();
        entry.or_default();
        VertexId::new(index)
    }

    /// Adds an arrow from `from` to `to` carrying `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if either endpoint has not been added.
    /// The builder is left unchanged in that case.
    pub fn add_arrow(&mut self, from: V, to: V, data: A) -> Result<()> {
        let head = self
            .vertices
            .get_index_of(&to)
            .ok_or_else(|| Error::vertex_not_found(&to))?;
        let tail = self
            .vertices
            .get_index_of(&from)
            .ok_or_else(|| Error::vertex_not_found(&from))?;

        self.push_arrow(VertexId::new(tail), VertexId::new(head), data);
        Ok(())
    }

    /// Appends an arrow between two dense ids that are known to be vertices.
    pub(crate) fn push_arrow(&mut self, tail: VertexId, head: VertexId, data: A) {
        self.vertices[tail.index()].push(NextArrow {
            head: head.index(),
            data,
        });
        self.arrow_count += 1;
    }

    /// Removes the `index`-th outgoing arrow of `from` and returns its data.
    ///
    /// The remaining arrows of `from` keep their relative order. No other
    /// vertex's adjacency is touched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `from` is not in the graph, or
    /// [`Error::ArrowIndexOutOfBounds`] if `index` is not below its arrow count.
    pub fn remove_arrow(&mut self, from: &V, index: usize) -> Result<A> {
        let next = self
            .vertices
            .get_mut(from)
            .ok_or_else(|| Error::vertex_not_found(from))?;
        if index >= next.len() {
            return Err(Error::ArrowIndexOutOfBounds {
                vertex: format!("{from:?}"),
                index,
                count: next.len(),
            });
        }

        self.arrow_count -= 1;
        Ok(next.remove(index).data)
    }

    /// Removes every arrow from `from` to `to`.
    ///
    /// # Returns
    ///
    /// The number of arrows removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if either endpoint is not in the graph.
    pub fn remove_arrows_between(&mut self, from: &V, to: &V) -> Result<usize> {
        let head = self
            .vertices
            .get_index_of(to)
            .ok_or_else(|| Error::vertex_not_found(to))?;
        let next = self
            .vertices
            .get_mut(from)
            .ok_or_else(|| Error::vertex_not_found(from))?;

        let before = next.len();
        next.retain(|arrow| arrow.head != head);
        let removed = before - next.len();
        self.arrow_count -= removed;
        Ok(removed)
    }

    /// Removes a vertex together with every arrow that starts or ends at it.
    ///
    /// Vertices added after the removed one move down by one dense index;
    /// insertion order is preserved.
    ///
    /// # Returns
    ///
    /// `true` if the vertex was present.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some((removed, _, outgoing)) = self.vertices.shift_remove_full(vertex) else {
            return false;
        };

        let mut dropped = outgoing.len();
        for next in self.vertices.values_mut() {
            let before = next.len();
            next.retain(|arrow| arrow.head != removed);
            dropped += before - next.len();
            for arrow in next.iter_mut() {
                if arrow.head > removed {
                    arrow.head -= 1;
                }
            }
        }
        self.arrow_count -= dropped;

        tracing::trace!(index = removed, arrows = dropped, "removed vertex from builder");
        true
    }

    /// Returns the dense id of `vertex`, if present.
    #[must_use]
    pub fn vertex_id(&self, vertex: &V) -> Option<VertexId> {
        self.vertices.get_index_of(vertex).map(VertexId::new)
    }

    /// Returns `true` if the builder contains no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Removes all vertices and arrows.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.arrow_count = 0;
    }

    fn next_list(&self, vertex: &V) -> &[NextArrow<A>] {
        match self.vertices.get(vertex) {
            Some(next) => next,
            None => panic!("vertex not in graph: {vertex:?}"),
        }
    }
}

impl<V, A> DirectedGraph for DirectedGraphBuilder<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    type Vertex = V;
    type Arrow = A;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn arrow_count(&self) -> usize {
        self.arrow_count
    }

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.keys()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }

    fn next_count(&self, vertex: &V) -> usize {
        self.next_list(vertex).len()
    }

    fn next(&self, vertex: &V, index: usize) -> &V {
        let head = self.next_list(vertex)[index].head;
        self.vertex_at(VertexId::new(head))
    }

    fn next_arrow(&self, vertex: &V, index: usize) -> &A {
        &self.next_list(vertex)[index].data
    }

    fn as_indexed(&self) -> Option<&dyn IndexedGraph<V, A>> {
        Some(self)
    }
}

impl<V, A> IndexedGraph<V, A> for DirectedGraphBuilder<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    fn index_of(&self, vertex: &V) -> Option<VertexId> {
        self.vertex_id(vertex)
    }

    fn vertex_at(&self, id: VertexId) -> &V {
        match self.vertices.get_index(id.index()) {
            Some((vertex, _)) => vertex,
            None => panic!(
                "vertex index {} out of bounds for {} vertices",
                id.index(),
                self.vertices.len()
            ),
        }
    }

    fn next_count_at(&self, id: VertexId) -> usize {
        self.vertices[id.index()].len()
    }

    fn next_at(&self, id: VertexId, index: usize) -> VertexId {
        VertexId::new(self.vertices[id.index()][index].head)
    }

    fn next_arrow_at(&self, id: VertexId, index: usize) -> &A {
        &self.vertices[id.index()][index].data
    }
}

impl<V: fmt::Debug, A: fmt::Debug> fmt::Debug for DirectedGraphBuilder<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (vertex, next) in &self.vertices {
            let arrows: Vec<(&V, &A)> = next
                .iter()
                .map(|arrow| (self.vertices.get_index(arrow.head).map(|(v, _)| v).unwrap_or(vertex), &arrow.data))
                .collect();
            map.entry(vertex, &arrows);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> DirectedGraphBuilder<&'static str, u32> {
        let mut builder = DirectedGraphBuilder::new();
        for v in ["A", "B", "C", "D"] {
            builder.add_vertex(v);
        }
        builder.add_arrow("A", "B", 1).unwrap();
        builder.add_arrow("A", "C", 2).unwrap();
        builder.add_arrow("B", "D", 3).unwrap();
        builder.add_arrow("C", "D", 4).unwrap();
        builder
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut builder: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
        let a1 = builder.add_vertex("A");
        let b = builder.add_vertex("B");
        let a2 = builder.add_vertex("A");

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(builder.vertex_count(), 2);
    }

    #[test]
    fn test_add_arrow_unknown_vertex() {
        let mut builder: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
        builder.add_vertex("A");

        assert_eq!(
            builder.add_arrow("A", "X", ()),
            Err(Error::VertexNotFound("\"X\"".to_string()))
        );
        assert_eq!(
            builder.add_arrow("X", "A", ()),
            Err(Error::VertexNotFound("\"X\"".to_string()))
        );
        assert_eq!(builder.arrow_count(), 0);
    }

    #[test]
    fn test_parallel_arrows_and_self_loops() {
        let mut builder: DirectedGraphBuilder<u8, char> = DirectedGraphBuilder::new();
        builder.add_vertex(1);
        builder.add_vertex(2);
        builder.add_arrow(1, 2, 'x').unwrap();
        builder.add_arrow(1, 2, 'y').unwrap();
        builder.add_arrow(2, 2, 'z').unwrap();

        assert_eq!(builder.next_count(&1), 2);
        assert_eq!(builder.next_arrow(&1, 1), &'y');
        assert_eq!(builder.next(&2, 0), &2);
        assert_eq!(builder.arrow_count(), 3);
    }

    #[test]
    fn test_add_then_remove_arrow_restores_counts() {
        let mut builder = diamond();
        let before: Vec<usize> = ["A", "B", "C", "D"]
            .iter()
            .map(|v| builder.next_count(v))
            .collect();

        builder.add_arrow("B", "C", 9).unwrap();
        assert_eq!(builder.next_count(&"B"), 2);
        assert_eq!(builder.remove_arrow(&"B", 1), Ok(9));

        let after: Vec<usize> = ["A", "B", "C", "D"]
            .iter()
            .map(|v| builder.next_count(v))
            .collect();
        assert_eq!(before, after);
        assert_eq!(builder.next(&"B", 0), &"D");
        assert_eq!(builder.arrow_count(), 4);
    }

    #[test]
    fn test_remove_arrow_out_of_bounds() {
        let mut builder = diamond();
        let err = builder.remove_arrow(&"D", 0).unwrap_err();
        assert!(matches!(
            err,
            Error::ArrowIndexOutOfBounds {
                index: 0,
                count: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_remove_arrows_between() {
        let mut builder = diamond();
        builder.add_arrow("A", "B", 7).unwrap();
        assert_eq!(builder.remove_arrows_between(&"A", &"B"), Ok(2));
        assert_eq!(builder.next_vertices(&"A").copied().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(builder.arrow_count(), 3);
    }

    #[test]
    fn test_remove_vertex_cascades_and_renumbers() {
        let mut builder = diamond();
        assert!(builder.remove_vertex(&"B"));
        assert!(!builder.remove_vertex(&"B"));

        assert_eq!(builder.vertex_count(), 3);
        assert_eq!(builder.arrow_count(), 2);
        assert_eq!(builder.vertex_id(&"C"), Some(VertexId::new(1)));
        assert_eq!(builder.vertex_id(&"D"), Some(VertexId::new(2)));

        // Heads that pointed past the removed index were shifted down
        assert_eq!(builder.next_vertices(&"A").copied().collect::<Vec<_>>(), vec!["C"]);
        assert_eq!(builder.next(&"C", 0), &"D");
        assert_eq!(
            builder.vertices().copied().collect::<Vec<_>>(),
            vec!["A", "C", "D"]
        );
    }

    #[test]
    fn test_remove_vertex_with_self_loop() {
        let mut builder: DirectedGraphBuilder<u8, ()> = DirectedGraphBuilder::new();
        builder.add_vertex(0);
        builder.add_vertex(1);
        builder.add_arrow(0, 0, ()).unwrap();
        builder.add_arrow(1, 0, ()).unwrap();

        assert!(builder.remove_vertex(&0));
        assert_eq!(builder.arrow_count(), 0);
        assert_eq!(builder.next_count(&1), 0);
    }

    #[test]
    fn test_indexed_view() {
        let builder = diamond();
        let indexed = builder.as_indexed().unwrap();
        let a = indexed.index_of(&"A").unwrap();
        assert_eq!(indexed.next_count_at(a), 2);
        assert_eq!(indexed.vertex_at(indexed.next_at(a, 1)), &"C");
        assert_eq!(indexed.next_arrow_at(a, 1), &2);
        assert_eq!(indexed.index_of(&"Z"), None);
    }

    #[test]
    fn test_arrows_iterates_in_vertex_order() {
        let builder = diamond();
        let arrows: Vec<(&str, &str, u32)> =
            builder.arrows().map(|(t, h, d)| (*t, *h, *d)).collect();
        assert_eq!(
            arrows,
            vec![("A", "B", 1), ("A", "C", 2), ("B", "D", 3), ("C", "D", 4)]
        );
    }

    #[test]
    #[should_panic(expected = "vertex not in graph")]
    fn test_query_unknown_vertex_panics() {
        let builder = diamond();
        let _ = builder.next_count(&"Q");
    }

    #[test]
    fn test_clear() {
        let mut builder = diamond();
        builder.clear();
        assert!(builder.is_empty());
        assert_eq!(builder.arrow_count(), 0);
    }
}
