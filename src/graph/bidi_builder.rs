//! Object-keyed mutable graph builder with forward and backward adjacency.
//!
//! [`BidiGraphBuilder`] keeps every arrow exactly once in a flat arena and lets
//! each vertex reference its arrows from two lists: `next` for arrows leaving
//! the vertex and `prev` for arrows entering it. An arrow in `next` of its tail
//! always has a mirror entry in `prev` of its head.
//!
//! Removing an arrow swaps the last arena slot into the freed one, so the arena
//! stays dense. The arrow that moved is referenced from exactly one `next` list
//! and one `prev` list; both references are rewritten in place.

use std::{fmt, hash::Hash};

use indexmap::IndexMap;

use crate::{
    graph::{BidiGraph, DirectedGraph, IndexedGraph, VertexId},
    Error, Result,
};

#[derive(Debug, Clone)]
struct ArenaArrow<A> {
    tail: usize,
    head: usize,
    data: A,
}

#[derive(Debug, Clone, Default)]
struct Adjacency {
    /// Arena ids of outgoing arrows, in insertion order
    next: Vec<usize>,
    /// Arena ids of incoming arrows, in insertion order
    prev: Vec<usize>,
}

/// A mutable directed graph keyed by vertex values, with O(1) access to both
/// outgoing and incoming arrows.
///
/// # Examples
///
/// ```rust
/// use digraph::{BidiGraph, BidiGraphBuilder, DirectedGraph};
///
/// let mut builder: BidiGraphBuilder<char, u32> = BidiGraphBuilder::new();
/// for v in ['a', 'b', 'c'] {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow('a', 'c', 1)?;
/// builder.add_arrow('b', 'c', 2)?;
///
/// assert_eq!(builder.prev_count(&'c'), 2);
/// assert_eq!(builder.prev(&'c', 1), &'b');
/// assert_eq!(builder.prev_arrow(&'c', 1), &2);
///
/// builder.remove_vertex(&'a')?;
/// assert_eq!(builder.prev_vertices(&'c').collect::<Vec<_>>(), vec![&'b']);
/// # Ok::<(), digraph::Error>(())
/// ```
#[derive(Clone)]
pub struct BidiGraphBuilder<V, A> {
    vertices: IndexMap<V, Adjacency>,
    arrows: Vec<ArenaArrow<A>>,
}

impl<V, A> Default for BidiGraphBuilder<V, A> {
    fn default() -> Self {
        Self {
            vertices: IndexMap::new(),
            arrows: Vec::new(),
        }
    }
}

impl<V, A> BidiGraphBuilder<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty builder with preallocated vertex and arrow storage.
    #[must_use]
    pub fn with_capacity(vertex_capacity: usize, arrow_capacity: usize) -> Self {
        Self {
            vertices: IndexMap::with_capacity(vertex_capacity),
            arrows: Vec::with_capacity(arrow_capacity),
        }
    }

    /// Adds a vertex, or does nothing if it is already present.
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
    /// Returns [`Error::VertexNotFound`] if either endpoint is absent.
    pub fn add_arrow(&mut self, from: V, to: V, data: A) -> Result<()> {
        let tail = self
            .vertices
            .get_index_of(&from)
            .ok_or_else(|| Error::vertex_not_found(&from))?;
        let head = self
            .vertices
            .get_index_of(&to)
            .ok_or_else(|| Error::vertex_not_found(&to))?;

        let id = self.arrows.len();
        self.arrows.push(ArenaArrow { tail, head, data });
        self.vertices[tail].next.push(id);
        self.vertices[head].prev.push(id);
        Ok(())
    }

    /// Removes the `index`-th outgoing arrow of `from` and returns its data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `from` is absent, or
    /// [`Error::ArrowIndexOutOfBounds`] if `index` is past its arrow count.
    pub fn remove_arrow(&mut self, from: &V, index: usize) -> Result<A> {
        let adjacency = self
            .vertices
            .get(from)
            .ok_or_else(|| Error::vertex_not_found(from))?;
        let Some(&id) = adjacency.next.get(index) else {
            return Err(Error::ArrowIndexOutOfBounds {
                vertex: format!("{from:?}"),
                index,
                count: adjacency.next.len(),
            });
        };

        self.remove_arrow_id(id)
    }

    /// Removes every arrow from `from` to `to` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if either endpoint is absent.
    pub fn remove_arrows_between(&mut self, from: &V, to: &V) -> Result<usize> {
        let head = self
            .vertices
            .get_index_of(to)
            .ok_or_else(|| Error::vertex_not_found(to))?;
        let adjacency = self
            .vertices
            .get(from)
            .ok_or_else(|| Error::vertex_not_found(from))?;

        let mut ids: Vec<usize> = adjacency
            .next
            .iter()
            .copied()
            .filter(|&id| self.arrows[id].head == head)
            .collect();
        self.remove_arrow_ids(&mut ids)?;
        Ok(ids.len())
    }

    /// Removes a vertex together with all arrows entering or leaving it.
    ///
    /// Vertices added after the removed one move down by one dense index.
    ///
    /// # Returns
    ///
    /// `true` if the vertex was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if an arrow of the vertex is missing from
    /// the adjacency list of its other endpoint.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<bool> {
        let Some(adjacency) = self.vertices.get(vertex) else {
            return Ok(false);
        };

        let mut ids: Vec<usize> = adjacency
            .next
            .iter()
            .chain(adjacency.prev.iter())
            .copied()
            .collect();
        self.remove_arrow_ids(&mut ids)?;

        let Some((removed, _, _)) = self.vertices.shift_remove_full(vertex) else {
            return Ok(false);
        };
        for arrow in &mut self.arrows {
            if arrow.tail > removed {
                arrow.tail -= 1;
            }
            if arrow.head > removed {
                arrow.head -= 1;
            }
        }

        tracing::trace!(index = removed, arrows = ids.len(), "removed vertex from bidi builder");
        Ok(true)
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
        self.arrows.clear();
    }

    /// Removes a set of arena ids. Ids are removed highest first so that the
    /// swap-with-last step never moves an id that is still pending.
    fn remove_arrow_ids(&mut self, ids: &mut Vec<usize>) -> Result<()> {
        ids.sort_unstable_by(|a, b| b.cmp(a));
        ids.dedup();
        for &id in ids.iter() {
            self.remove_arrow_id(id)?;
        }
        Ok(())
    }

    fn remove_arrow_id(&mut self, id: usize) -> Result<A> {
        let (tail, head) = (self.arrows[id].tail, self.arrows[id].head);
        Self::unlink(&mut self.vertices[tail].next, id)?;
        Self::unlink(&mut self.vertices[head].prev, id)?;

        let last = self.arrows.len() - 1;
        let removed = self.arrows.swap_remove(id);
        if id != last {
            let (moved_tail, moved_head) = (self.arrows[id].tail, self.arrows[id].head);
            Self::relink(&mut self.vertices[moved_tail].next, last, id)?;
            Self::relink(&mut self.vertices[moved_head].prev, last, id)?;
        }
        Ok(removed.data)
    }

    fn unlink(list: &mut Vec<usize>, id: usize) -> Result<()> {
        let position = list
            .iter()
            .position(|&entry| entry == id)
            .ok_or_else(|| graph_error!("arrow {} missing from adjacency list", id))?;
        list.remove(position);
        Ok(())
    }

    fn relink(list: &mut [usize], from: usize, to: usize) -> Result<()> {
        let entry = list
            .iter_mut()
            .find(|entry| **entry == from)
            .ok_or_else(|| graph_error!("moved arrow {} missing from adjacency list", from))?;
        *entry = to;
        Ok(())
    }

    fn adjacency(&self, vertex: &V) -> &Adjacency {
        match self.vertices.get(vertex) {
            Some(adjacency) => adjacency,
            None => panic!("vertex not in graph: {vertex:?}"),
        }
    }
}

impl<V, A> DirectedGraph for BidiGraphBuilder<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    type Vertex = V;
    type Arrow = A;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn arrow_count(&self) -> usize {
        self.arrows.len()
    }

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.keys()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }

    fn next_count(&self, vertex: &V) -> usize {
        self.adjacency(vertex).next.len()
    }

    fn next(&self, vertex: &V, index: usize) -> &V {
        let id = self.adjacency(vertex).next[index];
        self.vertex_at(VertexId::new(self.arrows[id].head))
    }

    fn next_arrow(&self, vertex: &V, index: usize) -> &A {
        &self.arrows[self.adjacency(vertex).next[index]].data
    }

    fn as_indexed(&self) -> Option<&dyn IndexedGraph<V, A>> {
        Some(self)
    }
}

impl<V, A> BidiGraph for BidiGraphBuilder<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    fn prev_count(&self, vertex: &V) -> usize {
        self.adjacency(vertex).prev.len()
    }

    fn prev(&self, vertex: &V, index: usize) -> &V {
        let id = self.adjacency(vertex).prev[index];
        self.vertex_at(VertexId::new(self.arrows[id].tail))
    }

    fn prev_arrow(&self, vertex: &V, index: usize) -> &A {
        &self.arrows[self.adjacency(vertex).prev[index]].data
    }
}

impl<V, A> IndexedGraph<V, A> for BidiGraphBuilder<V, A>
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
        self.vertices[id.index()].next.len()
    }

    fn next_at(&self, id: VertexId, index: usize) -> VertexId {
        VertexId::new(self.arrows[self.vertices[id.index()].next[index]].head)
    }

    fn next_arrow_at(&self, id: VertexId, index: usize) -> &A {
        &self.arrows[self.vertices[id.index()].next[index]].data
    }
}

impl<V: fmt::Debug, A: fmt::Debug> fmt::Debug for BidiGraphBuilder<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BidiGraphBuilder")
            .field("vertices", &self.vertices.keys().collect::<Vec<_>>())
            .field("arrows", &self.arrows)
            .finish()
    }
}
