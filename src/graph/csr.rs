//! Compressed sparse row storage shared by the compiled graphs.
//!
//! A [`Csr`] lays the outgoing arrows of every vertex out back to back:
//!
//! ```text
//! offsets: [0, 2, 3, 3, 4]        length vertex_count + 1
//! heads:   [1, 2, 2, 0]           arrows of vertex i live in
//! data:    [a, b, c, d]           offsets[i]..offsets[i + 1]
//! ```
//!
//! Construction walks vertices in order and records the write cursor as each
//! vertex's offset before appending its arrows, so no sort pass is needed.
//!
//! [`IndexedView`] assigns dense indices to the vertices of any object graph
//! and captures its adjacency in a `Csr`, which lets the integer algorithms
//! run on graphs that have no index of their own.

use std::{hash::Hash, ops::Range};

use indexmap::IndexSet;

use crate::{
    graph::{DirectedGraph, IntAttributedDirectedGraph, IntDirectedGraph, VertexId},
    Result,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Csr<A> {
    offsets: Vec<usize>,
    heads: Vec<VertexId>,
    data: Vec<A>,
}

impl<A> Csr<A> {
    /// Builds the table from a per-vertex arrow source.
    ///
    /// `arrows_of(v)` yields `(head, data)` for the outgoing arrows of `v` in
    /// slot order.
    pub(crate) fn build<F, I>(vertex_count: usize, arrow_capacity: usize, mut arrows_of: F) -> Self
    where
        F: FnMut(VertexId) -> I,
        I: IntoIterator<Item = (VertexId, A)>,
    {
        let mut offsets = Vec::with_capacity(vertex_count + 1);
        let mut heads = Vec::with_capacity(arrow_capacity);
        let mut data = Vec::with_capacity(arrow_capacity);

        for vertex in (0..vertex_count).map(VertexId::new) {
            offsets.push(heads.len());
            for (head, value) in arrows_of(vertex) {
                heads.push(head);
                data.push(value);
            }
        }
        offsets.push(heads.len());

        Csr {
            offsets,
            heads,
            data,
        }
    }

    /// Builds the transposed table: for every vertex the tails of its
    /// incoming arrows, ordered by tail and then by slot.
    pub(crate) fn transpose(&self) -> Csr<()> {
        let n = self.vertex_count();
        let mut offsets = vec![0usize; n + 1];
        for head in &self.heads {
            offsets[head.index() + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets.clone();
        let mut tails = vec![VertexId::default(); self.heads.len()];
        for tail in (0..n).map(VertexId::new) {
            for head in self.heads(tail) {
                tails[cursor[head.index()]] = tail;
                cursor[head.index()] += 1;
            }
        }

        Csr {
            offsets,
            heads: tails,
            data: vec![(); self.heads.len()],
        }
    }

    #[inline]
    pub(crate) fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub(crate) fn arrow_count(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    pub(crate) fn range(&self, vertex: VertexId) -> Range<usize> {
        self.offsets[vertex.index()]..self.offsets[vertex.index() + 1]
    }

    #[inline]
    pub(crate) fn count(&self, vertex: VertexId) -> usize {
        self.range(vertex).len()
    }

    /// Maps a `(vertex, slot)` pair to its position in the flat arrays.
    ///
    /// The slot is checked against the vertex's own range so that a bad slot
    /// panics instead of reading a neighbouring vertex's arrow.
    #[inline]
    fn position(&self, vertex: VertexId, index: usize) -> usize {
        let range = self.range(vertex);
        assert!(
            index < range.len(),
            "arrow index {index} out of bounds for {vertex} with {} arrows",
            range.len()
        );
        range.start + index
    }

    #[inline]
    pub(crate) fn head(&self, vertex: VertexId, index: usize) -> VertexId {
        self.heads[self.position(vertex, index)]
    }

    #[inline]
    pub(crate) fn data(&self, vertex: VertexId, index: usize) -> &A {
        &self.data[self.position(vertex, index)]
    }

    #[inline]
    pub(crate) fn heads(&self, vertex: VertexId) -> &[VertexId] {
        &self.heads[self.range(vertex)]
    }

    #[inline]
    pub(crate) fn data_slice(&self, vertex: VertexId) -> &[A] {
        &self.data[self.range(vertex)]
    }
}

/// Dense-index snapshot of an object graph's adjacency.
///
/// Vertices keep the order of [`DirectedGraph::vertices`]; arrow data is
/// borrowed from the source graph.
pub(crate) struct IndexedView<'g, V, A> {
    vertices: IndexSet<&'g V>,
    csr: Csr<&'g A>,
}

impl<'g, V, A> IndexedView<'g, V, A>
where
    V: Hash + Eq,
{
    /// Indexes `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GraphError`] if the graph reports an arrow
    /// whose head is not among its vertices.
    pub(crate) fn new<G>(graph: &'g G) -> Result<Self>
    where
        G: DirectedGraph<Vertex = V, Arrow = A>,
    {
        let vertices: IndexSet<&'g V> = graph.vertices().collect();

        let mut offsets = Vec::with_capacity(vertices.len() + 1);
        let mut heads = Vec::with_capacity(graph.arrow_count());
        let mut data = Vec::with_capacity(graph.arrow_count());
        for (position, vertex) in vertices.iter().enumerate() {
            offsets.push(heads.len());
            for (head, value) in graph.next_arrows(*vertex) {
                let index = vertices.get_index_of(&head).ok_or_else(|| {
                    graph_error!("arrow of vertex {} points outside the graph", position)
                })?;
                heads.push(VertexId::new(index));
                data.push(value);
            }
        }
        offsets.push(heads.len());

        Ok(IndexedView {
            vertices,
            csr: Csr {
                offsets,
                heads,
                data,
            },
        })
    }

    #[cfg(test)]
    pub(crate) fn index_of(&self, vertex: &V) -> Option<VertexId> {
        self.vertices.get_index_of(&vertex).map(VertexId::new)
    }

    pub(crate) fn vertex(&self, id: VertexId) -> &'g V {
        self.vertices[id.index()]
    }

    #[cfg(test)]
    pub(crate) fn csr(&self) -> &Csr<&'g A> {
        &self.csr
    }
}

impl<V, A> IntDirectedGraph for IndexedView<'_, V, A> {
    fn vertex_count(&self) -> usize {
        self.csr.vertex_count()
    }

    fn arrow_count(&self) -> usize {
        self.csr.arrow_count()
    }

    fn next_count(&self, vertex: VertexId) -> usize {
        self.csr.count(vertex)
    }

    fn next(&self, vertex: VertexId, index: usize) -> VertexId {
        self.csr.head(vertex, index)
    }

    fn next_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> {
        self.csr.heads(vertex).iter().copied()
    }
}

impl<'g, V, A> IntAttributedDirectedGraph<&'g A> for IndexedView<'g, V, A> {
    fn next_arrow(&self, vertex: VertexId, index: usize) -> &&'g A {
        self.csr.data(vertex, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraphBuilder;

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    fn sample() -> Csr<char> {
        let arrows = [
            vec![(v(1), 'a'), (v(2), 'b')],
            vec![(v(2), 'c')],
            vec![],
            vec![(v(0), 'd')],
        ];
        Csr::build(4, 4, |vertex| arrows[vertex.index()].clone())
    }

    #[test]
    fn test_csr_offsets() {
        let csr = sample();
        assert_eq!(csr.offsets, vec![0, 2, 3, 3, 4]);
        assert_eq!(csr.vertex_count(), 4);
        assert_eq!(csr.arrow_count(), 4);
        assert_eq!(csr.count(v(2)), 0);
        assert_eq!(csr.heads(v(0)), &[v(1), v(2)]);
        assert_eq!(csr.data(v(3), 0), &'d');
        assert_eq!(csr.data_slice(v(1)), &['c']);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_csr_slot_does_not_leak_into_next_vertex() {
        let csr = sample();
        // Slot 1 of vertex 1 would be vertex 3's arrow in the flat array
        let _ = csr.head(v(1), 1);
    }

    #[test]
    fn test_csr_transpose() {
        let prev = sample().transpose();
        assert_eq!(prev.heads(v(0)), &[v(3)]);
        assert_eq!(prev.heads(v(1)), &[v(0)]);
        assert_eq!(prev.heads(v(2)), &[v(0), v(1)]);
        assert_eq!(prev.count(v(3)), 0);
        assert_eq!(prev.arrow_count(), 4);
    }

    #[test]
    fn test_csr_empty() {
        let csr: Csr<()> = Csr::build(0, 0, |_| Vec::new());
        assert_eq!(csr.vertex_count(), 0);
        assert_eq!(csr.transpose().vertex_count(), 0);
    }

    #[test]
    fn test_indexed_view_of_builder() {
        let mut builder: DirectedGraphBuilder<&str, u8> = DirectedGraphBuilder::new();
        for name in ["x", "y", "z"] {
            builder.add_vertex(name);
        }
        builder.add_arrow("z", "x", 1).unwrap();
        builder.add_arrow("x", "y", 2).unwrap();

        let view = IndexedView::new(&builder).unwrap();
        let z = view.index_of(&"z").unwrap();
        assert_eq!(z, v(2));
        assert_eq!(view.next(z, 0), v(0));
        assert_eq!(**view.next_arrow(z, 0), 1);
        assert_eq!(view.vertex(v(1)), &"y");
        assert_eq!(view.arrow_count(), 2);
        assert_eq!(view.csr().count(v(1)), 0);
    }
}
