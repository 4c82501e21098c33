//! Immutable compiled graph snapshots.
//!
//! A compiled graph is built once from a builder (or any graph implementing the
//! matching capability trait) and then only queried. Vertex count, neighbour
//! count and indexed neighbour access are all O(1), and the neighbours of a
//! vertex are available as one contiguous slice.
//!
//! | Type | Vertices | Adjacency |
//! |------|----------|-----------|
//! | [`ImmutableDirectedGraph`] | typed `V` | forward, arrow data `A` |
//! | [`ImmutableAttributedIntDirectedGraph`] | dense ids | forward, arrow data `A` |
//! | [`ImmutableIntBidiGraph`] | dense ids | forward and backward |
//!
//! There is no mutation API. To change a compiled graph, convert it back with
//! `to_builder`, edit the builder and compile again.

use std::{fmt, hash::Hash};

use indexmap::IndexSet;

use crate::{
    graph::{
        csr::Csr, BidiGraphBuilder, DirectedGraph, DirectedGraphBuilder, IndexedGraph,
        IntAttributedDirectedGraph, IntBidiGraph, IntDirectedGraph, IntGraphBuilder, VertexId,
    },
    Result,
};

/// An immutable object-keyed directed graph with arrow data.
///
/// The vertex order of the source graph is kept, so [`VertexId`]s of an
/// [`ImmutableDirectedGraph`] compiled from a [`DirectedGraphBuilder`] match
/// the builder's ids at compile time.
///
/// # Examples
///
/// ```rust
/// use digraph::{DirectedGraph, DirectedGraphBuilder, ImmutableDirectedGraph, IndexedGraph};
///
/// let mut builder: DirectedGraphBuilder<&str, u32> = DirectedGraphBuilder::new();
/// builder.add_vertex("A");
/// builder.add_vertex("B");
/// builder.add_arrow("A", "B", 3)?;
///
/// let graph = ImmutableDirectedGraph::from(&builder);
/// assert_eq!(graph.next(&"A", 0), &"B");
/// let a = graph.index_of(&"A").unwrap();
/// assert_eq!(graph.next_arrow_slice(a), &[3]);
/// # Ok::<(), digraph::Error>(())
/// ```
#[derive(Clone)]
pub struct ImmutableDirectedGraph<V, A> {
    vertices: IndexSet<V>,
    csr: Csr<A>,
}

impl<V, A> ImmutableDirectedGraph<V, A>
where
    V: Hash + Eq + Clone + fmt::Debug,
    A: Clone,
{
    /// Compiles any directed graph.
    ///
    /// Graphs that expose a dense index through
    /// [`DirectedGraph::as_indexed`] are compiled without any vertex lookups.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GraphError`] if `graph` reports an arrow whose
    /// head is not one of its vertices.
    pub fn from_graph<G>(graph: &G) -> Result<Self>
    where
        G: DirectedGraph<Vertex = V, Arrow = A>,
    {
        if let Some(indexed) = graph.as_indexed() {
            return Ok(Self::from_indexed(
                graph.vertices().cloned().collect(),
                graph.arrow_count(),
                indexed,
            ));
        }

        let vertices: IndexSet<V> = graph.vertices().cloned().collect();
        let mut adjacency = Vec::with_capacity(vertices.len());
        for vertex in &vertices {
            let mut arrows = Vec::with_capacity(graph.next_count(vertex));
            for (head, data) in graph.next_arrows(vertex) {
                let index = vertices
                    .get_index_of(head)
                    .ok_or_else(|| graph_error!("arrow {:?} -> {:?} leaves the graph", vertex, head))?;
                arrows.push((VertexId::new(index), data.clone()));
            }
            adjacency.push(arrows);
        }

        let mut adjacency = adjacency.into_iter();
        let csr = Csr::build(vertices.len(), graph.arrow_count(), |_| {
            adjacency.next().unwrap_or_default()
        });
        Ok(Self::finish(vertices, csr))
    }

    fn from_indexed(
        vertices: IndexSet<V>,
        arrow_count: usize,
        indexed: &dyn IndexedGraph<V, A>,
    ) -> Self {
        let csr = Csr::build(vertices.len(), arrow_count, |id| {
            (0..indexed.next_count_at(id))
                .map(move |i| (indexed.next_at(id, i), indexed.next_arrow_at(id, i).clone()))
        });
        Self::finish(vertices, csr)
    }

    fn finish(vertices: IndexSet<V>, csr: Csr<A>) -> Self {
        tracing::debug!(
            vertices = vertices.len(),
            arrows = csr.arrow_count(),
            "compiled immutable directed graph"
        );
        ImmutableDirectedGraph { vertices, csr }
    }

    /// Copies the graph back into a mutable builder with the same vertex order
    /// and arrow order.
    #[must_use]
    pub fn to_builder(&self) -> DirectedGraphBuilder<V, A> {
        let mut builder = DirectedGraphBuilder::with_capacity(self.vertices.len());
        for vertex in &self.vertices {
            builder.add_vertex(vertex.clone());
        }
        for tail in (0..self.vertices.len()).map(VertexId::new) {
            for (head, data) in self.csr.heads(tail).iter().zip(self.csr.data_slice(tail)) {
                builder.push_arrow(tail, *head, data.clone());
            }
        }
        builder
    }
}

impl<V, A> ImmutableDirectedGraph<V, A> {
    /// Returns the heads of all outgoing arrows of the vertex at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not below the vertex count.
    #[must_use]
    pub fn next_slice(&self, id: VertexId) -> &[VertexId] {
        self.csr.heads(id)
    }

    /// Returns the data of all outgoing arrows of the vertex at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not below the vertex count.
    #[must_use]
    pub fn next_arrow_slice(&self, id: VertexId) -> &[A] {
        self.csr.data_slice(id)
    }
}

impl<V, A> ImmutableDirectedGraph<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    fn id(&self, vertex: &V) -> VertexId {
        match self.vertices.get_index_of(vertex) {
            Some(index) => VertexId::new(index),
            None => panic!("vertex not in graph: {vertex:?}"),
        }
    }
}

impl<V, A> From<&DirectedGraphBuilder<V, A>> for ImmutableDirectedGraph<V, A>
where
    V: Hash + Eq + Clone + fmt::Debug,
    A: Clone,
{
    fn from(builder: &DirectedGraphBuilder<V, A>) -> Self {
        Self::from_indexed(
            builder.vertices().cloned().collect(),
            builder.arrow_count(),
            builder,
        )
    }
}

impl<V, A> From<&BidiGraphBuilder<V, A>> for ImmutableDirectedGraph<V, A>
where
    V: Hash + Eq + Clone + fmt::Debug,
    A: Clone,
{
    fn from(builder: &BidiGraphBuilder<V, A>) -> Self {
        Self::from_indexed(
            builder.vertices().cloned().collect(),
            builder.arrow_count(),
            builder,
        )
    }
}

impl<V, A> DirectedGraph for ImmutableDirectedGraph<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    type Vertex = V;
    type Arrow = A;

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn arrow_count(&self) -> usize {
        self.csr.arrow_count()
    }

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    fn next_count(&self, vertex: &V) -> usize {
        self.csr.count(self.id(vertex))
    }

    fn next(&self, vertex: &V, index: usize) -> &V {
        &self.vertices[self.csr.head(self.id(vertex), index).index()]
    }

    fn next_arrow(&self, vertex: &V, index: usize) -> &A {
        self.csr.data(self.id(vertex), index)
    }

    fn next_arrows<'a>(&'a self, vertex: &'a V) -> impl Iterator<Item = (&'a V, &'a A)> {
        let id = self.id(vertex);
        self.csr
            .heads(id)
            .iter()
            .map(move |head| &self.vertices[head.index()])
            .zip(self.csr.data_slice(id))
    }

    fn as_indexed(&self) -> Option<&dyn IndexedGraph<V, A>> {
        Some(self)
    }
}

impl<V, A> IndexedGraph<V, A> for ImmutableDirectedGraph<V, A>
where
    V: Hash + Eq + fmt::Debug,
{
    fn index_of(&self, vertex: &V) -> Option<VertexId> {
        self.vertices.get_index_of(vertex).map(VertexId::new)
    }

    fn vertex_at(&self, id: VertexId) -> &V {
        &self.vertices[id.index()]
    }

    fn next_count_at(&self, id: VertexId) -> usize {
        self.csr.count(id)
    }

    fn next_at(&self, id: VertexId, index: usize) -> VertexId {
        self.csr.head(id, index)
    }

    fn next_arrow_at(&self, id: VertexId, index: usize) -> &A {
        self.csr.data(id, index)
    }
}

impl<V: fmt::Debug, A: fmt::Debug> fmt::Debug for ImmutableDirectedGraph<V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (index, vertex) in self.vertices.iter().enumerate() {
            let id = VertexId::new(index);
            let arrows: Vec<(&V, &A)> = self
                .csr
                .heads(id)
                .iter()
                .map(|head| &self.vertices[head.index()])
                .zip(self.csr.data_slice(id))
                .collect();
            map.entry(vertex, &arrows);
        }
        map.finish()
    }
}

/// An immutable integer-indexed directed graph with arrow data.
///
/// # Examples
///
/// ```rust
/// use digraph::{ImmutableAttributedIntDirectedGraph, IntAttributedDirectedGraph, IntGraphBuilder};
///
/// let mut builder: IntGraphBuilder<f64> = IntGraphBuilder::new();
/// let a = builder.add_vertex();
/// let b = builder.add_vertex();
/// builder.add_arrow(a, b, 0.5)?;
///
/// let graph = ImmutableAttributedIntDirectedGraph::from(&builder);
/// assert_eq!(graph.next_arrow(a, 0), &0.5);
/// assert_eq!(graph.next_slice(a), &[b]);
/// # Ok::<(), digraph::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableAttributedIntDirectedGraph<A> {
    csr: Csr<A>,
}

impl<A: Clone> ImmutableAttributedIntDirectedGraph<A> {
    /// Compiles any attributed integer graph.
    #[must_use]
    pub fn from_graph<G: IntAttributedDirectedGraph<A>>(graph: &G) -> Self {
        let csr = Csr::build(graph.vertex_count(), graph.arrow_count(), |vertex| {
            graph
                .next_arrows(vertex)
                .map(|(head, data)| (head, data.clone()))
        });
        tracing::debug!(
            vertices = csr.vertex_count(),
            arrows = csr.arrow_count(),
            "compiled immutable attributed int graph"
        );
        ImmutableAttributedIntDirectedGraph { csr }
    }

    /// Copies the graph back into a mutable builder.
    #[must_use]
    pub fn to_builder(&self) -> IntGraphBuilder<A> {
        let mut builder =
            IntGraphBuilder::with_capacity(self.csr.vertex_count(), self.csr.arrow_count());
        builder.add_vertices(self.csr.vertex_count());
        for tail in self.vertex_ids() {
            for (head, data) in self.csr.heads(tail).iter().zip(self.csr.data_slice(tail)) {
                builder.push_arrow(tail, *head, data.clone());
            }
        }
        builder
    }
}

impl<A> ImmutableAttributedIntDirectedGraph<A> {
    /// Returns the heads of all outgoing arrows of `vertex`.
    #[must_use]
    pub fn next_slice(&self, vertex: VertexId) -> &[VertexId] {
        self.csr.heads(vertex)
    }

    /// Returns the data of all outgoing arrows of `vertex`.
    #[must_use]
    pub fn next_arrow_slice(&self, vertex: VertexId) -> &[A] {
        self.csr.data_slice(vertex)
    }
}

impl<A: Clone> From<&IntGraphBuilder<A>> for ImmutableAttributedIntDirectedGraph<A> {
    fn from(builder: &IntGraphBuilder<A>) -> Self {
        Self::from_graph(builder)
    }
}

impl<A> IntDirectedGraph for ImmutableAttributedIntDirectedGraph<A> {
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

impl<A> IntAttributedDirectedGraph<A> for ImmutableAttributedIntDirectedGraph<A> {
    fn next_arrow(&self, vertex: VertexId, index: usize) -> &A {
        self.csr.data(vertex, index)
    }

    fn next_arrows<'a>(&'a self, vertex: VertexId) -> impl Iterator<Item = (VertexId, &'a A)>
    where
        A: 'a,
    {
        self.csr
            .heads(vertex)
            .iter()
            .copied()
            .zip(self.csr.data_slice(vertex))
    }
}

/// An immutable integer-indexed graph with forward and backward adjacency.
///
/// The backward table is derived from the forward one by a counting pass:
/// the incoming arrows of each vertex are ordered by tail.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableIntBidiGraph {
    next: Csr<()>,
    prev: Csr<()>,
}

impl ImmutableIntBidiGraph {
    /// Compiles any integer graph.
    #[must_use]
    pub fn from_graph<G: IntDirectedGraph>(graph: &G) -> Self {
        let next = Csr::build(graph.vertex_count(), graph.arrow_count(), |vertex| {
            graph.next_vertices(vertex).map(|head| (head, ()))
        });
        let prev = next.transpose();
        tracing::debug!(
            vertices = next.vertex_count(),
            arrows = next.arrow_count(),
            "compiled immutable int bidi graph"
        );
        ImmutableIntBidiGraph { next, prev }
    }

    /// Returns the heads of all outgoing arrows of `vertex`.
    #[must_use]
    pub fn next_slice(&self, vertex: VertexId) -> &[VertexId] {
        self.next.heads(vertex)
    }

    /// Returns the tails of all incoming arrows of `vertex`.
    #[must_use]
    pub fn prev_slice(&self, vertex: VertexId) -> &[VertexId] {
        self.prev.heads(vertex)
    }

    /// Copies the graph back into a mutable builder.
    #[must_use]
    pub fn to_builder(&self) -> IntGraphBuilder {
        let mut builder =
            IntGraphBuilder::with_capacity(self.next.vertex_count(), self.next.arrow_count());
        builder.add_vertices(self.next.vertex_count());
        for tail in self.vertex_ids() {
            for &head in self.next.heads(tail) {
                builder.push_arrow(tail, head, ());
            }
        }
        builder
    }
}

impl<A> From<&IntGraphBuilder<A>> for ImmutableIntBidiGraph {
    fn from(builder: &IntGraphBuilder<A>) -> Self {
        Self::from_graph(builder)
    }
}

impl IntDirectedGraph for ImmutableIntBidiGraph {
    fn vertex_count(&self) -> usize {
        self.next.vertex_count()
    }

    fn arrow_count(&self) -> usize {
        self.next.arrow_count()
    }

    fn next_count(&self, vertex: VertexId) -> usize {
        self.next.count(vertex)
    }

    fn next(&self, vertex: VertexId, index: usize) -> VertexId {
        self.next.head(vertex, index)
    }

    fn next_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> {
        self.next.heads(vertex).iter().copied()
    }
}

impl IntBidiGraph for ImmutableIntBidiGraph {
    fn prev_count(&self, vertex: VertexId) -> usize {
        self.prev.count(vertex)
    }

    fn prev(&self, vertex: VertexId, index: usize) -> VertexId {
        self.prev.head(vertex, index)
    }

    fn prev_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> {
        self.prev.heads(vertex).iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::BidiGraph, test::Unindexed};

    fn create_builder() -> DirectedGraphBuilder<&'static str, u32> {
        let mut builder = DirectedGraphBuilder::new();
        // Insert in non-alphabetical order to check the order is kept
        for v in ["D", "B", "A", "C"] {
            builder.add_vertex(v);
        }
        builder.add_arrow("A", "B", 1).unwrap();
        builder.add_arrow("B", "C", 2).unwrap();
        builder.add_arrow("A", "C", 5).unwrap();
        builder.add_arrow("C", "D", 1).unwrap();
        builder.add_arrow("A", "B", 6).unwrap();
        builder
    }

    fn adjacency<G: DirectedGraph<Vertex = &'static str, Arrow = u32>>(
        graph: &G,
    ) -> Vec<(&'static str, Vec<(&'static str, u32)>)> {
        graph
            .vertices()
            .map(|v| (*v, graph.next_arrows(v).map(|(h, d)| (*h, *d)).collect()))
            .collect()
    }

    #[test]
    fn test_compile_round_trip() {
        let builder = create_builder();
        let graph = ImmutableDirectedGraph::from(&builder);

        assert_eq!(adjacency(&graph), adjacency(&builder));
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.arrow_count(), 5);
        assert_eq!(graph.index_of(&"A"), builder.vertex_id(&"A"));
    }

    #[test]
    fn test_compile_without_index() {
        let builder = create_builder();
        let graph = ImmutableDirectedGraph::from_graph(&Unindexed(&builder)).unwrap();
        assert_eq!(adjacency(&graph), adjacency(&builder));
    }

    #[test]
    fn test_compile_from_bidi_builder() {
        let mut bidi: BidiGraphBuilder<u8, ()> = BidiGraphBuilder::new();
        for v in 0..3 {
            bidi.add_vertex(v);
        }
        bidi.add_arrow(2, 0, ()).unwrap();
        bidi.add_arrow(0, 1, ()).unwrap();
        assert_eq!(bidi.prev_count(&0), 1);

        let graph = ImmutableDirectedGraph::from(&bidi);
        assert_eq!(graph.next(&2, 0), &0);
        assert_eq!(graph.next_count(&1), 0);
    }

    #[test]
    fn test_to_builder_round_trip() {
        let builder = create_builder();
        let graph = ImmutableDirectedGraph::from(&builder);
        let mut rebuilt = graph.to_builder();
        assert_eq!(adjacency(&rebuilt), adjacency(&builder));

        rebuilt.remove_vertex(&"C");
        let recompiled = ImmutableDirectedGraph::from(&rebuilt);
        assert_eq!(recompiled.arrow_count(), 2);
        assert_eq!(graph.arrow_count(), 5);
    }

    #[test]
    fn test_slices() {
        let graph = ImmutableDirectedGraph::from(&create_builder());
        let a = graph.index_of(&"A").unwrap();
        let heads: Vec<&str> = graph.next_slice(a).iter().map(|&id| *graph.vertex_at(id)).collect();
        assert_eq!(heads, vec!["B", "C", "B"]);
        assert_eq!(graph.next_arrow_slice(a), &[1, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "vertex not in graph")]
    fn test_unknown_vertex_panics() {
        let graph = ImmutableDirectedGraph::from(&create_builder());
        let _ = graph.next_count(&"Z");
    }

    fn create_int_builder() -> IntGraphBuilder<char> {
        let mut builder = IntGraphBuilder::new();
        builder.add_vertices(4);
        let v = VertexId::new;
        builder.add_arrow(v(2), v(0), 'a').unwrap();
        builder.add_arrow(v(0), v(1), 'b').unwrap();
        builder.add_arrow(v(0), v(3), 'c').unwrap();
        builder.add_arrow(v(1), v(3), 'd').unwrap();
        builder
    }

    #[test]
    fn test_attributed_int_round_trip() {
        let builder = create_int_builder();
        let graph = ImmutableAttributedIntDirectedGraph::from(&builder);

        for vertex in builder.vertex_ids() {
            let expected: Vec<(VertexId, char)> =
                builder.next_arrows(vertex).map(|(h, d)| (h, *d)).collect();
            let actual: Vec<(VertexId, char)> =
                graph.next_arrows(vertex).map(|(h, d)| (h, *d)).collect();
            assert_eq!(expected, actual);
        }

        let rebuilt = ImmutableAttributedIntDirectedGraph::from(&graph.to_builder());
        assert_eq!(rebuilt, graph);
    }

    #[test]
    fn test_int_bidi_prev_table() {
        let graph = ImmutableIntBidiGraph::from(&create_int_builder());
        let v = VertexId::new;

        assert_eq!(graph.prev_slice(v(3)), &[v(0), v(1)]);
        assert_eq!(graph.prev_slice(v(0)), &[v(2)]);
        assert_eq!(graph.prev_count(v(2)), 0);
        assert_eq!(graph.prev(v(1), 0), v(0));
        assert_eq!(graph.next_slice(v(0)), &[v(1), v(3)]);

        let total_prev: usize = graph.vertex_ids().map(|x| graph.prev_count(x)).sum();
        assert_eq!(total_prev, graph.arrow_count());
        assert_eq!(ImmutableIntBidiGraph::from(&graph.to_builder()), graph);
    }

    #[test]
    fn test_to_builder_links_editable_chains() {
        let v = VertexId::new;
        let mut builder: IntGraphBuilder = IntGraphBuilder::new();
        builder.add_vertices(3);
        builder.add_arrow(v(0), v(0), ()).unwrap();
        builder.add_arrow(v(0), v(1), ()).unwrap();
        builder.add_arrow(v(0), v(1), ()).unwrap();
        builder.add_arrow(v(2), v(1), ()).unwrap();
        let graph = ImmutableIntBidiGraph::from(&builder);

        let mut rebuilt = graph.to_builder();
        assert_eq!(rebuilt.arrow_count(), 4);
        assert_eq!(rebuilt.prev_vertices(v(1)).collect::<Vec<_>>(), vec![v(0), v(0), v(2)]);
        assert_eq!(rebuilt.prev_vertices(v(0)).collect::<Vec<_>>(), vec![v(0)]);

        // The rebuilt chains must survive further edits
        assert_eq!(rebuilt.remove_arrow(v(0), 1), Ok(()));
        rebuilt.add_arrow(v(1), v(2), ()).unwrap();
        assert_eq!(rebuilt.next_vertices(v(0)).collect::<Vec<_>>(), vec![v(0), v(1)]);
        assert_eq!(rebuilt.prev_vertices(v(1)).collect::<Vec<_>>(), vec![v(0), v(2)]);
        assert_eq!(rebuilt.prev_vertices(v(2)).collect::<Vec<_>>(), vec![v(1)]);

        let mut objects: DirectedGraphBuilder<&str, u32> = DirectedGraphBuilder::new();
        objects.add_vertex("x");
        objects.add_vertex("y");
        objects.add_arrow("x", "x", 1).unwrap();
        objects.add_arrow("y", "x", 2).unwrap();
        let mut copy = ImmutableDirectedGraph::from(&objects).to_builder();
        assert_eq!(adjacency(&copy), adjacency(&objects));
        copy.add_arrow("x", "y", 3).unwrap();
        assert_eq!(copy.arrow_count(), 3);
        assert_eq!(copy.next_vertices(&"x").collect::<Vec<_>>(), vec![&"x", &"y"]);
    }
}
