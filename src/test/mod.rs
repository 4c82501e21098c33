use crate::graph::{BidiGraph, DirectedGraph, DirectedGraphBuilder, IntGraphBuilder, VertexId};

/// Wraps a graph but hides its dense index, forcing algorithms onto their
/// hash-backed code paths.
pub struct Unindexed<'a, G>(pub &'a G);

impl<G: DirectedGraph> DirectedGraph for Unindexed<'_, G> {
    type Vertex = G::Vertex;
    type Arrow = G::Arrow;

    fn vertex_count(&self) -> usize {
        self.0.vertex_count()
    }
    fn arrow_count(&self) -> usize {
        self.0.arrow_count()
    }
    fn vertices(&self) -> impl Iterator<Item = &G::Vertex> {
        self.0.vertices()
    }
    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.0.contains_vertex(vertex)
    }
    fn next_count(&self, vertex: &G::Vertex) -> usize {
        self.0.next_count(vertex)
    }
    fn next(&self, vertex: &G::Vertex, index: usize) -> &G::Vertex {
        self.0.next(vertex, index)
    }
    fn next_arrow(&self, vertex: &G::Vertex, index: usize) -> &G::Arrow {
        self.0.next_arrow(vertex, index)
    }
}

impl<G: BidiGraph> BidiGraph for Unindexed<'_, G> {
    fn prev_count(&self, vertex: &G::Vertex) -> usize {
        self.0.prev_count(vertex)
    }
    fn prev(&self, vertex: &G::Vertex, index: usize) -> &G::Vertex {
        self.0.prev(vertex, index)
    }
    fn prev_arrow(&self, vertex: &G::Vertex, index: usize) -> &G::Arrow {
        self.0.prev_arrow(vertex, index)
    }
}

/// A -1-> B -2-> C -1-> D and A -5-> C, plus an isolated E.
pub fn create_weighted_graph() -> DirectedGraphBuilder<&'static str, f64> {
    let mut builder = DirectedGraphBuilder::new();
    for v in ["A", "B", "C", "D", "E"] {
        builder.add_vertex(v);
    }
    builder.add_arrow("A", "B", 1.0).unwrap();
    builder.add_arrow("B", "C", 2.0).unwrap();
    builder.add_arrow("A", "C", 5.0).unwrap();
    builder.add_arrow("C", "D", 1.0).unwrap();
    builder
}

/// Two 3-cycles `0 -> 1 -> 2 -> 0` and `3 -> 4 -> 5 -> 3` joined by `2 -> 3`.
pub fn create_two_cycles() -> IntGraphBuilder {
    let mut builder = IntGraphBuilder::new();
    builder.add_vertices(6);
    for (tail, head) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)] {
        builder
            .add_arrow(VertexId::new(tail), VertexId::new(head), ())
            .unwrap();
    }
    builder
}
