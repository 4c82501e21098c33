use std::{fmt, hash::Hash};

use crate::{
    graph::DirectedGraph,
    path::{
        store::{DenseStore, HashStore, Scratch},
        PathFinder, Route,
    },
    Error, Result,
};

/// Unweighted path search over an object graph.
///
/// The finder runs a breadth-first search, so the path it returns has the
/// fewest arrows of all paths to the goal. The reported cost is that arrow
/// count. When several shortest paths exist, the one that follows the lowest
/// slots first is returned.
///
/// # Examples
///
/// ```rust
/// use digraph::{path::{AnyPathFinder, PathFinder}, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<char, &str> = DirectedGraphBuilder::new();
/// for v in ['a', 'b', 'c'] {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow('a', 'b', "ab")?;
/// builder.add_arrow('b', 'c', "bc")?;
/// builder.add_arrow('a', 'c', "ac")?;
///
/// let finder = AnyPathFinder::new(&builder);
/// let found = finder.find_edge_path(&'a', &'c')?.unwrap();
/// assert_eq!(found.path.as_slice(), &["ac"]);
/// assert_eq!(found.cost, 1.0);
/// # Ok::<(), digraph::Error>(())
/// ```
pub struct AnyPathFinder<'g, G> {
    graph: &'g G,
    max_length: usize,
}

impl<'g, G: DirectedGraph> AnyPathFinder<'g, G> {
    /// Creates a finder over `graph`.
    pub fn new(graph: &'g G) -> Self {
        AnyPathFinder {
            graph,
            max_length: usize::MAX,
        }
    }

    /// Ignores every path with more than `max_length` arrows.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Returns the graph this finder searches.
    #[must_use]
    pub fn graph(&self) -> &'g G {
        self.graph
    }
}

impl<G> PathFinder<G::Vertex, G::Arrow> for AnyPathFinder<'_, G>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq + fmt::Debug,
{
    fn find_route<'a>(
        &'a self,
        start: &'a G::Vertex,
        is_goal: &mut dyn FnMut(&G::Vertex) -> bool,
    ) -> Result<Option<Route<'a, G::Vertex>>> {
        if let Some(indexed) = self.graph.as_indexed() {
            let start_id = indexed
                .index_of(start)
                .ok_or_else(|| Error::vertex_not_found(start))?;

            let mut scratch = Scratch::new(DenseStore::new(self.graph.vertex_count()));
            let found = scratch.breadth_first(
                start_id,
                |id| is_goal(indexed.vertex_at(id)),
                |id, out| out.extend((0..indexed.next_count_at(id)).map(|slot| indexed.next_at(id, slot))),
                self.max_length,
            );

            return Ok(found.map(|(goal, length)| {
                let steps = scratch
                    .steps_to(goal)
                    .into_iter()
                    .map(|(tail, slot)| (indexed.vertex_at(tail), slot))
                    .collect();
                Route::new(start, steps, indexed.vertex_at(goal), length as f64)
            }));
        }

        if !self.graph.contains_vertex(start) {
            return Err(Error::vertex_not_found(start));
        }

        let mut scratch = Scratch::new(HashStore::new());
        let found = scratch.breadth_first(
            start,
            |vertex| is_goal(vertex),
            |tail, out| out.extend(self.graph.next_vertices(tail)),
            self.max_length,
        );

        Ok(found.map(|(goal, length)| Route::new(start, scratch.steps_to(goal), goal, length as f64)))
    }

    fn arrow(&self, tail: &G::Vertex, slot: usize) -> &G::Arrow {
        self.graph.next_arrow(tail, slot)
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.graph.contains_vertex(vertex)
    }
}
