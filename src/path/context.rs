use std::fmt;

use crate::{
    graph::{CostedPath, IntAttributedDirectedGraph, IntDirectedGraph, VertexId, VertexPath},
    path::store::{DenseStore, Scratch},
    Error, Result,
};

/// Reusable bookkeeping for searches over integer graphs.
///
/// A context owns the cost table, back-links, explored set and queues of a
/// search. Passing the same context to many searches reuses those
/// allocations; each search resets it for the graph it runs on.
///
/// # Examples
///
/// ```rust
/// use digraph::{path::{find_any_int_path, SearchContext}, IntGraphBuilder, VertexId};
///
/// let mut builder: IntGraphBuilder = IntGraphBuilder::new();
/// let first = builder.add_vertices(3);
/// let v = |i: usize| VertexId::new(first.index() + i);
/// builder.add_arrow(v(0), v(1), ())?;
/// builder.add_arrow(v(1), v(2), ())?;
///
/// let mut context = SearchContext::new();
/// for goal in 0..3 {
///     let found = find_any_int_path(&builder, &mut context, v(0), |u| u == v(goal), usize::MAX)?;
///     assert_eq!(found.unwrap().cost, goal as f64);
/// }
/// # Ok::<(), digraph::Error>(())
/// ```
pub struct SearchContext {
    scratch: Scratch<VertexId, DenseStore>,
}

impl SearchContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        SearchContext {
            scratch: Scratch::new(DenseStore::default()),
        }
    }

    /// Creates a context pre-sized for graphs of `vertex_count` vertices.
    #[must_use]
    pub fn with_capacity(vertex_count: usize) -> Self {
        SearchContext {
            scratch: Scratch::new(DenseStore::new(vertex_count)),
        }
    }

    fn prepare<G: IntDirectedGraph>(&mut self, graph: &G, start: VertexId) -> Result<()> {
        let count = graph.vertex_count();
        if start.index() >= count {
            return Err(Error::VertexIndexOutOfBounds {
                index: start.index(),
                count,
            });
        }
        self.scratch.store.reset(count);
        Ok(())
    }

    fn vertex_path(&self, goal: VertexId, cost: f64) -> CostedPath<VertexPath<VertexId>> {
        let vertices: VertexPath<VertexId> = self
            .scratch
            .steps_to(goal)
            .into_iter()
            .map(|(tail, _)| tail)
            .chain(std::iter::once(goal))
            .collect();
        CostedPath::new(vertices, cost)
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        SearchContext::new()
    }
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext").finish_non_exhaustive()
    }
}

/// Finds the cheapest path in an attributed integer graph from `start` to the
/// first vertex accepted by `is_goal`.
///
/// `cost(tail, head, data)` weighs each arrow and must be non-negative; an
/// infinite cost makes the arrow impassable. Paths whose cost would exceed
/// `max_cost` are not explored; pass `f64::INFINITY` for no bound.
///
/// # Errors
///
/// Returns [`Error::VertexIndexOutOfBounds`] if `start` is not below the
/// vertex count of `graph`.
pub fn find_shortest_int_path<A, G, P, C>(
    graph: &G,
    context: &mut SearchContext,
    start: VertexId,
    is_goal: P,
    cost: C,
    max_cost: f64,
) -> Result<Option<CostedPath<VertexPath<VertexId>>>>
where
    G: IntAttributedDirectedGraph<A>,
    P: FnMut(VertexId) -> bool,
    C: Fn(VertexId, VertexId, &A) -> f64,
{
    context.prepare(graph, start)?;
    let found = context.scratch.uniform_cost(
        start,
        is_goal,
        |tail, out| out.extend(graph.next_arrows(tail).map(|(head, data)| (head, cost(tail, head, data)))),
        max_cost,
    );
    Ok(found.map(|(goal, total)| context.vertex_path(goal, total)))
}

/// Finds a path with the fewest arrows in an integer graph from `start` to the
/// first vertex accepted by `is_goal`, ignoring paths longer than
/// `max_length` arrows.
///
/// # Errors
///
/// Returns [`Error::VertexIndexOutOfBounds`] if `start` is not below the
/// vertex count of `graph`.
pub fn find_any_int_path<G, P>(
    graph: &G,
    context: &mut SearchContext,
    start: VertexId,
    is_goal: P,
    max_length: usize,
) -> Result<Option<CostedPath<VertexPath<VertexId>>>>
where
    G: IntDirectedGraph,
    P: FnMut(VertexId) -> bool,
{
    context.prepare(graph, start)?;
    let found = context.scratch.breadth_first(
        start,
        is_goal,
        |tail, out| out.extend(graph.next_vertices(tail)),
        max_length,
    );
    Ok(found.map(|(goal, length)| context.vertex_path(goal, length as f64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{ImmutableAttributedIntDirectedGraph, IntGraphBuilder},
        test::create_two_cycles,
    };

    fn ids(path: &VertexPath<VertexId>) -> Vec<usize> {
        path.iter().map(|v| v.index()).collect()
    }

    fn create_weighted() -> IntGraphBuilder<f64> {
        // 0 -1-> 1 -2-> 2 -1-> 3, 0 -5-> 2
        let mut builder = IntGraphBuilder::new();
        builder.add_vertices(4);
        let v = VertexId::new;
        builder.add_arrow(v(0), v(1), 1.0).unwrap();
        builder.add_arrow(v(1), v(2), 2.0).unwrap();
        builder.add_arrow(v(0), v(2), 5.0).unwrap();
        builder.add_arrow(v(2), v(3), 1.0).unwrap();
        builder
    }

    #[test]
    fn test_shortest_int_path() {
        let builder = create_weighted();
        let compiled = ImmutableAttributedIntDirectedGraph::from(&builder);
        let mut context = SearchContext::new();
        let goal = VertexId::new(3);

        for found in [
            find_shortest_int_path(&builder, &mut context, VertexId::new(0), |v| v == goal, |_, _, w: &f64| *w, f64::INFINITY),
            find_shortest_int_path(&compiled, &mut context, VertexId::new(0), |v| v == goal, |_, _, w: &f64| *w, f64::INFINITY),
        ] {
            let found = found.unwrap().unwrap();
            assert_eq!(ids(&found.path), vec![0, 1, 2, 3]);
            assert_eq!(found.cost, 4.0);
        }
    }

    #[test]
    fn test_shortest_int_path_cost_budget() {
        let builder = create_weighted();
        let mut context = SearchContext::new();
        let goal = VertexId::new(3);
        let weight = |_: VertexId, _: VertexId, w: &f64| *w;

        // The cheapest path to 3 costs 4.0
        let found = find_shortest_int_path(&builder, &mut context, VertexId::new(0), |v| v == goal, weight, 3.5);
        assert_eq!(found, Ok(None));

        let found = find_shortest_int_path(&builder, &mut context, VertexId::new(0), |v| v == goal, weight, 4.0)
            .unwrap()
            .unwrap();
        assert_eq!(ids(&found.path), vec![0, 1, 2, 3]);
        assert_eq!(found.cost, 4.0);

        // A budget below the first arrow still reaches the start itself
        let found = find_shortest_int_path(&builder, &mut context, VertexId::new(0), |v| v.index() == 0, weight, 0.5)
            .unwrap()
            .unwrap();
        assert_eq!(found.cost, 0.0);
    }

    #[test]
    fn test_context_reuse_across_graphs() {
        let weighted = create_weighted();
        let cycles = create_two_cycles();
        let mut context = SearchContext::with_capacity(2);

        let found = find_any_int_path(&cycles, &mut context, VertexId::new(1), |v| v.index() == 4, usize::MAX)
            .unwrap()
            .unwrap();
        assert_eq!(ids(&found.path), vec![1, 2, 3, 4]);

        // Searching a smaller graph afterwards must not see stale state
        let found = find_any_int_path(&weighted, &mut context, VertexId::new(3), |v| v.index() == 0, usize::MAX)
            .unwrap();
        assert_eq!(found, None);

        let found = find_any_int_path(&weighted, &mut context, VertexId::new(0), |v| v.index() == 3, usize::MAX)
            .unwrap()
            .unwrap();
        assert_eq!(ids(&found.path), vec![0, 2, 3]);
        assert_eq!(found.cost, 2.0);
    }

    #[test]
    fn test_start_out_of_bounds() {
        let builder = create_weighted();
        let mut context = SearchContext::new();
        let result = find_any_int_path(&builder, &mut context, VertexId::new(9), |_| true, 1);
        assert_eq!(
            result,
            Err(Error::VertexIndexOutOfBounds { index: 9, count: 4 })
        );
    }
}
