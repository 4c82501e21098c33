use std::{fmt, hash::Hash};

use crate::{
    graph::DirectedGraph,
    path::{
        store::{DenseStore, HashStore, Scratch},
        PathFinder, Route,
    },
    Error, Result,
};

/// Cheapest-path search over an object graph.
///
/// The finder runs a uniform-cost (Dijkstra) search. The cost of each arrow
/// comes from the cost function `cost(from, to, arrow)`, which must return
/// non-negative values. An arrow whose cost is `f64::INFINITY` cannot be
/// taken. Among paths of equal cost the one discovered first wins, which
/// makes results deterministic for a given graph.
///
/// # Examples
///
/// ```rust
/// use digraph::{path::{PathFinder, ShortestPathFinder}, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<u32, f64> = DirectedGraphBuilder::new();
/// for v in 0..3 {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow(0, 1, 1.0)?;
/// builder.add_arrow(1, 2, 1.0)?;
/// builder.add_arrow(0, 2, 3.0)?;
///
/// let finder = ShortestPathFinder::new(&builder, |_, _, cost: &f64| *cost);
/// let found = finder.find_edge_path(&0, &2)?.unwrap();
/// assert_eq!(found.path.as_slice(), &[1.0, 1.0]);
/// assert_eq!(found.cost, 2.0);
/// # Ok::<(), digraph::Error>(())
/// ```
pub struct ShortestPathFinder<'g, G, C> {
    graph: &'g G,
    cost: C,
    max_cost: f64,
}

impl<'g, G, C> ShortestPathFinder<'g, G, C>
where
    G: DirectedGraph,
    C: Fn(&G::Vertex, &G::Vertex, &G::Arrow) -> f64,
{
    /// Creates a finder over `graph` weighing arrows with `cost`.
    pub fn new(graph: &'g G, cost: C) -> Self {
        ShortestPathFinder {
            graph,
            cost,
            max_cost: f64::INFINITY,
        }
    }

    /// Gives up on every path whose cost would exceed `max_cost`.
    #[must_use]
    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = max_cost;
        self
    }

    /// Returns the graph this finder searches.
    #[must_use]
    pub fn graph(&self) -> &'g G {
        self.graph
    }
}

impl<G, C> PathFinder<G::Vertex, G::Arrow> for ShortestPathFinder<'_, G, C>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq + fmt::Debug,
    C: Fn(&G::Vertex, &G::Vertex, &G::Arrow) -> f64,
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
            let found = scratch.uniform_cost(
                start_id,
                |id| is_goal(indexed.vertex_at(id)),
                |id, out| {
                    let tail = indexed.vertex_at(id);
                    for slot in 0..indexed.next_count_at(id) {
                        let head = indexed.next_at(id, slot);
                        let arrow = indexed.next_arrow_at(id, slot);
                        out.push((head, (self.cost)(tail, indexed.vertex_at(head), arrow)));
                    }
                },
                self.max_cost,
            );

            return Ok(found.map(|(goal, cost)| {
                let steps = scratch
                    .steps_to(goal)
                    .into_iter()
                    .map(|(tail, slot)| (indexed.vertex_at(tail), slot))
                    .collect();
                Route::new(start, steps, indexed.vertex_at(goal), cost)
            }));
        }

        if !self.graph.contains_vertex(start) {
            return Err(Error::vertex_not_found(start));
        }

        let mut scratch = Scratch::new(HashStore::new());
        let found = scratch.uniform_cost(
            start,
            |vertex| is_goal(vertex),
            |tail, out| {
                out.extend(
                    self.graph
                        .next_arrows(tail)
                        .map(|(head, arrow)| (head, (self.cost)(tail, head, arrow))),
                );
            },
            self.max_cost,
        );

        Ok(found.map(|(goal, cost)| Route::new(start, scratch.steps_to(goal), goal, cost)))
    }

    fn arrow(&self, tail: &G::Vertex, slot: usize) -> &G::Arrow {
        self.graph.next_arrow(tail, slot)
    }

    fn contains_vertex(&self, vertex: &G::Vertex) -> bool {
        self.graph.contains_vertex(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{BidiGraphBuilder, DirectedGraphBuilder, ImmutableDirectedGraph},
        test::{create_weighted_graph, Unindexed},
    };

    fn weight(_: &&str, _: &&str, w: &f64) -> f64 {
        *w
    }

    #[test]
    fn test_cheapest_path_over_longer_route() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);

        let found = finder.find_vertex_path(&"A", &"D").unwrap().unwrap();
        assert_eq!(found.path.as_slice(), &["A", "B", "C", "D"]);
        assert_eq!(found.cost, 4.0);

        let edges = finder.find_edge_path(&"A", &"D").unwrap().unwrap();
        assert_eq!(edges.path.as_slice(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_dense_and_hash_bookkeeping_agree() {
        let graph = create_weighted_graph();
        let compiled = ImmutableDirectedGraph::from_graph(&graph).unwrap();
        let mut bidi = BidiGraphBuilder::new();
        for v in graph.vertices() {
            bidi.add_vertex(*v);
        }
        for (tail, head, w) in graph.arrows() {
            bidi.add_arrow(*tail, *head, *w).unwrap();
        }

        let expected = ShortestPathFinder::new(&graph, weight)
            .find_vertex_path(&"A", &"D")
            .unwrap();
        let from_compiled = ShortestPathFinder::new(&compiled, weight)
            .find_vertex_path(&"A", &"D")
            .unwrap();
        let from_bidi = ShortestPathFinder::new(&bidi, weight)
            .find_vertex_path(&"A", &"D")
            .unwrap();
        let from_unindexed = ShortestPathFinder::new(&Unindexed(&graph), weight)
            .find_vertex_path(&"A", &"D")
            .unwrap();
        assert!(expected.is_some());
        assert_eq!(expected, from_compiled);
        assert_eq!(expected, from_bidi);
        assert_eq!(expected, from_unindexed);
    }

    #[test]
    fn test_unreachable_goal_is_none() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);
        assert_eq!(finder.find_vertex_path(&"A", &"E").unwrap(), None);
        assert_eq!(finder.find_vertex_path(&"D", &"A").unwrap(), None);
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);
        let found = finder.find_vertex_path(&"C", &"C").unwrap().unwrap();
        assert_eq!(found.path.as_slice(), &["C"]);
        assert_eq!(found.cost, 0.0);
        let edges = finder.find_edge_path(&"C", &"C").unwrap().unwrap();
        assert!(edges.path.is_empty());
    }

    #[test]
    fn test_absent_vertices_are_errors() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);
        assert!(matches!(
            finder.find_vertex_path(&"Z", &"A"),
            Err(Error::VertexNotFound(_))
        ));
        assert!(matches!(
            finder.find_vertex_path(&"A", &"Z"),
            Err(Error::VertexNotFound(_))
        ));

        let unindexed = Unindexed(&graph);
        let finder = ShortestPathFinder::new(&unindexed, weight);
        assert!(matches!(
            finder.find_edge_path(&"Z", &"A"),
            Err(Error::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_goal_predicate() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);
        // C is cheaper to reach than D, so it satisfies the predicate first
        let found = finder
            .find_vertex_path_to(&"A", |v| *v == "C" || *v == "D")
            .unwrap()
            .unwrap();
        assert_eq!(found.path.last(), Some(&"C"));
        assert_eq!(found.cost, 3.0);
    }

    #[test]
    fn test_max_cost_prunes() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight).with_max_cost(3.5);
        assert_eq!(finder.find_vertex_path(&"A", &"D").unwrap(), None);
        assert!(finder.find_vertex_path(&"A", &"C").unwrap().is_some());
    }

    #[test]
    fn test_infinite_cost_is_impassable() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, |from: &&str, _: &&str, w: &f64| {
            if *from == "B" {
                f64::INFINITY
            } else {
                *w
            }
        });
        let found = finder.find_vertex_path(&"A", &"D").unwrap().unwrap();
        assert_eq!(found.path.as_slice(), &["A", "C", "D"]);
        assert_eq!(found.cost, 6.0);
    }

    #[test]
    fn test_parallel_arrows_pick_cheapest_slot() {
        let mut graph: DirectedGraphBuilder<u8, f64> = DirectedGraphBuilder::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        graph.add_arrow(0, 1, 4.0).unwrap();
        graph.add_arrow(0, 1, 2.0).unwrap();
        graph.add_arrow(0, 1, 3.0).unwrap();

        let finder = ShortestPathFinder::new(&graph, |_: &u8, _: &u8, w: &f64| *w);
        let edges = finder.find_edge_path(&0, &1).unwrap().unwrap();
        assert_eq!(edges.path.as_slice(), &[2.0]);
    }

    #[test]
    fn test_waypoints() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);

        let found = finder
            .find_vertex_path_over_waypoints(&["A", "C", "D"])
            .unwrap();
        assert_eq!(found.path.as_slice(), &["A", "B", "C", "D"]);
        assert_eq!(found.cost, 4.0);

        let single = finder.find_vertex_path_over_waypoints(&["B"]).unwrap();
        assert_eq!(single.path.as_slice(), &["B"]);
        assert_eq!(single.cost, 0.0);

        let edges = finder.find_edge_path_over_waypoints(&["A", "B", "D"]).unwrap();
        assert_eq!(edges.path.as_slice(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_waypoint_failures() {
        let graph = create_weighted_graph();
        let finder = ShortestPathFinder::new(&graph, weight);
        assert!(matches!(
            finder.find_vertex_path_over_waypoints(&[]),
            Err(Error::NoPath { .. })
        ));
        assert!(matches!(
            finder.find_vertex_path_over_waypoints(&["A", "D", "B"]),
            Err(Error::NoPath { .. })
        ));
        assert!(matches!(
            finder.find_vertex_path_over_waypoints(&["A", "Q"]),
            Err(Error::VertexNotFound(_))
        ));
    }
}
