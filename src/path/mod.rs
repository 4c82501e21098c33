//! Path finding over object graphs.
//!
//! Two finders share one interface, [`PathFinder`]:
//!
//! - [`AnyPathFinder`] runs a breadth-first search and returns a path with the
//!   fewest arrows
//! - [`ShortestPathFinder`] runs a uniform-cost (Dijkstra) search with a
//!   caller supplied cost function `(from, to, arrow) -> f64`
//!
//! Each search records back-links (predecessor and the outgoing slot taken)
//! and rebuilds the path by walking them back from the goal. When the graph
//! exposes a dense index through [`DirectedGraph::as_indexed`](crate::graph::DirectedGraph::as_indexed), the search
//! keeps its bookkeeping in flat arrays instead of hash maps. The results are
//! the same either way.
//!
//! # Outcomes
//!
//! - A reachable goal gives `Ok(Some(path))`
//! - An unreachable goal gives `Ok(None)`
//! - A start or goal vertex that is not in the graph gives
//!   [`Error::VertexNotFound`]
//! - Waypoint routes report an unreachable leg as [`Error::NoPath`]
//!
//! Searches over integer graphs that run many times in a row can reuse their
//! bookkeeping through a [`SearchContext`].
//!
//! # Examples
//!
//! ```rust
//! use digraph::{path::{PathFinder, ShortestPathFinder}, DirectedGraphBuilder};
//!
//! let mut builder: DirectedGraphBuilder<&str, f64> = DirectedGraphBuilder::new();
//! for v in ["A", "B", "C", "D"] {
//!     builder.add_vertex(v);
//! }
//! builder.add_arrow("A", "B", 1.0)?;
//! builder.add_arrow("B", "C", 2.0)?;
//! builder.add_arrow("A", "C", 5.0)?;
//! builder.add_arrow("C", "D", 1.0)?;
//!
//! let finder = ShortestPathFinder::new(&builder, |_, _, cost: &f64| *cost);
//! let found = finder.find_vertex_path(&"A", &"D")?.unwrap();
//! assert_eq!(found.path.as_slice(), &["A", "B", "C", "D"]);
//! assert_eq!(found.cost, 4.0);
//! # Ok::<(), digraph::Error>(())
//! ```

mod any_path;
mod context;
mod shortest;
pub(crate) mod store;

use std::fmt;

pub use any_path::AnyPathFinder;
pub use context::{find_any_int_path, find_shortest_int_path, SearchContext};
pub use shortest::ShortestPathFinder;

use crate::{
    graph::{CostedPath, EdgePath, VertexPath},
    Error, Result,
};

/// The raw result of one search: the arrows taken, each as its tail and
/// outgoing slot, plus the vertex the search ended on.
///
/// A route borrows its vertices from the graph (and the start vertex from the
/// caller). Convert it into an owned [`VertexPath`] or [`EdgePath`] with
/// [`into_vertex_path`](Route::into_vertex_path) or
/// [`into_edge_path`](Route::into_edge_path).
#[derive(Clone, PartialEq)]
pub struct Route<'a, V> {
    start: &'a V,
    steps: Vec<(&'a V, usize)>,
    goal: &'a V,
    cost: f64,
}

impl<'a, V> Route<'a, V> {
    pub(crate) fn new(start: &'a V, steps: Vec<(&'a V, usize)>, goal: &'a V, cost: f64) -> Self {
        Route {
            start,
            steps,
            goal,
            cost,
        }
    }

    /// A route that starts and ends at `vertex` without taking any arrow.
    #[must_use]
    pub fn empty(vertex: &'a V) -> Self {
        Route::new(vertex, Vec::new(), vertex, 0.0)
    }

    /// Returns the first vertex of the route.
    #[must_use]
    pub fn start(&self) -> &'a V {
        self.start
    }

    /// Returns the last vertex of the route.
    #[must_use]
    pub fn goal(&self) -> &'a V {
        self.goal
    }

    /// Returns the `(tail, slot)` of every arrow taken, in order.
    #[must_use]
    pub fn steps(&self) -> &[(&'a V, usize)] {
        &self.steps
    }

    /// Returns the accumulated cost.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Continues this route with `leg`, which must start where this route
    /// ends. The junction vertex appears once.
    pub fn append(&mut self, leg: Route<'a, V>) {
        self.steps.extend(leg.steps);
        self.goal = leg.goal;
        self.cost += leg.cost;
    }

    /// Converts the route into the list of vertices it visits.
    #[must_use]
    pub fn into_vertex_path(self) -> CostedPath<VertexPath<V>>
    where
        V: Clone,
    {
        let vertices: VertexPath<V> = self
            .steps
            .iter()
            .map(|(tail, _)| (*tail).clone())
            .chain(std::iter::once(self.goal.clone()))
            .collect();
        CostedPath::new(vertices, self.cost)
    }

    /// Converts the route into the list of arrows it takes, looked up
    /// through `finder`.
    pub fn into_edge_path<A, F>(self, finder: &F) -> CostedPath<EdgePath<A>>
    where
        A: Clone,
        F: PathFinder<V, A> + ?Sized,
    {
        let arrows: EdgePath<A> = self
            .steps
            .iter()
            .map(|(tail, slot)| finder.arrow(tail, *slot).clone())
            .collect();
        CostedPath::new(arrows, self.cost)
    }
}

impl<V: fmt::Debug> fmt::Debug for Route<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("start", self.start)
            .field("steps", &self.steps)
            .field("goal", self.goal)
            .field("cost", &self.cost)
            .finish()
    }
}

/// Common interface of the object graph path finders.
///
/// Implementors provide [`find_route`](PathFinder::find_route); every other
/// method is built on top of it.
pub trait PathFinder<V, A> {
    /// Searches from `start` until a vertex satisfies `is_goal`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `start` is not in the graph.
    fn find_route<'a>(
        &'a self,
        start: &'a V,
        is_goal: &mut dyn FnMut(&V) -> bool,
    ) -> Result<Option<Route<'a, V>>>;

    /// Returns the data of the `slot`-th outgoing arrow of `tail`.
    fn arrow(&self, tail: &V, slot: usize) -> &A;

    /// Returns `true` if `vertex` is part of the searched graph.
    fn contains_vertex(&self, vertex: &V) -> bool;

    /// Finds a path from `start` to `goal` as a list of vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `start` or `goal` is not in the graph.
    fn find_vertex_path(&self, start: &V, goal: &V) -> Result<Option<CostedPath<VertexPath<V>>>>
    where
        V: Clone + PartialEq + fmt::Debug,
    {
        if !self.contains_vertex(goal) {
            return Err(Error::vertex_not_found(goal));
        }
        self.find_vertex_path_to(start, |vertex| vertex == goal)
    }

    /// Finds a path from `start` to the first vertex accepted by `is_goal`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `start` is not in the graph.
    fn find_vertex_path_to<P>(&self, start: &V, mut is_goal: P) -> Result<Option<CostedPath<VertexPath<V>>>>
    where
        V: Clone,
        P: FnMut(&V) -> bool,
    {
        Ok(self
            .find_route(start, &mut is_goal)?
            .map(Route::into_vertex_path))
    }

    /// Finds a path from `start` to `goal` as a list of arrows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `start` or `goal` is not in the graph.
    fn find_edge_path(&self, start: &V, goal: &V) -> Result<Option<CostedPath<EdgePath<A>>>>
    where
        V: PartialEq + fmt::Debug,
        A: Clone,
    {
        if !self.contains_vertex(goal) {
            return Err(Error::vertex_not_found(goal));
        }
        self.find_edge_path_to(start, |vertex| vertex == goal)
    }

    /// Finds a path from `start` to the first vertex accepted by `is_goal`,
    /// as a list of arrows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if `start` is not in the graph.
    fn find_edge_path_to<P>(&self, start: &V, mut is_goal: P) -> Result<Option<CostedPath<EdgePath<A>>>>
    where
        A: Clone,
        P: FnMut(&V) -> bool,
    {
        Ok(self
            .find_route(start, &mut is_goal)?
            .map(|route| route.into_edge_path(self)))
    }

    /// Finds a route through `waypoints` in order.
    ///
    /// Each consecutive pair is connected by its own search and the legs are
    /// joined at the waypoints. A single waypoint gives an empty route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPath`] if `waypoints` is empty or a consecutive pair
    /// cannot be connected, and [`Error::VertexNotFound`] if a waypoint is not
    /// in the graph.
    fn find_route_over_waypoints<'a>(&'a self, waypoints: &'a [V]) -> Result<Route<'a, V>>
    where
        V: PartialEq + fmt::Debug,
    {
        let Some((first, rest)) = waypoints.split_first() else {
            return Err(Error::NoPath {
                message: "no waypoints given".to_string(),
            });
        };
        if let Some(missing) = waypoints.iter().find(|v| !self.contains_vertex(v)) {
            return Err(Error::vertex_not_found(missing));
        }

        let mut route = Route::empty(first);
        for (leg, target) in rest.iter().enumerate() {
            let from = route.goal();
            let Some(next) = self.find_route(from, &mut |vertex| vertex == target)? else {
                tracing::debug!(leg, "waypoint leg cannot be connected");
                return Err(Error::NoPath {
                    message: format!("{from:?} cannot reach waypoint {target:?}"),
                });
            };
            route.append(next);
        }
        Ok(route)
    }

    /// Finds a vertex path through `waypoints` in order.
    ///
    /// # Errors
    ///
    /// See [`find_route_over_waypoints`](PathFinder::find_route_over_waypoints).
    fn find_vertex_path_over_waypoints(&self, waypoints: &[V]) -> Result<CostedPath<VertexPath<V>>>
    where
        V: Clone + PartialEq + fmt::Debug,
    {
        Ok(self.find_route_over_waypoints(waypoints)?.into_vertex_path())
    }

    /// Finds an edge path through `waypoints` in order.
    ///
    /// # Errors
    ///
    /// See [`find_route_over_waypoints`](PathFinder::find_route_over_waypoints).
    fn find_edge_path_over_waypoints(&self, waypoints: &[V]) -> Result<CostedPath<EdgePath<A>>>
    where
        V: PartialEq + fmt::Debug,
        A: Clone,
    {
        Ok(self
            .find_route_over_waypoints(waypoints)?
            .into_edge_path(self))
    }
}
