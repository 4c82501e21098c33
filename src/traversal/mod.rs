//! Lazy breadth-first and depth-first traversal.
//!
//! This module provides the two traversal iterators, [`BreadthFirst`] and
//! [`DepthFirst`], and entry points that wire them to the graph traits.
//!
//! # Architecture
//!
//! A traversal is parameterized by two closures:
//!
//! - **Neighbours**: `FnMut(&V) -> impl IntoIterator<Item = V>`, which gives
//!   the vertices one step away. Forward traversals use the `next` side of a
//!   graph, backward traversals the `prev` side of a bidi graph.
//! - **Visited**: `FnMut(&V) -> bool`, which marks a vertex and reports
//!   whether it was unvisited. [`hash_visitor`] is the general-purpose choice;
//!   [`BitSet::visitor`](crate::utils::BitSet::visitor) marks dense integer
//!   vertices without hashing.
//!
//! Both iterators are single pass and lazy. Dropping one mid-traversal simply
//! discards its frontier.
//!
//! # Determinism
//!
//! Every graph in this crate reports neighbours in slot order, so traversal
//! order depends only on the graph and the root.
//!
//! # Examples
//!
//! ```rust
//! use digraph::{traversal, DirectedGraphBuilder};
//!
//! let mut builder: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
//! for v in ["A", "B", "C", "D"] {
//!     builder.add_vertex(v);
//! }
//! builder.add_arrow("A", "B", ())?;
//! builder.add_arrow("A", "C", ())?;
//! builder.add_arrow("B", "D", ())?;
//!
//! let bfs: Vec<&&str> = traversal::breadth_first(&builder, &"A").collect();
//! assert_eq!(bfs, vec![&"A", &"B", &"C", &"D"]);
//!
//! let dfs: Vec<&&str> = traversal::depth_first(&builder, &"A").collect();
//! assert_eq!(dfs, vec![&"A", &"B", &"D", &"C"]);
//! # Ok::<(), digraph::Error>(())
//! ```

mod breadth_first;
mod depth_first;

use std::{collections::HashSet, hash::Hash};

pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;

use crate::{
    graph::{BidiGraph, DirectedGraph, IntBidiGraph, IntDirectedGraph, VertexId},
    utils::BitSet,
};

/// Returns a visited predicate backed by a [`HashSet`].
///
/// The predicate clones each vertex it has not seen before into the set.
pub fn hash_visitor<V>() -> impl FnMut(&V) -> bool
where
    V: Hash + Eq + Clone,
{
    let mut seen = HashSet::new();
    move |vertex: &V| {
        if seen.contains(vertex) {
            false
        } else {
            seen.insert(vertex.clone());
            true
        }
    }
}

/// Breadth-first traversal of `graph` along outgoing arrows.
///
/// # Panics
///
/// Panics during iteration if `root` is not a vertex of `graph`.
pub fn breadth_first<'g, G>(graph: &'g G, root: &'g G::Vertex) -> impl Iterator<Item = &'g G::Vertex>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq,
{
    BreadthFirst::new(
        root,
        move |vertex: &&'g G::Vertex| graph.next_vertices(*vertex),
        hash_visitor(),
    )
}

/// Depth-first traversal of `graph` along outgoing arrows.
///
/// # Panics
///
/// Panics during iteration if `root` is not a vertex of `graph`.
pub fn depth_first<'g, G>(graph: &'g G, root: &'g G::Vertex) -> impl Iterator<Item = &'g G::Vertex>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq,
{
    DepthFirst::new(
        root,
        move |vertex: &&'g G::Vertex| graph.next_vertices(*vertex),
        hash_visitor(),
    )
}

/// Breadth-first traversal of `graph` against the arrow direction.
pub fn breadth_first_backward<'g, G>(
    graph: &'g G,
    root: &'g G::Vertex,
) -> impl Iterator<Item = &'g G::Vertex>
where
    G: BidiGraph,
    G::Vertex: Hash + Eq,
{
    BreadthFirst::new(
        root,
        move |vertex: &&'g G::Vertex| graph.prev_vertices(*vertex),
        hash_visitor(),
    )
}

/// Depth-first traversal of `graph` against the arrow direction.
pub fn depth_first_backward<'g, G>(
    graph: &'g G,
    root: &'g G::Vertex,
) -> impl Iterator<Item = &'g G::Vertex>
where
    G: BidiGraph,
    G::Vertex: Hash + Eq,
{
    DepthFirst::new(
        root,
        move |vertex: &&'g G::Vertex| graph.prev_vertices(*vertex),
        hash_visitor(),
    )
}

/// Breadth-first traversal of an integer graph with bit set marking.
///
/// # Panics
///
/// Panics if `root` is not below the vertex count.
pub fn int_breadth_first<G: IntDirectedGraph>(
    graph: &G,
    root: VertexId,
) -> impl Iterator<Item = VertexId> + '_ {
    BreadthFirst::new(
        root,
        move |vertex: &VertexId| graph.next_vertices(*vertex),
        BitSet::new(graph.vertex_count()).into_visitor(),
    )
}

/// Depth-first traversal of an integer graph with bit set marking.
///
/// # Panics
///
/// Panics if `root` is not below the vertex count.
pub fn int_depth_first<G: IntDirectedGraph>(
    graph: &G,
    root: VertexId,
) -> impl Iterator<Item = VertexId> + '_ {
    DepthFirst::new(
        root,
        move |vertex: &VertexId| graph.next_vertices(*vertex),
        BitSet::new(graph.vertex_count()).into_visitor(),
    )
}

/// Breadth-first traversal of an integer graph against the arrow direction.
pub fn int_breadth_first_backward<G: IntBidiGraph>(
    graph: &G,
    root: VertexId,
) -> impl Iterator<Item = VertexId> + '_ {
    BreadthFirst::new(
        root,
        move |vertex: &VertexId| graph.prev_vertices(*vertex),
        BitSet::new(graph.vertex_count()).into_visitor(),
    )
}

/// Depth-first traversal of an integer graph against the arrow direction.
pub fn int_depth_first_backward<G: IntBidiGraph>(
    graph: &G,
    root: VertexId,
) -> impl Iterator<Item = VertexId> + '_ {
    DepthFirst::new(
        root,
        move |vertex: &VertexId| graph.prev_vertices(*vertex),
        BitSet::new(graph.vertex_count()).into_visitor(),
    )
}

/// Collects every vertex reachable from `root`, in breadth-first order.
///
/// # Examples
///
/// ```rust
/// use digraph::{traversal::reachable_vertices, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<u8, ()> = DirectedGraphBuilder::new();
/// for v in 0..4 {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow(0, 1, ())?;
/// builder.add_arrow(2, 3, ())?;
///
/// assert_eq!(reachable_vertices(&builder, &0), vec![&0, &1]);
/// # Ok::<(), digraph::Error>(())
/// ```
pub fn reachable_vertices<'g, G>(graph: &'g G, root: &'g G::Vertex) -> Vec<&'g G::Vertex>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq,
{
    breadth_first(graph, root).collect()
}
