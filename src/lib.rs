// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # digraph
//!
//! [![Crates.io](https://img.shields.io/crates/v/digraph.svg)](https://crates.io/crates/digraph)
//! [![Documentation](https://docs.rs/digraph/badge.svg)](https://docs.rs/digraph)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](LICENSE-APACHE)
//!
//! Generic directed graphs: mutable builders, compiled immutable snapshots and
//! a family of classical graph algorithms that run on either.
//!
//! ## Features
//!
//! - **Two vertex models** - object graphs keyed by any hashable value, and
//!   integer graphs over dense [`VertexId`]s
//! - **Builders and snapshots** - build and edit a graph, then compile it into
//!   a compressed sparse row snapshot with O(1) neighbour access
//! - **Lazy traversal** - breadth-first and depth-first iterators that explore
//!   only as far as they are driven
//! - **Path finding** - fewest-arrow and cheapest paths, goal predicates,
//!   waypoint routes
//! - **Analysis** - topological sort, strongly connected components, disjoint
//!   sets and minimum spanning forests
//! - **No recursion** - every depth-first algorithm runs on an explicit stack
//!
//! ## Quick Start
//!
//! ```rust
//! use digraph::prelude::*;
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
//! // Compile once, query many times
//! let graph = ImmutableDirectedGraph::from(&builder);
//!
//! let finder = ShortestPathFinder::new(&graph, |_, _, cost: &f64| *cost);
//! let found = finder.find_edge_path(&"A", &"D")?.unwrap();
//! assert_eq!(found.path.as_slice(), &[1.0, 2.0, 1.0]);
//! assert_eq!(found.cost, 4.0);
//! # Ok::<(), digraph::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`graph`] - Capability traits, builders, compiled snapshots and path types
//! - [`traversal`] - Lazy breadth-first and depth-first iterators
//! - [`path`] - Any-path and shortest-path search, waypoint routes
//! - [`algorithms`] - Topological sort, SCC, disjoint sets
//! - [`utils`] - Supporting data structures such as [`utils::BitSet`]
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`Error`] and [`Result`] - Error handling
//!
//! Algorithms are written against the capability traits in [`graph`], so the
//! same code runs on builders and on snapshots. Graphs that keep a dense vertex
//! table advertise it through [`DirectedGraph::as_indexed`], and the path
//! finders use it to swap their hash maps for flat arrays.
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`](Result). Three outcomes are
//! kept apart:
//!
//! ```rust
//! use digraph::{path::{AnyPathFinder, PathFinder}, DirectedGraphBuilder, Error};
//!
//! let mut builder: DirectedGraphBuilder<u8, ()> = DirectedGraphBuilder::new();
//! builder.add_vertex(1);
//! builder.add_vertex(2);
//! let finder = AnyPathFinder::new(&builder);
//!
//! // Searched correctly, nothing there
//! assert_eq!(finder.find_vertex_path(&1, &2)?, None);
//! // Misuse: the vertex was never added
//! assert!(matches!(finder.find_vertex_path(&1, &9), Err(Error::VertexNotFound(_))));
//! // Waypoint routes must connect every leg
//! assert!(matches!(finder.find_vertex_path_over_waypoints(&[1, 2]), Err(Error::NoPath { .. })));
//! # Ok::<(), digraph::Error>(())
//! ```
//!
//! Query methods on the graph traits take vertices and slots that are expected
//! to exist and panic otherwise; their documentation lists the conditions.
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events at `debug` and
//! `trace` level (graph compilation, vertex removal, cycle breaking, search
//! exhaustion). It never installs a subscriber.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use digraph::prelude::*;
///
/// let mut builder: IntGraphBuilder = IntGraphBuilder::new();
/// let a = builder.add_vertex();
/// let b = builder.add_vertex();
/// builder.add_arrow(a, b, ())?;
/// assert_eq!(builder.next_count(a), 1);
/// # Ok::<(), digraph::Error>(())
/// ```
pub mod prelude;

/// Graph data structures and the capability traits algorithms are written against.
///
/// # Key Types
///
/// - [`DirectedGraphBuilder`], [`BidiGraphBuilder`] and [`IntGraphBuilder`] - mutable graphs
/// - [`ImmutableDirectedGraph`], [`ImmutableAttributedIntDirectedGraph`] and
///   [`ImmutableIntBidiGraph`] - compiled snapshots
/// - [`VertexPath`], [`EdgePath`] and [`CostedPath`] - search results
pub mod graph;

/// Lazy breadth-first and depth-first traversal.
pub mod traversal;

/// Path finding: fewest arrows, cheapest cost and waypoint routes.
pub mod path;

/// Topological sort, strongly connected components and disjoint sets.
pub mod algorithms;

/// Supporting data structures.
pub mod utils;

/// `digraph` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use digraph::{DirectedGraph, DirectedGraphBuilder, Result};
///
/// fn chain(names: &[&'static str]) -> Result<DirectedGraphBuilder<&'static str, ()>> {
///     let mut builder = DirectedGraphBuilder::new();
///     for name in names {
///         builder.add_vertex(*name);
///     }
///     for pair in names.windows(2) {
///         builder.add_arrow(pair[0], pair[1], ())?;
///     }
///     Ok(builder)
/// }
/// # assert_eq!(chain(&["a", "b", "c"]).unwrap().arrow_count(), 2);
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `digraph` Error type
///
/// The main error type for all fallible operations in this crate.
pub use error::Error;

/// Capability traits implemented by every graph in this crate.
pub use graph::{
    BidiGraph, DirectedGraph, IndexedGraph, IntAttributedDirectedGraph, IntBidiGraph,
    IntDirectedGraph,
};

/// Mutable graph builders.
pub use graph::{BidiGraphBuilder, DirectedGraphBuilder, IntGraphBuilder};

/// Compiled, immutable graph snapshots.
pub use graph::{ImmutableAttributedIntDirectedGraph, ImmutableDirectedGraph, ImmutableIntBidiGraph};

/// Vertex identifiers, vertex pairs and search results.
pub use graph::{CostedPath, EdgePath, Pair, UnorderedPair, VertexId, VertexPath};
