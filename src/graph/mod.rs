//! Graph representations and capability traits.
//!
//! This module holds everything that stores a graph. The algorithm modules
//! ([`crate::traversal`], [`crate::path`], [`crate::algorithms`]) only see the
//! capability traits defined here.
//!
//! # Architecture
//!
//! - **Traits**: [`DirectedGraph`], [`BidiGraph`] and [`IndexedGraph`] for
//!   object-keyed graphs; [`IntDirectedGraph`], [`IntBidiGraph`] and
//!   [`IntAttributedDirectedGraph`] for graphs over dense [`VertexId`]s
//! - **Mutable builders**: [`DirectedGraphBuilder`] and [`BidiGraphBuilder`]
//!   for typed vertices, [`IntGraphBuilder`] for dense ids
//! - **Compiled graphs**: [`ImmutableDirectedGraph`],
//!   [`ImmutableAttributedIntDirectedGraph`] and [`ImmutableIntBidiGraph`],
//!   flat read-only snapshots with O(1) neighbour access
//! - **Values**: [`Pair`], [`UnorderedPair`], [`VertexPath`], [`EdgePath`] and
//!   [`CostedPath`]
//!
//! # Design Principles
//!
//! ## Build, Then Compile
//!
//! Builders are filled vertex first, then arrow by arrow, and may be edited
//! freely. Once the structure is final it can be compiled into an immutable
//! snapshot whose adjacency lives in a handful of flat vectors. Compiled graphs
//! have no mutation API; editing means going back through `to_builder`.
//!
//! ## Positional Arrow Identity
//!
//! Multiple arrows between the same two vertices are allowed. An arrow is
//! identified by its slot in the tail's outgoing list, not by its endpoints.
//!
//! ## Thread Safety
//!
//! No type here synchronizes internally. Compiled graphs are plain data and are
//! [`Send`] and [`Sync`] whenever their vertex and arrow types are.
//!
//! # Usage Examples
//!
//! ```rust
//! use digraph::{DirectedGraph, DirectedGraphBuilder, ImmutableDirectedGraph};
//!
//! // Diamond: A -> B, A -> C, B -> D, C -> D
//! let mut builder: DirectedGraphBuilder<&str, &str> = DirectedGraphBuilder::new();
//! for v in ["A", "B", "C", "D"] {
//!     builder.add_vertex(v);
//! }
//! builder.add_arrow("A", "B", "A->B")?;
//! builder.add_arrow("A", "C", "A->C")?;
//! builder.add_arrow("B", "D", "B->D")?;
//! builder.add_arrow("C", "D", "C->D")?;
//!
//! let graph = ImmutableDirectedGraph::from(&builder);
//! assert_eq!(graph.vertex_count(), 4);
//! assert_eq!(graph.arrow_count(), 4);
//! # Ok::<(), digraph::Error>(())
//! ```

mod bidi_builder;
mod builder;
pub(crate) mod csr;
mod immutable;
mod int_builder;
mod pair;
mod path;
mod traits;
mod vertex;

pub use bidi_builder::BidiGraphBuilder;
pub use builder::DirectedGraphBuilder;
pub use immutable::{ImmutableAttributedIntDirectedGraph, ImmutableDirectedGraph, ImmutableIntBidiGraph};
pub use int_builder::IntGraphBuilder;
pub use pair::{Pair, UnorderedPair};
pub use path::{CostedPath, EdgePath, VertexPath};
pub use traits::{
    BidiGraph, DirectedGraph, IndexedGraph, IntAttributedDirectedGraph, IntBidiGraph,
    IntDirectedGraph,
};
pub use vertex::VertexId;
