//! # digraph Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! of the digraph library. Import it to get the graph traits into scope together with
//! the builders, snapshots and path finders.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all digraph operations
pub use crate::Error;

/// The result type used throughout digraph
pub use crate::Result;

// ================================================================================================
// Capability Traits
// ================================================================================================

/// Object graph traits
pub use crate::graph::{BidiGraph, DirectedGraph, IndexedGraph};

/// Integer graph traits
pub use crate::graph::{IntAttributedDirectedGraph, IntBidiGraph, IntDirectedGraph};

// ================================================================================================
// Graphs
// ================================================================================================

/// Mutable builders
pub use crate::graph::{BidiGraphBuilder, DirectedGraphBuilder, IntGraphBuilder};

/// Compiled snapshots
pub use crate::graph::{
    ImmutableAttributedIntDirectedGraph, ImmutableDirectedGraph, ImmutableIntBidiGraph,
};

/// Vertex identifiers and pairs
pub use crate::graph::{Pair, UnorderedPair, VertexId};

// ================================================================================================
// Searching
// ================================================================================================

/// Search results
pub use crate::graph::{CostedPath, EdgePath, VertexPath};

/// Path finders
pub use crate::path::{AnyPathFinder, PathFinder, Route, SearchContext, ShortestPathFinder};

/// Traversal iterators
pub use crate::traversal::{BreadthFirst, DepthFirst};

// ================================================================================================
// Analysis
// ================================================================================================

/// Disjoint sets for union-find style grouping
pub use crate::algorithms::DisjointSets;

/// Dense bit set used for visited marking
pub use crate::utils::BitSet;
