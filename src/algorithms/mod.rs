//! Graph analysis algorithms.
//!
//! # Available Algorithms
//!
//! ## Topological Ordering
//!
//! - [`int_topological_sort`] / [`topological_sort`] - Kahn's algorithm, `None` on cycles
//! - [`int_topological_sort_breaking_cycles`] / [`topological_sort_breaking_cycles`] -
//!   Kahn's algorithm that forces a reproducible pick when only cycles remain
//!
//! ## Strongly Connected Components
//!
//! - [`int_strongly_connected_components`] / [`strongly_connected_components`] -
//!   Tarjan's algorithm on an explicit frame stack
//! - [`condensation`] - Collapses every component into a single vertex
//!
//! ## Disjoint Sets
//!
//! - [`DisjointSets`] - Union of member lists, smaller merged into larger
//! - [`minimum_spanning_forest`] - Kruskal's algorithm
//! - [`disjoint_vertex_sets`] - Weakly connected components
//!
//! # Algorithm Selection
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | Topological Sort | O(V + E) | Dependency ordering, layering |
//! | SCC | O(V + E) | Cycle groups, condensation into a DAG |
//! | Spanning Forest | O(E log E) | Cheapest connecting arrow set |
//!
//! The object graph variants index the graph once (O(V + E)) and then run the
//! integer algorithm.
//!
//! # Examples
//!
//! ```rust
//! use digraph::{algorithms, DirectedGraphBuilder};
//!
//! let mut builder: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
//! for v in ["parse", "check", "emit"] {
//!     builder.add_vertex(v);
//! }
//! builder.add_arrow("check", "emit", ())?;
//! builder.add_arrow("parse", "check", ())?;
//!
//! let order = algorithms::topological_sort(&builder)?.unwrap();
//! assert_eq!(order, vec![&"parse", &"check", &"emit"]);
//!
//! let sccs = algorithms::strongly_connected_components(&builder)?;
//! assert_eq!(sccs.len(), 3);
//! # Ok::<(), digraph::Error>(())
//! ```

mod disjoint;
mod scc;
mod topological;

pub use disjoint::{disjoint_vertex_sets, minimum_spanning_forest, DisjointSets, SpanningForest};
pub use scc::{condensation, int_strongly_connected_components, strongly_connected_components};
pub use topological::{
    int_topological_sort, int_topological_sort_breaking_cycles, topological_sort,
    topological_sort_breaking_cycles,
};
