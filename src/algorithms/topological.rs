//! Topological ordering using Kahn's algorithm.
//!
//! Two flavours are provided:
//!
//! - [`int_topological_sort`] / [`topological_sort`] are strict and return
//!   `None` when the graph has a cycle
//! - [`int_topological_sort_breaking_cycles`] /
//!   [`topological_sort_breaking_cycles`] always place every vertex. When the
//!   ready queue runs dry before all vertices are placed, one of the remaining
//!   vertices is picked by a fixed-seed pseudo-random generator, treated as
//!   if it had no incoming arrows, and the sort resumes
//!
//! The fallback is lossy: arrows into a forced vertex from vertices placed
//! after it are violated. Callers that need a strict DAG check should use the
//! strict flavour. The pick sequence is reproducible, so the same graph always
//! yields the same order.
//!
//! Ties between ready vertices are broken by vertex order, giving a
//! deterministic result for every graph.

use std::{collections::VecDeque, hash::Hash};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    graph::{csr::IndexedView, DirectedGraph, IntDirectedGraph, VertexId},
    utils::BitSet,
    Result,
};

/// Seed of the generator that picks the vertex forced into the order when the
/// remaining vertices all lie on cycles.
const CYCLE_BREAK_SEED: u64 = 0x5EED_CAFE;

/// Kahn's algorithm state shared by the strict and the cycle-breaking sorts.
struct Kahn {
    in_degree: Vec<usize>,
    queued: BitSet,
    ready: VecDeque<VertexId>,
    order: Vec<VertexId>,
}

impl Kahn {
    fn new<G: IntDirectedGraph>(graph: &G) -> Self {
        let count = graph.vertex_count();
        let mut in_degree = vec![0usize; count];
        for vertex in graph.vertex_ids() {
            for head in graph.next_vertices(vertex) {
                in_degree[head.index()] += 1;
            }
        }

        let mut kahn = Kahn {
            in_degree,
            queued: BitSet::new(count),
            ready: VecDeque::new(),
            order: Vec::with_capacity(count),
        };
        for vertex in graph.vertex_ids() {
            if kahn.in_degree[vertex.index()] == 0 {
                kahn.enqueue(vertex);
            }
        }
        kahn
    }

    fn enqueue(&mut self, vertex: VertexId) {
        if self.queued.insert(vertex.index()) {
            self.ready.push_back(vertex);
        }
    }

    /// Places every vertex that becomes ready, until the queue runs dry.
    fn drain<G: IntDirectedGraph>(&mut self, graph: &G) {
        while let Some(vertex) = self.ready.pop_front() {
            self.order.push(vertex);
            for head in graph.next_vertices(vertex) {
                if self.queued.contains(head.index()) {
                    continue;
                }
                let degree = &mut self.in_degree[head.index()];
                *degree -= 1;
                if *degree == 0 {
                    self.enqueue(head);
                }
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.order.len() == self.in_degree.len()
    }
}

/// Orders the vertices of an integer graph so that every arrow points
/// forward.
///
/// Returns `None` if the graph contains a cycle, including a self-loop.
///
/// # Examples
///
/// ```rust
/// use digraph::{algorithms::int_topological_sort, IntGraphBuilder, VertexId};
///
/// let mut builder: IntGraphBuilder = IntGraphBuilder::new();
/// builder.add_vertices(3);
/// let v = VertexId::new;
/// builder.add_arrow(v(2), v(0), ())?;
/// builder.add_arrow(v(0), v(1), ())?;
///
/// assert_eq!(int_topological_sort(&builder), Some(vec![v(2), v(0), v(1)]));
///
/// builder.add_arrow(v(1), v(2), ())?;
/// assert_eq!(int_topological_sort(&builder), None);
/// # Ok::<(), digraph::Error>(())
/// ```
pub fn int_topological_sort<G: IntDirectedGraph>(graph: &G) -> Option<Vec<VertexId>> {
    let mut kahn = Kahn::new(graph);
    kahn.drain(graph);
    kahn.is_complete().then_some(kahn.order)
}

/// Orders all vertices of an integer graph, breaking cycles when necessary.
///
/// The result always contains every vertex exactly once. For an acyclic graph
/// it equals [`int_topological_sort`]; otherwise see the
/// [module documentation](self) for how cycles are broken.
pub fn int_topological_sort_breaking_cycles<G: IntDirectedGraph>(graph: &G) -> Vec<VertexId> {
    let mut kahn = Kahn::new(graph);
    let mut rng = ChaCha8Rng::seed_from_u64(CYCLE_BREAK_SEED);
    let mut forced = 0usize;

    loop {
        kahn.drain(graph);
        if kahn.is_complete() {
            break;
        }

        let remaining: Vec<VertexId> = graph
            .vertex_ids()
            .filter(|vertex| !kahn.queued.contains(vertex.index()))
            .collect();
        let pick = remaining[rng.random_range(0..remaining.len())];
        tracing::debug!(
            vertex = pick.index(),
            remaining = remaining.len(),
            "breaking cycle in topological sort"
        );
        kahn.in_degree[pick.index()] = 0;
        kahn.enqueue(pick);
        forced += 1;
    }

    if forced > 0 {
        tracing::debug!(forced, "topological sort placed vertices on cycles");
    }
    kahn.order
}

/// Orders the vertices of an object graph so that every arrow points forward.
///
/// Returns `Ok(None)` if the graph contains a cycle.
///
/// # Errors
///
/// Returns [`crate::Error::GraphError`] if the graph reports an arrow whose
/// head is not one of its vertices.
pub fn topological_sort<G>(graph: &G) -> Result<Option<Vec<&G::Vertex>>>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq,
{
    let view = IndexedView::new(graph)?;
    Ok(int_topological_sort(&view).map(|order| order.into_iter().map(|id| view.vertex(id)).collect()))
}

/// Orders all vertices of an object graph, breaking cycles when necessary.
///
/// # Errors
///
/// Returns [`crate::Error::GraphError`] if the graph reports an arrow whose
/// head is not one of its vertices.
///
/// # Examples
///
/// ```rust
/// use digraph::{algorithms::topological_sort_breaking_cycles, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
/// for v in ["a", "b", "c"] {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow("a", "b", ())?;
/// builder.add_arrow("b", "a", ())?;
/// builder.add_arrow("b", "c", ())?;
///
/// let order = topological_sort_breaking_cycles(&builder)?;
/// assert_eq!(order.len(), 3);
/// # Ok::<(), digraph::Error>(())
/// ```
pub fn topological_sort_breaking_cycles<G>(graph: &G) -> Result<Vec<&G::Vertex>>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq,
{
    let view = IndexedView::new(graph)?;
    Ok(int_topological_sort_breaking_cycles(&view)
        .into_iter()
        .map(|id| view.vertex(id))
        .collect())
}
