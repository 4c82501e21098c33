//! Strongly connected components using Tarjan's algorithm.
//!
//! A strongly connected component is a maximal set of vertices such that
//! there is a path from every vertex to every other vertex in the set.
//!
//! The depth-first search at the heart of Tarjan's algorithm runs on an
//! explicit stack of frames. Each frame holds a vertex, the iterator over its
//! remaining neighbours and its running low-link, so graphs with paths
//! millions of vertices long are processed without touching the call stack.

use std::{collections::HashSet, hash::Hash};

use crate::{
    graph::{csr::IndexedView, DirectedGraph, IntDirectedGraph, VertexId},
    utils::BitSet,
    Result,
};

const UNVISITED: usize = usize::MAX;

/// One suspended level of the depth-first search.
struct Frame<I> {
    vertex: VertexId,
    heads: I,
    low_link: usize,
}

/// Discovery indices and the component stack.
struct Discovery {
    index: Vec<usize>,
    on_stack: BitSet,
    stack: Vec<VertexId>,
    next_index: usize,
}

impl Discovery {
    fn new(vertex_count: usize) -> Self {
        Discovery {
            index: vec![UNVISITED; vertex_count],
            on_stack: BitSet::new(vertex_count),
            stack: Vec::new(),
            next_index: 0,
        }
    }

    fn is_visited(&self, vertex: VertexId) -> bool {
        self.index[vertex.index()] != UNVISITED
    }

    /// Assigns the next discovery index to `vertex` and pushes it on the
    /// component stack.
    fn enter(&mut self, vertex: VertexId) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        self.index[vertex.index()] = index;
        self.stack.push(vertex);
        self.on_stack.insert(vertex.index());
        index
    }

    /// Pops the component rooted at `root` off the stack.
    fn pop_component(&mut self, root: VertexId) -> Vec<VertexId> {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack.remove(member.index());
            component.push(member);
            if member == root {
                break;
            }
        }
        component
    }
}

/// Computes the strongly connected components of an integer graph.
///
/// Components are returned in **reverse topological order**: if an arrow
/// leads from component `X` to a different component `Y`, then `Y` appears
/// before `X`. Every vertex belongs to exactly one component; a vertex on no
/// cycle forms a component of its own.
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V)
///
/// # Examples
///
/// ```rust
/// use digraph::{algorithms::int_strongly_connected_components, IntGraphBuilder, VertexId};
///
/// // 0 -> 1 -> 2 -> 0, 2 -> 3
/// let mut builder: IntGraphBuilder = IntGraphBuilder::new();
/// builder.add_vertices(4);
/// let v = VertexId::new;
/// builder.add_arrow(v(0), v(1), ())?;
/// builder.add_arrow(v(1), v(2), ())?;
/// builder.add_arrow(v(2), v(0), ())?;
/// builder.add_arrow(v(2), v(3), ())?;
///
/// let sccs = int_strongly_connected_components(&builder);
/// assert_eq!(sccs.len(), 2);
/// assert_eq!(sccs[0], vec![v(3)]);
/// assert_eq!(sccs[1].len(), 3);
/// # Ok::<(), digraph::Error>(())
/// ```
pub fn int_strongly_connected_components<G: IntDirectedGraph>(graph: &G) -> Vec<Vec<VertexId>> {
    let vertex_count = graph.vertex_count();
    let mut discovery = Discovery::new(vertex_count);
    let mut frames = Vec::new();
    let mut components = Vec::new();

    for root in graph.vertex_ids() {
        if discovery.is_visited(root) {
            continue;
        }
        frames.push(Frame {
            vertex: root,
            heads: graph.next_vertices(root),
            low_link: discovery.enter(root),
        });

        while let Some(frame) = frames.last_mut() {
            if let Some(head) = frame.heads.next() {
                if !discovery.is_visited(head) {
                    let low_link = discovery.enter(head);
                    frames.push(Frame {
                        vertex: head,
                        heads: graph.next_vertices(head),
                        low_link,
                    });
                } else if discovery.on_stack.contains(head.index()) {
                    frame.low_link = frame.low_link.min(discovery.index[head.index()]);
                }
                continue;
            }

            let (vertex, low_link) = (frame.vertex, frame.low_link);
            frames.pop();
            if let Some(parent) = frames.last_mut() {
                parent.low_link = parent.low_link.min(low_link);
            }
            if low_link == discovery.index[vertex.index()] {
                components.push(discovery.pop_component(vertex));
            }
        }
    }

    tracing::debug!(
        vertices = vertex_count,
        components = components.len(),
        "strongly connected components computed"
    );
    components
}

/// Computes the strongly connected components of an object graph.
///
/// See [`int_strongly_connected_components`] for the ordering guarantees.
///
/// # Errors
///
/// Returns [`crate::Error::GraphError`] if the graph reports an arrow whose
/// head is not one of its vertices.
pub fn strongly_connected_components<G>(graph: &G) -> Result<Vec<Vec<&G::Vertex>>>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq,
{
    let view = IndexedView::new(graph)?;
    Ok(int_strongly_connected_components(&view)
        .into_iter()
        .map(|component| component.into_iter().map(|id| view.vertex(id)).collect())
        .collect())
}

/// Returns the condensation of `graph`: every component collapsed to a single
/// vertex.
///
/// `sccs` must be the components of `graph`, as returned by
/// [`int_strongly_connected_components`]. The result holds the component index
/// of every vertex and the distinct arrows between different components, in
/// the order they are first seen. The condensation is always acyclic.
///
/// # Panics
///
/// Panics if a vertex listed in `sccs` is not a vertex of `graph`.
pub fn condensation<G>(graph: &G, sccs: &[Vec<VertexId>]) -> (Vec<usize>, Vec<(usize, usize)>)
where
    G: IntDirectedGraph,
{
    let mut component_of = vec![0; graph.vertex_count()];
    for (component, members) in sccs.iter().enumerate() {
        for member in members {
            component_of[member.index()] = component;
        }
    }

    let mut arrows = Vec::new();
    let mut seen = HashSet::new();
    for tail in graph.vertex_ids() {
        let from = component_of[tail.index()];
        for head in graph.next_vertices(tail) {
            let to = component_of[head.index()];
            if from != to && seen.insert((from, to)) {
                arrows.push((from, to));
            }
        }
    }

    (component_of, arrows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{DirectedGraphBuilder, ImmutableIntBidiGraph, IntGraphBuilder},
        test::create_two_cycles,
    };

    fn v(index: usize) -> VertexId {
        VertexId::new(index)
    }

    fn sorted(mut component: Vec<VertexId>) -> Vec<usize> {
        component.sort();
        component.into_iter().map(VertexId::index).collect()
    }

    fn create_graph(vertex_count: usize, arrows: &[(usize, usize)]) -> IntGraphBuilder {
        let mut builder = IntGraphBuilder::new();
        builder.add_vertices(vertex_count);
        for &(tail, head) in arrows {
            builder.add_arrow(v(tail), v(head), ()).unwrap();
        }
        builder
    }

    #[test]
    fn test_scc_empty_graph() {
        let graph: IntGraphBuilder = IntGraphBuilder::new();
        assert!(int_strongly_connected_components(&graph).is_empty());
    }

    #[test]
    fn test_scc_single_vertex_self_loop() {
        let graph = create_graph(1, &[(0, 0)]);
        assert_eq!(int_strongly_connected_components(&graph), vec![vec![v(0)]]);
    }

    #[test]
    fn test_scc_linear_chain() {
        let graph = create_graph(3, &[(0, 1), (1, 2)]);
        let sccs = int_strongly_connected_components(&graph);
        // Reverse topological order: 2, 1, 0
        assert_eq!(sccs, vec![vec![v(2)], vec![v(1)], vec![v(0)]]);
    }

    #[test]
    fn test_scc_two_cycles_joined() {
        let graph = create_two_cycles();
        let sccs = int_strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 2);
        // The downstream cycle completes first
        assert_eq!(sorted(sccs[0].clone()), vec![3, 4, 5]);
        assert_eq!(sorted(sccs[1].clone()), vec![0, 1, 2]);

        let compiled = ImmutableIntBidiGraph::from(&graph);
        assert_eq!(int_strongly_connected_components(&compiled), sccs);
    }

    #[test]
    fn test_scc_figure_eight() {
        // Two cycles sharing vertex 0: 0 -> 1 -> 0 and 0 -> 2 -> 0
        let graph = create_graph(3, &[(0, 1), (1, 0), (0, 2), (2, 0)]);
        let sccs = int_strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sorted(sccs[0].clone()), vec![0, 1, 2]);
    }

    #[test]
    fn test_scc_diamond_no_cycle() {
        let graph = create_graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let sccs = int_strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 4);
        assert_eq!(sccs[0], vec![v(3)]);
        assert_eq!(sccs[3], vec![v(0)]);
    }

    #[test]
    fn test_scc_deep_cycle_does_not_overflow() {
        let n = 100_000;
        let arrows: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let graph = create_graph(n, &arrows);
        let sccs = int_strongly_connected_components(&graph);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), n);
    }

    #[test]
    fn test_scc_object_graph() {
        let mut graph: DirectedGraphBuilder<&str, ()> = DirectedGraphBuilder::new();
        for name in ["a", "b", "c", "d"] {
            graph.add_vertex(name);
        }
        graph.add_arrow("a", "b", ()).unwrap();
        graph.add_arrow("b", "a", ()).unwrap();
        graph.add_arrow("c", "d", ()).unwrap();

        let sccs = strongly_connected_components(&graph).unwrap();
        assert_eq!(sccs.len(), 3);
        let mut pair = sccs[0].clone();
        pair.sort();
        assert_eq!(pair, vec![&"a", &"b"]);
        assert_eq!(sccs[1], vec![&"d"]);
        assert_eq!(sccs[2], vec![&"c"]);
    }

    #[test]
    fn test_condensation() {
        let graph = create_two_cycles();
        let sccs = int_strongly_connected_components(&graph);
        let (component_of, arrows) = condensation(&graph, &sccs);

        assert_eq!(component_of[0], component_of[1]);
        assert_eq!(component_of[0], component_of[2]);
        assert_eq!(component_of[3], component_of[5]);
        assert_ne!(component_of[0], component_of[3]);
        assert_eq!(arrows, vec![(component_of[2], component_of[3])]);
    }

    #[test]
    fn test_condensation_no_arrows() {
        let graph = create_graph(3, &[]);
        let sccs = int_strongly_connected_components(&graph);
        let (component_of, arrows) = condensation(&graph, &sccs);
        assert_eq!(sccs.len(), 3);
        assert_eq!(component_of.len(), 3);
        assert!(arrows.is_empty());
    }
}
