use std::iter::FusedIterator;

/// Depth-first traversal driven by a neighbour function and a visited
/// predicate.
///
/// The traversal is iterative: pending vertices live on an explicit stack, so
/// its depth is bounded by heap memory rather than the call stack. Neighbours
/// are marked when they are pushed and pushed in reverse, which makes the
/// first neighbour the next one yielded.
///
/// # Type Parameters
///
/// * `V` - Vertex type yielded by the traversal
/// * `N` - Neighbour function, `FnMut(&V) -> impl IntoIterator<Item = V>`
/// * `P` - Visited predicate, `FnMut(&V) -> bool`, returning `true` only the
///   first time it sees a vertex
///
/// # Examples
///
/// ```rust
/// use digraph::traversal::{hash_visitor, DepthFirst};
///
/// let adjacency = [vec![1, 2], vec![3], vec![3], vec![]];
/// let order: Vec<usize> =
///     DepthFirst::new(0, |v: &usize| adjacency[*v].clone(), hash_visitor()).collect();
/// assert_eq!(order, vec![0, 1, 3, 2]);
/// ```
pub struct DepthFirst<V, N, P> {
    stack: Vec<V>,
    scratch: Vec<V>,
    next_nodes: N,
    visit: P,
}

impl<V, N, I, P> DepthFirst<V, N, P>
where
    N: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
    P: FnMut(&V) -> bool,
{
    /// Starts a traversal at `root`. The traversal is empty if the predicate
    /// reports the root as already visited.
    pub fn new(root: V, next_nodes: N, mut visit: P) -> Self {
        let mut stack = Vec::new();
        if visit(&root) {
            stack.push(root);
        }
        DepthFirst {
            stack,
            scratch: Vec::new(),
            next_nodes,
            visit,
        }
    }

    /// Returns the number of vertices discovered but not yet yielded.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.stack.len()
    }
}

impl<V, N, I, P> Iterator for DepthFirst<V, N, P>
where
    N: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
    P: FnMut(&V) -> bool,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let vertex = self.stack.pop()?;

        let visit = &mut self.visit;
        self.scratch
            .extend((self.next_nodes)(&vertex).into_iter().filter(|next| visit(next)));
        self.stack.extend(self.scratch.drain(..).rev());

        Some(vertex)
    }
}

impl<V, N, I, P> FusedIterator for DepthFirst<V, N, P>
where
    N: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
    P: FnMut(&V) -> bool,
{
}
