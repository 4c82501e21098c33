use std::{collections::VecDeque, iter::FusedIterator};

/// Breadth-first traversal driven by a neighbour function and a visited
/// predicate.
///
/// The traversal visits each vertex reachable from the root exactly once,
/// exploring all vertices at distance `d` before any vertex at distance
/// `d + 1`. It is lazy: nothing past the last yielded vertex is explored, and
/// dropping the iterator abandons the frontier.
///
/// # Type Parameters
///
/// * `V` - Vertex type yielded by the traversal
/// * `N` - Neighbour function, `FnMut(&V) -> impl IntoIterator<Item = V>`
/// * `P` - Visited predicate, `FnMut(&V) -> bool`. It must mark the vertex and
///   return `true` only the first time it is called for that vertex
///
/// # Examples
///
/// ```rust
/// use digraph::traversal::{hash_visitor, BreadthFirst};
///
/// // Implicit graph: n -> 2n, n -> 2n + 1, bounded at 7
/// let next = |n: &u32| [2 * n, 2 * n + 1].into_iter().filter(|m| *m <= 7);
/// let order: Vec<u32> = BreadthFirst::new(1, next, hash_visitor()).collect();
/// assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 7]);
/// ```
pub struct BreadthFirst<V, N, P> {
    queue: VecDeque<V>,
    next_nodes: N,
    visit: P,
}

impl<V, N, I, P> BreadthFirst<V, N, P>
where
    N: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
    P: FnMut(&V) -> bool,
{
    /// Starts a traversal at `root`.
    ///
    /// The root is marked immediately. If the predicate reports it as already
    /// visited the traversal is empty.
    pub fn new(root: V, next_nodes: N, mut visit: P) -> Self {
        let mut queue = VecDeque::new();
        if visit(&root) {
            queue.push_back(root);
        }
        BreadthFirst {
            queue,
            next_nodes,
            visit,
        }
    }

    /// Returns the number of vertices discovered but not yet yielded.
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.queue.len()
    }
}

impl<V, N, I, P> Iterator for BreadthFirst<V, N, P>
where
    N: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
    P: FnMut(&V) -> bool,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        let vertex = self.queue.pop_front()?;
        for next in (self.next_nodes)(&vertex) {
            if (self.visit)(&next) {
                self.queue.push_back(next);
            }
        }
        Some(vertex)
    }
}

impl<V, N, I, P> FusedIterator for BreadthFirst<V, N, P>
where
    N: FnMut(&V) -> I,
    I: IntoIterator<Item = V>,
    P: FnMut(&V) -> bool,
{
}
