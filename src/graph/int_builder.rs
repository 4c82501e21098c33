//! Primitive integer-indexed graph builder backed by linked adjacency tables.
//!
//! [`IntGraphBuilder`] stores a graph whose vertices are the dense ids
//! `0..vertex_count` without any per-vertex heap allocation. Arrows live in
//! parallel flat tables indexed by arrow id:
//!
//! ```text
//! arrow id:     0    1    2    3
//! arrow_tail:  [0,   0,   1,   2 ]
//! arrow_head:  [1,   2,   2,   0 ]
//! out_link:    [1,   NIL, NIL, NIL]   next outgoing arrow of the same tail
//! in_link:     [NIL, 2,   NIL, NIL]   next incoming arrow of the same head
//! ```
//!
//! Each vertex holds the first and last arrow id of its outgoing chain and of
//! its incoming chain, plus the chain lengths. Appending an arrow is O(1);
//! reaching the `k`-th neighbour walks `k` links, which is acceptable because
//! neighbours are normally iterated rather than addressed at random.
//!
//! Removal keeps both id ranges dense: the removed arrow (or vertex) is
//! replaced by the last one, and the single chain pointer that still names
//! the old last id is rewritten.

use std::iter;

use crate::{
    graph::{IntAttributedDirectedGraph, IntBidiGraph, IntDirectedGraph, VertexId},
    Error, Result,
};

/// Sentinel for "no arrow" in the link tables.
const NIL: usize = usize::MAX;

/// Head, tail and length of one adjacency chain.
#[derive(Debug, Clone, Copy)]
struct Chain {
    first: usize,
    last: usize,
    count: usize,
}

impl Chain {
    const EMPTY: Chain = Chain {
        first: NIL,
        last: NIL,
        count: 0,
    };
}

/// A mutable integer-indexed directed graph with forward and backward
/// adjacency and per-arrow data.
///
/// Vertex ids are dense. [`remove_vertex`](IntGraphBuilder::remove_vertex)
/// moves the last vertex into the freed id, so ids held by the caller for
/// the last vertex change; every other id stays valid.
///
/// # Examples
///
/// ```rust
/// use digraph::{IntBidiGraph, IntDirectedGraph, IntGraphBuilder};
///
/// let mut builder: IntGraphBuilder<u32> = IntGraphBuilder::new();
/// let first = builder.add_vertices(3);
/// let (a, b, c) = (first, builder.vertex(1)?, builder.vertex(2)?);
/// builder.add_arrow(a, b, 10)?;
/// builder.add_arrow(a, c, 20)?;
/// builder.add_arrow(b, c, 30)?;
///
/// assert_eq!(builder.next_vertices(a).collect::<Vec<_>>(), vec![b, c]);
/// assert_eq!(builder.prev_vertices(c).collect::<Vec<_>>(), vec![a, b]);
///
/// assert_eq!(builder.remove_arrow(a, 0)?, 10);
/// assert_eq!(builder.arrow_count(), 2);
/// # Ok::<(), digraph::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IntGraphBuilder<A = ()> {
    out_chains: Vec<Chain>,
    in_chains: Vec<Chain>,
    arrow_tail: Vec<usize>,
    arrow_head: Vec<usize>,
    out_link: Vec<usize>,
    in_link: Vec<usize>,
    arrow_data: Vec<A>,
}

impl<A> Default for IntGraphBuilder<A> {
    fn default() -> Self {
        Self {
            out_chains: Vec::new(),
            in_chains: Vec::new(),
            arrow_tail: Vec::new(),
            arrow_head: Vec::new(),
            out_link: Vec::new(),
            in_link: Vec::new(),
            arrow_data: Vec::new(),
        }
    }
}

impl<A> IntGraphBuilder<A> {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty builder with preallocated tables.
    #[must_use]
    pub fn with_capacity(vertex_capacity: usize, arrow_capacity: usize) -> Self {
        Self {
            out_chains: Vec::with_capacity(vertex_capacity),
            in_chains: Vec::with_capacity(vertex_capacity),
            arrow_tail: Vec::with_capacity(arrow_capacity),
            arrow_head: Vec::with_capacity(arrow_capacity),
            out_link: Vec::with_capacity(arrow_capacity),
            in_link: Vec::with_capacity(arrow_capacity),
            arrow_data: Vec::with_capacity(arrow_capacity),
        }
    }

    /// Adds a new vertex and returns its id, which is always the previous
    /// vertex count.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId::new(self.out_chains.len());
        self.out_chains.push(Chain::EMPTY);
        self.in_chains.push(Chain::EMPTY);
        id
    }

    /// Adds `count` vertices and returns the id of the first one.
    pub fn add_vertices(&mut self, count: usize) -> VertexId {
        let first = VertexId::new(self.out_chains.len());
        self.out_chains.resize(first.index() + count, Chain::EMPTY);
        self.in_chains.resize(first.index() + count, Chain::EMPTY);
        first
    }

    /// Validates a raw index and returns it as a vertex id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexIndexOutOfBounds`] if `index` is not a vertex.
    pub fn vertex(&self, index: usize) -> Result<VertexId> {
        self.check_vertex(VertexId::new(index))?;
        Ok(VertexId::new(index))
    }

    /// Adds an arrow from `from` to `to` carrying `data`. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexIndexOutOfBounds`] if either endpoint is not a vertex.
    pub fn add_arrow(&mut self, from: VertexId, to: VertexId, data: A) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        self.push_arrow(from, to, data);
        Ok(())
    }

    /// Links a new arrow between two ids that are known to be vertices.
    pub(crate) fn push_arrow(&mut self, from: VertexId, to: VertexId, data: A) {
        let id = self.arrow_data.len();
        self.arrow_tail.push(from.index());
        self.arrow_head.push(to.index());
        self.out_link.push(NIL);
        self.in_link.push(NIL);
        self.arrow_data.push(data);

        Self::append(&mut self.out_chains[from.index()], &mut self.out_link, id);
        Self::append(&mut self.in_chains[to.index()], &mut self.in_link, id);
    }

    /// Removes the `index`-th outgoing arrow of `from` and returns its data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexIndexOutOfBounds`] for an invalid `from`, or
    /// [`Error::ArrowIndexOutOfBounds`] if `index` is past its arrow count.
    pub fn remove_arrow(&mut self, from: VertexId, index: usize) -> Result<A> {
        self.check_vertex(from)?;
        let count = self.out_chains[from.index()].count;
        if index >= count {
            return Err(Error::ArrowIndexOutOfBounds {
                vertex: from.to_string(),
                index,
                count,
            });
        }

        let id = self.nth_out(from, index);
        self.remove_arrow_id(id)
    }

    /// Removes every arrow from `from` to `to` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexIndexOutOfBounds`] if either endpoint is not a vertex.
    pub fn remove_arrows_between(&mut self, from: VertexId, to: VertexId) -> Result<usize> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let mut removed = 0;
        loop {
            let found = self
                .out_ids(from)
                .find(|&id| self.arrow_head[id] == to.index());
            let Some(id) = found else {
                return Ok(removed);
            };
            self.remove_arrow_id(id)?;
            removed += 1;
        }
    }

    /// Removes a vertex and every arrow entering or leaving it.
    ///
    /// The last vertex is moved into the freed id.
    ///
    /// # Returns
    ///
    /// The id the last vertex had before the move, or `None` if the removed
    /// vertex was itself the last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexIndexOutOfBounds`] if `vertex` is not a vertex.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> Result<Option<VertexId>> {
        self.check_vertex(vertex)?;
        let v = vertex.index();

        let mut dropped = 0;
        while self.out_chains[v].first != NIL {
            self.remove_arrow_id(self.out_chains[v].first)?;
            dropped += 1;
        }
        while self.in_chains[v].first != NIL {
            self.remove_arrow_id(self.in_chains[v].first)?;
            dropped += 1;
        }

        let last = self.out_chains.len() - 1;
        self.out_chains.swap_remove(v);
        self.in_chains.swap_remove(v);
        if v == last {
            return Ok(None);
        }

        for endpoint in self.arrow_tail.iter_mut().chain(self.arrow_head.iter_mut()) {
            if *endpoint == last {
                *endpoint = v;
            }
        }

        tracing::trace!(removed = v, moved = last, arrows = dropped, "compacted int builder vertex");
        Ok(Some(VertexId::new(last)))
    }

    /// Removes all vertices and arrows, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.out_chains.clear();
        self.in_chains.clear();
        self.arrow_tail.clear();
        self.arrow_head.clear();
        self.out_link.clear();
        self.in_link.clear();
        self.arrow_data.clear();
    }

    /// Returns the data of the `index`-th incoming arrow of `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a vertex or `index` is past its in-degree.
    #[must_use]
    pub fn prev_arrow(&self, vertex: VertexId, index: usize) -> &A {
        &self.arrow_data[self.nth_in(vertex, index)]
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex.index() < self.out_chains.len() {
            Ok(())
        } else {
            Err(Error::VertexIndexOutOfBounds {
                index: vertex.index(),
                count: self.out_chains.len(),
            })
        }
    }

    fn append(chain: &mut Chain, links: &mut [usize], id: usize) {
        if chain.last == NIL {
            chain.first = id;
        } else {
            links[chain.last] = id;
        }
        chain.last = id;
        chain.count += 1;
    }

    /// Unlinks `id` from `chain`. The walk is O(k) because the links only
    /// point forward.
    fn unlink(chain: &mut Chain, links: &mut [usize], id: usize) -> Result<()> {
        let mut previous = NIL;
        let mut cursor = chain.first;
        while cursor != id {
            if cursor == NIL {
                return Err(graph_error!("arrow {} missing from its adjacency chain", id));
            }
            previous = cursor;
            cursor = links[cursor];
        }

        if previous == NIL {
            chain.first = links[id];
        } else {
            links[previous] = links[id];
        }
        if chain.last == id {
            chain.last = previous;
        }
        chain.count -= 1;
        Ok(())
    }

    /// Rewrites the one pointer in `chain` that still names `stale`.
    fn repoint(chain: &mut Chain, links: &mut [usize], stale: usize, fresh: usize) -> Result<()> {
        if chain.last == stale {
            chain.last = fresh;
        }
        if chain.first == stale {
            chain.first = fresh;
            return Ok(());
        }

        let mut cursor = chain.first;
        while cursor != NIL {
            if links[cursor] == stale {
                links[cursor] = fresh;
                return Ok(());
            }
            cursor = links[cursor];
        }
        Err(graph_error!("moved arrow {} not reachable from its chain", stale))
    }

    fn remove_arrow_id(&mut self, id: usize) -> Result<A> {
        let (tail, head) = (self.arrow_tail[id], self.arrow_head[id]);
        Self::unlink(&mut self.out_chains[tail], &mut self.out_link, id)?;
        Self::unlink(&mut self.in_chains[head], &mut self.in_link, id)?;

        let last = self.arrow_data.len() - 1;
        self.arrow_tail.swap_remove(id);
        self.arrow_head.swap_remove(id);
        self.out_link.swap_remove(id);
        self.in_link.swap_remove(id);
        let data = self.arrow_data.swap_remove(id);

        if id != last {
            let (moved_tail, moved_head) = (self.arrow_tail[id], self.arrow_head[id]);
            Self::repoint(&mut self.out_chains[moved_tail], &mut self.out_link, last, id)?;
            Self::repoint(&mut self.in_chains[moved_head], &mut self.in_link, last, id)?;
        }
        Ok(data)
    }

    fn chain_ids<'a>(chain: Chain, links: &'a [usize]) -> impl Iterator<Item = usize> + 'a {
        iter::successors((chain.first != NIL).then_some(chain.first), move |&id| {
            let next = links[id];
            (next != NIL).then_some(next)
        })
    }

    fn out_ids(&self, vertex: VertexId) -> impl Iterator<Item = usize> + '_ {
        Self::chain_ids(self.out_chains[vertex.index()], &self.out_link)
    }

    fn in_ids(&self, vertex: VertexId) -> impl Iterator<Item = usize> + '_ {
        Self::chain_ids(self.in_chains[vertex.index()], &self.in_link)
    }

    fn nth_out(&self, vertex: VertexId, index: usize) -> usize {
        match self.out_ids(vertex).nth(index) {
            Some(id) => id,
            None => panic!("arrow index {index} out of bounds for {vertex}"),
        }
    }

    fn nth_in(&self, vertex: VertexId, index: usize) -> usize {
        match self.in_ids(vertex).nth(index) {
            Some(id) => id,
            None => panic!("incoming arrow index {index} out of bounds for {vertex}"),
        }
    }
}

impl<A> IntDirectedGraph for IntGraphBuilder<A> {
    fn vertex_count(&self) -> usize {
        self.out_chains.len()
    }

    fn arrow_count(&self) -> usize {
        self.arrow_data.len()
    }

    fn next_count(&self, vertex: VertexId) -> usize {
        self.out_chains[vertex.index()].count
    }

    fn next(&self, vertex: VertexId, index: usize) -> VertexId {
        VertexId::new(self.arrow_head[self.nth_out(vertex, index)])
    }

    fn next_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> {
        self.out_ids(vertex)
            .map(move |id| VertexId::new(self.arrow_head[id]))
    }
}

impl<A> IntBidiGraph for IntGraphBuilder<A> {
    fn prev_count(&self, vertex: VertexId) -> usize {
        self.in_chains[vertex.index()].count
    }

    fn prev(&self, vertex: VertexId, index: usize) -> VertexId {
        VertexId::new(self.arrow_tail[self.nth_in(vertex, index)])
    }

    fn prev_vertices(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> {
        self.in_ids(vertex)
            .map(move |id| VertexId::new(self.arrow_tail[id]))
    }
}

impl<A> IntAttributedDirectedGraph<A> for IntGraphBuilder<A> {
    fn next_arrow(&self, vertex: VertexId, index: usize) -> &A {
        &self.arrow_data[self.nth_out(vertex, index)]
    }

    fn next_arrows<'a>(&'a self, vertex: VertexId) -> impl Iterator<Item = (VertexId, &'a A)>
    where
        A: 'a,
    {
        self.out_ids(vertex)
            .map(move |id| (VertexId::new(self.arrow_head[id]), &self.arrow_data[id]))
    }
}
