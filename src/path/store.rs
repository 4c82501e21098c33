//! Search bookkeeping and the search cores shared by all path finders.
//!
//! A search keeps, per vertex key, the best known cost, the back-link that
//! produced it and whether the vertex is explored. [`SearchStore`] abstracts
//! that bookkeeping so the same uniform-cost and breadth-first cores run with
//! either store:
//!
//! - [`HashStore`] keys by any hashable value and is used for graphs without a
//!   dense index
//! - [`DenseStore`] keys by [`VertexId`] and keeps everything in flat vectors
//!   and a [`BitSet`]; it is selected whenever the graph exposes an index
//!
//! Both stores produce identical results; the dense one avoids hashing.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet, VecDeque},
    hash::Hash,
};

use crate::{graph::VertexId, utils::BitSet};

/// Predecessor key and the outgoing slot of the predecessor that was taken.
pub(crate) type BackLink<K> = (K, usize);

/// Per-search bookkeeping keyed by `K`.
pub(crate) trait SearchStore<K: Copy> {
    /// Forgets all state from a previous search.
    fn clear(&mut self);

    /// Best known cost of `key`, if it has been reached.
    fn cost(&self, key: K) -> Option<f64>;

    /// Records a new best cost and the back-link that achieved it.
    fn reach(&mut self, key: K, cost: f64, back_link: Option<BackLink<K>>);

    fn back_link(&self, key: K) -> Option<BackLink<K>>;

    fn is_explored(&self, key: K) -> bool;

    fn explore(&mut self, key: K);
}

/// Hash-backed store for arbitrary keys.
pub(crate) struct HashStore<K> {
    reached: HashMap<K, (f64, Option<BackLink<K>>)>,
    explored: HashSet<K>,
}

impl<K> HashStore<K> {
    pub(crate) fn new() -> Self {
        HashStore {
            reached: HashMap::new(),
            explored: HashSet::new(),
        }
    }
}

impl<K: Copy + Hash + Eq> SearchStore<K> for HashStore<K> {
    fn clear(&mut self) {
        self.reached.clear();
        self.explored.clear();
    }

    fn cost(&self, key: K) -> Option<f64> {
        self.reached.get(&key).map(|(cost, _)| *cost)
    }

    fn reach(&mut self, key: K, cost: f64, back_link: Option<BackLink<K>>) {
        self.reached.insert(key, (cost, back_link));
    }

    fn back_link(&self, key: K) -> Option<BackLink<K>> {
        self.reached.get(&key).and_then(|(_, link)| *link)
    }

    fn is_explored(&self, key: K) -> bool {
        self.explored.contains(&key)
    }

    fn explore(&mut self, key: K) {
        self.explored.insert(key);
    }
}

/// Array-backed store for dense vertex ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct DenseStore {
    costs: Vec<f64>,
    links: Vec<Option<BackLink<VertexId>>>,
    explored: BitSet,
}

impl DenseStore {
    pub(crate) fn new(vertex_count: usize) -> Self {
        let mut store = DenseStore::default();
        store.reset(vertex_count);
        store
    }

    /// Clears the store and sizes it for `vertex_count` vertices, reusing the
    /// existing allocations.
    pub(crate) fn reset(&mut self, vertex_count: usize) {
        self.costs.clear();
        self.costs.resize(vertex_count, f64::INFINITY);
        self.links.clear();
        self.links.resize(vertex_count, None);
        self.explored.reset(vertex_count);
    }
}

impl SearchStore<VertexId> for DenseStore {
    fn clear(&mut self) {
        self.costs.fill(f64::INFINITY);
        self.links.fill(None);
        self.explored.clear();
    }

    fn cost(&self, key: VertexId) -> Option<f64> {
        let cost = self.costs[key.index()];
        cost.is_finite().then_some(cost)
    }

    fn reach(&mut self, key: VertexId, cost: f64, back_link: Option<BackLink<VertexId>>) {
        self.costs[key.index()] = cost;
        self.links[key.index()] = back_link;
    }

    fn back_link(&self, key: VertexId) -> Option<BackLink<VertexId>> {
        self.links[key.index()]
    }

    fn is_explored(&self, key: VertexId) -> bool {
        self.explored.contains(key.index())
    }

    fn explore(&mut self, key: VertexId) {
        self.explored.insert(key.index());
    }
}

/// Min-queue entry ordered by cost, then by insertion sequence.
#[derive(Debug, Clone, Copy)]
pub(crate) struct QueueEntry<K> {
    cost: f64,
    sequence: u64,
    key: K,
}

impl<K> PartialEq for QueueEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for QueueEntry<K> {}

impl<K> PartialOrd for QueueEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for QueueEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse so the cheapest, oldest entry wins
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Reusable scratch space of one search: the store plus queue and buffers.
pub(crate) struct Scratch<K, S> {
    pub(crate) store: S,
    heap: BinaryHeap<QueueEntry<K>>,
    queue: VecDeque<(K, usize)>,
    arrows: Vec<(K, f64)>,
    heads: Vec<K>,
}

impl<K: Copy, S: SearchStore<K>> Scratch<K, S> {
    pub(crate) fn new(store: S) -> Self {
        Scratch {
            store,
            heap: BinaryHeap::new(),
            queue: VecDeque::new(),
            arrows: Vec::new(),
            heads: Vec::new(),
        }
    }

    /// Uniform-cost search from `start` until a key satisfies `is_goal`.
    ///
    /// `expand(key, out)` must push `(head, arrow cost)` for every outgoing
    /// arrow of `key` in slot order. Costs must be non-negative; an infinite
    /// cost makes the arrow impassable. Keys whose tentative cost exceeds
    /// `max_cost` are never queued.
    ///
    /// Returns the goal key and its cost.
    pub(crate) fn uniform_cost<G, E>(
        &mut self,
        start: K,
        mut is_goal: G,
        mut expand: E,
        max_cost: f64,
    ) -> Option<(K, f64)>
    where
        G: FnMut(K) -> bool,
        E: FnMut(K, &mut Vec<(K, f64)>),
    {
        self.store.clear();
        self.heap.clear();

        let mut sequence = 0u64;
        self.store.reach(start, 0.0, None);
        self.heap.push(QueueEntry {
            cost: 0.0,
            sequence,
            key: start,
        });

        while let Some(QueueEntry { cost, key, .. }) = self.heap.pop() {
            // A cheaper entry for the same key was already explored
            if self.store.is_explored(key) {
                continue;
            }
            if is_goal(key) {
                return Some((key, cost));
            }
            self.store.explore(key);

            self.arrows.clear();
            expand(key, &mut self.arrows);
            for (slot, &(head, arrow_cost)) in self.arrows.iter().enumerate() {
                if self.store.is_explored(head) {
                    continue;
                }
                let tentative = cost + arrow_cost;
                if !tentative.is_finite() || tentative > max_cost {
                    continue;
                }
                if self.store.cost(head).map_or(true, |known| tentative < known) {
                    self.store.reach(head, tentative, Some((key, slot)));
                    sequence += 1;
                    self.heap.push(QueueEntry {
                        cost: tentative,
                        sequence,
                        key: head,
                    });
                }
            }
        }

        tracing::trace!(max_cost, "uniform-cost search exhausted its frontier");
        None
    }

    /// Breadth-first search from `start` until a key satisfies `is_goal`.
    ///
    /// `expand(key, out)` must push the heads of all outgoing arrows of `key`
    /// in slot order. Paths longer than `max_length` arrows are not explored.
    ///
    /// Returns the goal key and its distance in arrows.
    pub(crate) fn breadth_first<G, E>(
        &mut self,
        start: K,
        mut is_goal: G,
        mut expand: E,
        max_length: usize,
    ) -> Option<(K, usize)>
    where
        G: FnMut(K) -> bool,
        E: FnMut(K, &mut Vec<K>),
    {
        self.store.clear();
        self.queue.clear();

        self.store.reach(start, 0.0, None);
        self.queue.push_back((start, 0));

        while let Some((key, depth)) = self.queue.pop_front() {
            if is_goal(key) {
                return Some((key, depth));
            }
            if depth >= max_length {
                continue;
            }

            self.heads.clear();
            expand(key, &mut self.heads);
            for (slot, &head) in self.heads.iter().enumerate() {
                if self.store.cost(head).is_none() {
                    self.store.reach(head, (depth + 1) as f64, Some((key, slot)));
                    self.queue.push_back((head, depth + 1));
                }
            }
        }

        tracing::trace!(max_length, "breadth-first search exhausted its frontier");
        None
    }

    /// Walks the back-links from `goal` to the start.
    ///
    /// Returns the `(tail, slot)` steps in forward order.
    pub(crate) fn steps_to(&self, goal: K) -> Vec<BackLink<K>> {
        let mut steps = Vec::new();
        let mut cursor = goal;
        while let Some((tail, slot)) = self.store.back_link(cursor) {
            steps.push((tail, slot));
            cursor = tail;
        }
        steps.reverse();
        steps
    }
}
