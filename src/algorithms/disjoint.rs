//! Disjoint sets and Kruskal's minimum spanning forest.
//!
//! [`DisjointSets`] keeps an explicit member list per set. Merging two sets
//! moves the members of the smaller set into the larger one, so every element
//! moves at most `log2(n)` times over any sequence of unions.

use std::{fmt, hash::Hash, mem};

use indexmap::IndexMap;

use crate::{graph::DirectedGraph, Error, Result};

/// A partition of elements into disjoint sets.
///
/// Elements are added as singletons with [`make_set`](DisjointSets::make_set)
/// and joined with [`union`](DisjointSets::union). Each set is identified by a
/// slot number that stays valid until the set is merged into another.
///
/// # Examples
///
/// ```rust
/// use digraph::algorithms::DisjointSets;
///
/// let mut sets = DisjointSets::new();
/// for v in ["a", "b", "c"] {
///     sets.make_set(v);
/// }
/// assert_eq!(sets.set_count(), 3);
///
/// assert!(sets.union(&"a", &"c")?);
/// assert!(!sets.union(&"c", &"a")?);
/// assert!(sets.same_set(&"a", &"c"));
/// assert!(!sets.same_set(&"a", &"b"));
/// assert_eq!(sets.set_count(), 2);
/// # Ok::<(), digraph::Error>(())
/// ```
#[derive(Clone)]
pub struct DisjointSets<V> {
    /// Element to the slot of its set
    elements: IndexMap<V, usize>,
    /// Slot to the element indices of its members, empty once merged away
    members: Vec<Vec<usize>>,
    set_count: usize,
}

impl<V: Hash + Eq> DisjointSets<V> {
    /// Creates an empty partition.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty partition with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DisjointSets {
            elements: IndexMap::with_capacity(capacity),
            members: Vec::with_capacity(capacity),
            set_count: 0,
        }
    }

    /// Adds `element` as a set of its own.
    ///
    /// Returns `false`, leaving the partition unchanged, if the element is
    /// already present.
    pub fn make_set(&mut self, element: V) -> bool {
        if self.elements.contains_key(&element) {
            return false;
        }
        let slot = self.members.len();
        self.members.push(vec![self.elements.len()]);
        self.elements.insert(element, slot);
        self.set_count += 1;
        true
    }

    /// Returns the slot of the set containing `element`.
    #[must_use]
    pub fn find(&self, element: &V) -> Option<usize> {
        self.elements.get(element).copied()
    }

    /// Returns `true` if both elements are present and in the same set.
    #[must_use]
    pub fn same_set(&self, a: &V, b: &V) -> bool {
        matches!((self.find(a), self.find(b)), (Some(x), Some(y)) if x == y)
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `true` if two different sets were merged and `false` if both
    /// elements were already in the same set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if either element is not present.
    pub fn union(&mut self, a: &V, b: &V) -> Result<bool>
    where
        V: fmt::Debug,
    {
        let first = self.find(a).ok_or_else(|| Error::vertex_not_found(a))?;
        let second = self.find(b).ok_or_else(|| Error::vertex_not_found(b))?;
        if first == second {
            return Ok(false);
        }

        let (large, small) = if self.members[first].len() >= self.members[second].len() {
            (first, second)
        } else {
            (second, first)
        };
        let moved = mem::take(&mut self.members[small]);
        for &index in &moved {
            self.elements[index] = large;
        }
        self.members[large].extend(moved);
        self.set_count -= 1;
        Ok(true)
    }

    /// Returns the number of disjoint sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    /// Returns the number of elements across all sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no element was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the members of the set containing `element`, or `None` if the
    /// element is not present.
    pub fn members(&self, element: &V) -> Option<impl Iterator<Item = &V>> {
        let slot = self.find(element)?;
        Some(self.members[slot].iter().filter_map(move |&index| self.element(index)))
    }

    /// Returns all sets, each as the list of its members.
    pub fn sets(&self) -> impl Iterator<Item = Vec<&V>> {
        self.members
            .iter()
            .filter(|members| !members.is_empty())
            .map(move |members| members.iter().filter_map(|&index| self.element(index)).collect())
    }

    fn element(&self, index: usize) -> Option<&V> {
        self.elements.get_index(index).map(|(element, _)| element)
    }
}

impl<V: Hash + Eq> Default for DisjointSets<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug + Hash + Eq> fmt::Debug for DisjointSets<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.sets()).finish()
    }
}

/// Result of [`minimum_spanning_forest`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningForest<V, E> {
    /// Arrows of the forest, in ascending cost order.
    pub accepted: Vec<(V, V, E)>,
    /// Arrows that would have closed a cycle, in ascending cost order.
    pub rejected: Vec<(V, V, E)>,
}

impl<V, E> SpanningForest<V, E> {
    /// Returns the summed cost of the accepted arrows.
    pub fn total_cost<C>(&self, cost: C) -> f64
    where
        C: Fn(&V, &V, &E) -> f64,
    {
        self.accepted
            .iter()
            .map(|(tail, head, arrow)| cost(tail, head, arrow))
            .sum()
    }
}

/// Computes a minimum spanning forest with Kruskal's algorithm.
///
/// Arrow direction is ignored. Arrows are considered in ascending order of
/// `cost(tail, head, arrow)`, with ties kept in input order. An arrow joining
/// two vertices that are not yet connected is accepted; every other arrow,
/// self-loops included, is rejected.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`] if an arrow has an endpoint that is not in
/// `vertices`.
///
/// # Examples
///
/// ```rust
/// use digraph::{algorithms::minimum_spanning_forest, DirectedGraph, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<char, u32> = DirectedGraphBuilder::new();
/// for v in ['a', 'b', 'c'] {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow('a', 'b', 3)?;
/// builder.add_arrow('b', 'c', 1)?;
/// builder.add_arrow('a', 'c', 2)?;
///
/// let forest = minimum_spanning_forest(builder.vertices(), builder.arrows(), |_, _, w| f64::from(**w))?;
/// assert_eq!(forest.accepted, vec![(&'b', &'c', &1), (&'a', &'c', &2)]);
/// assert_eq!(forest.rejected, vec![(&'a', &'b', &3)]);
/// # Ok::<(), digraph::Error>(())
/// ```
pub fn minimum_spanning_forest<V, E, I, J, C>(
    vertices: I,
    arrows: J,
    cost: C,
) -> Result<SpanningForest<V, E>>
where
    V: Hash + Eq + fmt::Debug,
    I: IntoIterator<Item = V>,
    J: IntoIterator<Item = (V, V, E)>,
    C: Fn(&V, &V, &E) -> f64,
{
    let vertices = vertices.into_iter();
    let mut sets = DisjointSets::with_capacity(vertices.size_hint().0);
    for vertex in vertices {
        sets.make_set(vertex);
    }

    let mut weighted: Vec<(f64, (V, V, E))> = arrows
        .into_iter()
        .map(|(tail, head, arrow)| (cost(&tail, &head, &arrow), (tail, head, arrow)))
        .collect();
    weighted.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    let mut forest = SpanningForest {
        accepted: Vec::new(),
        rejected: Vec::new(),
    };
    for (_, arrow) in weighted {
        if sets.union(&arrow.0, &arrow.1)? {
            forest.accepted.push(arrow);
        } else {
            forest.rejected.push(arrow);
        }
    }

    tracing::debug!(
        accepted = forest.accepted.len(),
        rejected = forest.rejected.len(),
        trees = sets.set_count(),
        "minimum spanning forest computed"
    );
    Ok(forest)
}

/// Partitions the vertices of `graph` into weakly connected components.
///
/// Two vertices share a component when they are joined by a chain of arrows
/// followed in either direction. Components are ordered by their first vertex
/// and list their members in vertex order.
///
/// # Errors
///
/// Returns [`Error::VertexNotFound`] if the graph reports an arrow whose
/// endpoint is not one of its vertices.
///
/// # Examples
///
/// ```rust
/// use digraph::{algorithms::disjoint_vertex_sets, DirectedGraphBuilder};
///
/// let mut builder: DirectedGraphBuilder<u8, ()> = DirectedGraphBuilder::new();
/// for v in 0..5 {
///     builder.add_vertex(v);
/// }
/// builder.add_arrow(3, 0, ())?;
/// builder.add_arrow(1, 4, ())?;
///
/// let sets = disjoint_vertex_sets(&builder)?;
/// assert_eq!(sets, vec![vec![&0, &3], vec![&1, &4], vec![&2]]);
/// # Ok::<(), digraph::Error>(())
/// ```
pub fn disjoint_vertex_sets<G>(graph: &G) -> Result<Vec<Vec<&G::Vertex>>>
where
    G: DirectedGraph,
    G::Vertex: Hash + Eq + fmt::Debug,
{
    let mut sets = DisjointSets::with_capacity(graph.vertex_count());
    for vertex in graph.vertices() {
        sets.make_set(vertex);
    }
    for (tail, head, _) in graph.arrows() {
        sets.union(&tail, &head)?;
    }

    let mut output: Vec<Vec<&G::Vertex>> = Vec::with_capacity(sets.set_count());
    let mut position = vec![usize::MAX; sets.members.len()];
    for vertex in graph.vertices() {
        let Some(slot) = sets.find(&vertex) else {
            continue;
        };
        if position[slot] == usize::MAX {
            position[slot] = output.len();
            output.push(Vec::new());
        }
        output[position[slot]].push(vertex);
    }
    Ok(output)
}
