use std::collections::{btree_set, BTreeSet};
use std::ops::Bound;

use crate::graph::Vertex;

fn canonical(u: Vertex, v: Vertex) -> (Vertex, Vertex) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Set of undirected edges, stored as `(min, max)` so that `(u, v)` and `(v, u)` are one entry. Ordered, so
/// that a walk over it can be resumed from the last edge seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet(BTreeSet<(Vertex, Vertex)>);

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }
    /// Inserting an edge already present is a no-op.
    pub fn add(&mut self, u: Vertex, v: Vertex) {
        self.0.insert(canonical(u, v));
    }
    /// Returns false if the edge was not in the set.
    pub fn remove(&mut self, u: Vertex, v: Vertex) -> bool {
        self.0.remove(&canonical(u, v))
    }
    pub fn contains(&self, u: Vertex, v: Vertex) -> bool {
        self.0.contains(&canonical(u, v))
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn clear(&mut self) {
        self.0.clear()
    }
    pub fn iter(&self) -> btree_set::Iter<'_, (Vertex, Vertex)> {
        self.0.iter()
    }
    /// Edge following `after`, or the first edge if `after` is None.
    pub fn next_after(&self, after: Option<(Vertex, Vertex)>) -> Option<(Vertex, Vertex)> {
        match after {
            None => self.0.first().copied(),
            Some(e) => self.0.range((Bound::Excluded(e), Bound::Unbounded)).next().copied(),
        }
    }
    /// Endpoint of `edge` which is not `known`.
    pub fn other_end(edge: &(Vertex, Vertex), known: Vertex) -> Vertex {
        if edge.0 == known {
            edge.1
        } else {
            edge.0
        }
    }
    /// Other endpoints of all edges, seen from `v`.
    pub fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.0.iter().map(move |e| Self::other_end(e, v))
    }
    /// Replaces the contents of self by those of `source`, leaving `source` empty.
    /// Returns the previous contents of self.
    pub fn move_from(&mut self, source: &mut EdgeSet) -> EdgeSet {
        std::mem::replace(self, std::mem::take(source))
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a (Vertex, Vertex);
    type IntoIter = btree_set::Iter<'a, (Vertex, Vertex)>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(Vertex, Vertex)> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = (Vertex, Vertex)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(u, v)| canonical(u, v)).collect())
    }
}
