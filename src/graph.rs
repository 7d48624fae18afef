//! Graph adapter consumed by the connectivity structure.

use std::collections::BTreeSet;
use std::ops::Bound;

pub type Vertex = usize;

/// Undirected edge handle. `(u, v)` and `(v, u)` describe the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: Vertex,
    pub target: Vertex,
}

impl Edge {
    pub fn new(source: Vertex, target: Vertex) -> Self {
        Self { source, target }
    }
    /// (min, max) of the endpoints.
    pub fn canonical(&self) -> (Vertex, Vertex) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
    /// The endpoint that is not `v`. Panics if `v` is not an endpoint.
    pub fn other(&self, v: Vertex) -> Vertex {
        if self.source == v {
            self.target
        } else {
            assert_eq!(self.target, v, "{v} is not an endpoint of {self:?}");
            self.source
        }
    }
}

impl From<(Vertex, Vertex)> for Edge {
    fn from((source, target): (Vertex, Vertex)) -> Self {
        Self::new(source, target)
    }
}

/// Undirected simple graph on the dense vertex ids `0..num_vertices()`.
pub trait Graph {
    fn num_vertices(&self) -> usize;
    fn num_edges(&self) -> usize;
    /// Edges incident to v, each with `source == v`.
    fn out_edges(&self, v: Vertex) -> impl Iterator<Item = Edge> + '_;
    fn neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.out_edges(v).map(|e| e.target)
    }
    /// Neighbor of v following `after` in a fixed order, or the first one if `after` is None. Lets a
    /// traversal walk the edges of v one at a time.
    fn next_neighbor(&self, v: Vertex, after: Option<Vertex>) -> Option<Vertex>;
    fn has_edge(&self, u: Vertex, v: Vertex) -> bool;
    /// Removes the edge. Returns whether it was present.
    fn remove_edge(&mut self, edge: Edge) -> bool;
}

/// Adjacency sets, ordered so that traversals are reproducible.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    adj: Vec<BTreeSet<Vertex>>,
    m: usize,
}

impl AdjacencyGraph {
    /// Graph on n vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![BTreeSet::new(); n],
            m: 0,
        }
    }

    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (Vertex, Vertex)>) -> Self {
        let mut g = Self::new(n);
        for (u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// Add an edge between u and v. Returns whether it was added; self loops and duplicates are not.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        assert!(u < self.adj.len() && v < self.adj.len(), "vertex out of range");
        if u == v || !self.adj[u].insert(v) {
            return false;
        }
        self.adj[v].insert(u);
        self.m += 1;
        true
    }

    /// Every edge once, as `(min, max)`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adj.iter().enumerate().flat_map(|(u, vs)| {
            vs.range(u + 1..).map(move |&v| Edge::new(u, v))
        })
    }
}

impl Graph for AdjacencyGraph {
    fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    fn num_edges(&self) -> usize {
        self.m
    }

    fn out_edges(&self, v: Vertex) -> impl Iterator<Item = Edge> + '_ {
        self.adj[v].iter().map(move |&w| Edge::new(v, w))
    }

    fn next_neighbor(&self, v: Vertex, after: Option<Vertex>) -> Option<Vertex> {
        match after {
            None => self.adj[v].first().copied(),
            Some(a) => self.adj[v]
                .range((Bound::Excluded(a), Bound::Unbounded))
                .next()
                .copied(),
        }
    }

    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.adj.get(u).is_some_and(|vs| vs.contains(&v))
    }

    fn remove_edge(&mut self, edge: Edge) -> bool {
        let Edge { source: u, target: v } = edge;
        if !self.has_edge(u, v) {
            return false;
        }
        self.adj[u].remove(&v);
        self.adj[v].remove(&u);
        self.m -= 1;
        true
    }
}
