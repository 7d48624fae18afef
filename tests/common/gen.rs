//! Graph generators. Each returns the graph and its edges in insertion order.

use decremental_conn::{AdjacencyGraph, Edge};
use rand::Rng;

fn build(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> (AdjacencyGraph, Vec<Edge>) {
    let mut g = AdjacencyGraph::new(n);
    let mut added = vec![];
    for (u, v) in edges {
        if g.add_edge(u, v) {
            added.push(Edge::new(u, v));
        }
    }
    (g, added)
}

/// Cycle 0 - 1 - ... - (n-1) - 0. Edges are (i, i-1) for i in 1..n, then (0, n-1).
#[allow(dead_code)]
pub fn ring(n: usize) -> (AdjacencyGraph, Vec<Edge>) {
    build(n, (1..n).map(|i| (i, i - 1)).chain([(0, n - 1)]))
}

/// Path 0 - 1 - ... - (n-1). Edges are (i, i-1) for i in 1..n.
#[allow(dead_code)]
pub fn line(n: usize) -> (AdjacencyGraph, Vec<Edge>) {
    build(n, (1..n).map(|i| (i, i - 1)))
}

/// Hub 0 joined to every other vertex. Edges are (0, i) for i in 1..n.
#[allow(dead_code)]
pub fn star(n: usize) -> (AdjacencyGraph, Vec<Edge>) {
    build(n, (1..n).map(|i| (0, i)))
}

#[allow(dead_code)]
pub fn fully_connected(n: usize) -> (AdjacencyGraph, Vec<Edge>) {
    build(n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))))
}

/// m random edge attempts on n vertices. Duplicates and self loops are dropped.
#[allow(dead_code)]
pub fn random(n: usize, m: usize, rng: &mut impl Rng) -> (AdjacencyGraph, Vec<Edge>) {
    let pairs: Vec<_> = (0..m)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
        .collect();
    build(n, pairs)
}
