use decremental_conn::{AdjacencyGraph, DynGraph, Edge};

fn rem_edge(t: &mut DynGraph<AdjacencyGraph>, u: usize, v: usize) {
    println!("Removing edge from {} to {}", u, v);
    t.dyn_remove_edge(Edge::new(u, v));
}

fn is_connected(t: &DynGraph<AdjacencyGraph>, u: usize, v: usize) {
    println!(
        "Are {} and {} connected? {}",
        u,
        v,
        if t.query_is_connected(u, v) { "Yes" } else { "No" }
    );
}

fn main() {
    let mut g = AdjacencyGraph::new(10);
    for u in 0..8 {
        g.add_edge(u, (u + 1) % 8);
    }
    g.add_edge(7, 8);
    g.add_edge(8, 9);
    let mut t = DynGraph::new(g);
    println!("Created a ring of length 8 (vertices 0 to 7) with a tail 7-8-9");
    println!("Root is {}", t.get_root());
    is_connected(&t, 0, 9);
    rem_edge(&mut t, 0, 1);
    is_connected(&t, 0, 1);
    rem_edge(&mut t, 7, 8);
    is_connected(&t, 0, 9);
    is_connected(&t, 8, 9);
    rem_edge(&mut t, 3, 4);
    is_connected(&t, 3, 4);
    is_connected(&t, 1, 3);
    println!("{t:?}");
}
