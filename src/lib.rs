pub mod avalanche;
pub mod break_detect;
pub mod change_record;
pub mod dyn_graph;
pub mod edge_set;
pub mod graph;
pub mod layering;
pub mod scan;
pub use dyn_graph::DynGraph;
pub use edge_set::EdgeSet;
pub use graph::{AdjacencyGraph, Edge, Graph, Vertex};

pub trait DecrementalConnectivity {
    fn num_vertices(&self) -> usize;
    /// Remove the edge between u and v. Returns whether it was removed.
    fn remove_edge(&mut self, u: Vertex, v: Vertex) -> bool;
    /// Check if u and v are connected.
    fn is_connected(&self, u: Vertex, v: Vertex) -> bool;
}
