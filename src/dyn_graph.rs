use std::collections::{BTreeMap, HashSet};
use std::fmt::{Debug, Formatter};

use debug_tree::TreeBuilder;
use rand::Rng;

use crate::avalanche::AvalancheRepair;
use crate::break_detect::BreakDetector;
use crate::change_record::UndoLog;
use crate::edge_set::EdgeSet;
use crate::graph::{Edge, Graph, Vertex};
use crate::layering::{Layering, PrettyLevel};
use crate::DecrementalConnectivity;

/// Connectivity of a graph under edge deletions.
///
/// Keeps a rooted BFS layering of every component (one random root at level 0, the first vertex of every
/// other component at level 1) and a component label per vertex. After a deletion, a break detection
/// scanning both endpoints and an avalanche repair of the layering run in lockstep:
/// - if the repair finishes first, the component is still connected;
/// - if the detection finds the other endpoint first, the repair is run to completion without logging;
/// - if the detection exhausts one side first, that side gets a new label and the repair is rewound. The
///   removed edge then stays in the layering as an artificial edge between the two pieces.
///
/// Once the detection has concluded there is no split, the repair stops logging. A deletion interrupted
/// after that point cannot be rewound; logging everything would cost space proportional to the whole
/// repair, not only to the part that may be cancelled.
pub struct DynGraph<G: Graph> {
    graph: G,
    layering: Layering,
    components: Vec<usize>,
    root: Vertex,
    component_max_idx: usize,
    undo: UndoLog,
    /// Removed edges kept in the layering, (min, max).
    artificial_edges: HashSet<(Vertex, Vertex)>,
}

impl<G: Graph> DynGraph<G> {
    /// Picks the root at random.
    pub fn new(graph: G) -> Self {
        Self::from_rng(graph, &mut rand::thread_rng())
    }

    /// Picks the root with the given random source.
    pub fn from_rng(graph: G, rng: &mut impl Rng) -> Self {
        assert!(graph.num_vertices() > 0, "graph has no vertices");
        let root = rng.gen_range(0..graph.num_vertices());
        Self::with_root(graph, root)
    }

    pub fn with_root(graph: G, root: Vertex) -> Self {
        let n = graph.num_vertices();
        assert!(root < n, "root {root} out of range 0..{n}");
        log::info!("Picked as root: {root}");
        let mut this = Self {
            layering: Layering::new(n),
            components: vec![usize::MAX; n],
            root,
            component_max_idx: 0,
            undo: UndoLog::new(),
            artificial_edges: HashSet::new(),
            graph,
        };
        this.init();
        this
    }

    fn init(&mut self) {
        for v in self.layering.bfs_classify(&self.graph, self.root, 0) {
            self.components[v] = self.component_max_idx;
        }
        for s in 0..self.graph.num_vertices() {
            if !self.layering.is_discovered(s) {
                // Roots of the other components sit on level 1, with nothing below them.
                self.component_max_idx += 1;
                for v in self.layering.bfs_classify(&self.graph, s, 1) {
                    self.components[v] = self.component_max_idx;
                }
            }
        }
        log::debug!(
            "initialized {} vertices, {} edges, {} components",
            self.graph.num_vertices(),
            self.graph.num_edges(),
            self.component_max_idx + 1
        );
    }

    /// Removes the edge from the graph and updates connectivity. Returns whether its component split.
    /// Panics if the edge is not in the graph.
    pub fn dyn_remove_edge(&mut self, edge: Edge) -> bool {
        let (u, v) = (edge.source, edge.target);
        assert!(
            self.graph.remove_edge(edge),
            "edge ({u}, {v}) is not in the graph"
        );
        let mut detector = BreakDetector::new(u, v);
        let mut repair = AvalancheRepair::new(u, v);
        let mut breaks = false;
        while !repair.is_finished() {
            if !detector.is_finished() {
                detector.advance(&self.graph);
            } else if detector.component_breaks() {
                breaks = true;
                break;
            } else if repair.is_recording() {
                log::trace!("({u}, {v}) does not break, finishing repair unlogged");
                repair.stop_recording();
            }
            repair.advance(&mut self.layering, &mut self.undo);
        }
        if breaks {
            self.component_max_idx += 1;
            let id = self.component_max_idx;
            for &w in detector.small_component() {
                self.components[w] = id;
            }
            let undone = self.undo.rewind_all(&mut self.layering);
            self.artificial_edges.insert(edge.canonical());
            log::debug!(
                "removing ({u}, {v}) split off {} vertices as component {id}, {undone} changes rewound",
                detector.small_component().len()
            );
        } else {
            debug_assert!(!(detector.is_finished() && detector.component_breaks()));
            log::debug!(
                "removing ({u}, {v}) kept the component, repair took {} steps",
                repair.steps()
            );
        }
        self.undo.clear();
        breaks
    }

    pub fn query_is_connected(&self, u: Vertex, v: Vertex) -> bool {
        self.components[u] == self.components[v]
    }

    /// Whether the endpoints of the edge are connected.
    pub fn query_is_edge_connected(&self, edge: Edge) -> bool {
        self.query_is_connected(edge.source, edge.target)
    }

    pub fn get_root(&self) -> Vertex {
        self.root
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn layering(&self) -> &Layering {
        &self.layering
    }

    pub fn level(&self, v: Vertex) -> usize {
        self.layering.level(v)
    }

    pub fn levels(&self) -> &[usize] {
        self.layering.levels()
    }

    pub fn alpha(&self, v: Vertex) -> &EdgeSet {
        self.layering.alpha(v)
    }

    pub fn beta(&self, v: Vertex) -> &EdgeSet {
        self.layering.beta(v)
    }

    pub fn gamma(&self, v: Vertex) -> &EdgeSet {
        self.layering.gamma(v)
    }

    pub fn component(&self, v: Vertex) -> usize {
        self.components[v]
    }

    pub fn components(&self) -> &[usize] {
        &self.components
    }

    /// Number of labels handed out so far, which is the number of components.
    pub fn num_components(&self) -> usize {
        self.component_max_idx + 1
    }

    pub fn artificial_edges(&self) -> &HashSet<(Vertex, Vertex)> {
        &self.artificial_edges
    }

    /// See [`Layering::check`].
    pub fn check_layering(&self) -> Result<(), String> {
        self.layering.check(&self.graph, &self.artificial_edges)
    }
}

fn sorted_neighbors(set: &EdgeSet, v: Vertex) -> Vec<Vertex> {
    let mut ns: Vec<_> = set.neighbors(v).collect();
    ns.sort_unstable();
    ns
}

impl<G: Graph> Debug for DynGraph<G> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        let _b = builder.add_branch(&format!("DynGraph (root {})", self.root));
        let mut by_component: BTreeMap<usize, Vec<Vertex>> = BTreeMap::new();
        for (v, &c) in self.components.iter().enumerate() {
            by_component.entry(c).or_default().push(v);
        }
        for (c, vs) in by_component {
            let _c = builder.add_branch(&format!("component {c}"));
            for v in vs {
                builder.add_leaf(&format!(
                    "{v}: level {:?} alpha {:?} beta {:?} gamma {:?}",
                    PrettyLevel(self.level(v)),
                    sorted_neighbors(self.alpha(v), v),
                    sorted_neighbors(self.beta(v), v),
                    sorted_neighbors(self.gamma(v), v),
                ));
            }
        }
        if !self.artificial_edges.is_empty() {
            let mut artificial: Vec<_> = self.artificial_edges.iter().collect();
            artificial.sort_unstable();
            builder.add_leaf(&format!("artificial edges {artificial:?}"));
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<G: Graph> DecrementalConnectivity for DynGraph<G> {
    fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    fn remove_edge(&mut self, u: Vertex, v: Vertex) -> bool {
        if !self.graph.has_edge(u, v) {
            return false;
        }
        self.dyn_remove_edge(Edge::new(u, v));
        true
    }

    fn is_connected(&self, u: Vertex, v: Vertex) -> bool {
        self.query_is_connected(u, v)
    }
}
