//! Rooted BFS layering of the graph: a level per vertex and the alpha/beta/gamma classification of every edge.

use std::collections::{HashSet, VecDeque};
use std::fmt::{Debug, Display, Formatter};

use derivative::Derivative;

use crate::edge_set::EdgeSet;
use crate::graph::{Graph, Vertex};

/// Level of a vertex not reached by any traversal yet.
pub const UNDISCOVERED: usize = usize::MAX;

/// Used to pretty print a level, outputting ∅ if it is UNDISCOVERED.
pub struct PrettyLevel(pub usize);

impl Display for PrettyLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == UNDISCOVERED {
            write!(f, "∅")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Debug for PrettyLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

#[allow(clippy::ptr_arg)]
fn levels_fmt(levels: &Vec<usize>, f: &mut Formatter) -> std::fmt::Result {
    f.debug_list()
        .entries(levels.iter().map(|&l| PrettyLevel(l)))
        .finish()
}

/// Which of the three buckets of a vertex an edge lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// Other endpoint one level below.
    Alpha,
    /// Other endpoint on the same level.
    Beta,
    /// Other endpoint one level above.
    Gamma,
}

impl SetKind {
    /// Bucket the same edge lives in at the other endpoint.
    pub fn mirror(self) -> Self {
        match self {
            SetKind::Alpha => SetKind::Gamma,
            SetKind::Beta => SetKind::Beta,
            SetKind::Gamma => SetKind::Alpha,
        }
    }
}

/// Levels and buckets, one entry per vertex. Buckets are only ever moved between owners, never shared.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct Layering {
    #[derivative(Debug(format_with = "levels_fmt"))]
    pub(crate) levels: Vec<usize>,
    pub(crate) alpha: Vec<EdgeSet>,
    pub(crate) beta: Vec<EdgeSet>,
    pub(crate) gamma: Vec<EdgeSet>,
}

impl Layering {
    /// All n vertices undiscovered, all buckets empty.
    pub fn new(n: usize) -> Self {
        Self {
            levels: vec![UNDISCOVERED; n],
            alpha: vec![EdgeSet::new(); n],
            beta: vec![EdgeSet::new(); n],
            gamma: vec![EdgeSet::new(); n],
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, v: Vertex) -> usize {
        self.levels[v]
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    pub fn is_discovered(&self, v: Vertex) -> bool {
        self.levels[v] != UNDISCOVERED
    }

    pub fn set(&self, kind: SetKind, v: Vertex) -> &EdgeSet {
        match kind {
            SetKind::Alpha => &self.alpha[v],
            SetKind::Beta => &self.beta[v],
            SetKind::Gamma => &self.gamma[v],
        }
    }

    pub(crate) fn set_mut(&mut self, kind: SetKind, v: Vertex) -> &mut EdgeSet {
        match kind {
            SetKind::Alpha => &mut self.alpha[v],
            SetKind::Beta => &mut self.beta[v],
            SetKind::Gamma => &mut self.gamma[v],
        }
    }

    pub fn alpha(&self, v: Vertex) -> &EdgeSet {
        &self.alpha[v]
    }

    pub fn beta(&self, v: Vertex) -> &EdgeSet {
        &self.beta[v]
    }

    pub fn gamma(&self, v: Vertex) -> &EdgeSet {
        &self.gamma[v]
    }

    /// Bucket of `near` that an edge towards `far` belongs to, judging by the current levels.
    pub fn relation(&self, near: Vertex, far: Vertex) -> SetKind {
        use std::cmp::Ordering::*;
        match self.levels[far].cmp(&self.levels[near]) {
            Less => SetKind::Alpha,
            Equal => SetKind::Beta,
            Greater => SetKind::Gamma,
        }
    }

    /// Puts the edge in the bucket pair implied by the levels of its endpoints.
    fn classify(&mut self, near: Vertex, far: Vertex) {
        let kind = self.relation(near, far);
        self.set_mut(kind, near).add(near, far);
        self.set_mut(kind.mirror(), far).add(near, far);
    }

    /// Breadth first traversal from `start`, which gets level `offset`. Every reached vertex gets a level
    /// and every edge seen is classified. Returns the reached vertices in discovery order.
    pub fn bfs_classify(&mut self, graph: &impl Graph, start: Vertex, offset: usize) -> Vec<Vertex> {
        assert!(!self.is_discovered(start), "{start} already has a level");
        self.levels[start] = offset;
        let mut order = vec![start];
        let mut q = VecDeque::from([start]);
        while let Some(u) = q.pop_front() {
            for v in graph.neighbors(u) {
                if !self.is_discovered(v) {
                    self.levels[v] = self.levels[u] + 1;
                    order.push(v);
                    q.push_back(v);
                }
                self.classify(u, v);
            }
        }
        log::trace!("bfs from {start} (offset {offset}) reached {} vertices", order.len());
        order
    }

    /// Checks that every edge of the graph plus the artificial ones sits in exactly the bucket pair implied
    /// by the levels, that adjacent levels differ by at most one, and that buckets hold nothing else.
    pub fn check(
        &self,
        graph: &impl Graph,
        artificial: &HashSet<(Vertex, Vertex)>,
    ) -> Result<(), String> {
        let n = self.len();
        for u in 0..n {
            if !self.is_discovered(u) {
                return Err(format!("vertex {u} has no level"));
            }
            for v in graph.neighbors(u).chain(
                artificial
                    .iter()
                    .filter(|e| e.0 == u || e.1 == u)
                    .map(|e| EdgeSet::other_end(e, u)),
            ) {
                if self.levels[u].abs_diff(self.levels[v]) > 1 {
                    return Err(format!(
                        "edge ({u}, {v}) spans levels {} and {}",
                        self.levels[u], self.levels[v]
                    ));
                }
                let kind = self.relation(u, v);
                if !self.set(kind, u).contains(u, v) {
                    return Err(format!("edge ({u}, {v}) missing from {kind:?}[{u}]"));
                }
            }
            for kind in [SetKind::Alpha, SetKind::Beta, SetKind::Gamma] {
                for e in self.set(kind, u) {
                    let v = EdgeSet::other_end(e, u);
                    if !graph.has_edge(u, v) && !artificial.contains(e) {
                        return Err(format!("{kind:?}[{u}] holds unknown edge {e:?}"));
                    }
                    if self.relation(u, v) != kind {
                        return Err(format!("{kind:?}[{u}] holds misclassified edge {e:?}"));
                    }
                    if !self.set(kind.mirror(), v).contains(u, v) {
                        return Err(format!("edge {e:?} in {kind:?}[{u}] but not in {:?}[{v}]", kind.mirror()));
                    }
                }
            }
        }
        Ok(())
    }
}
