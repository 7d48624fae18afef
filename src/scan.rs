//! Resumable depth first scan, advanced one unit of work at a time so that it can be interleaved with
//! other computations.

use std::collections::HashSet;

use crate::graph::{Edge, Graph, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Uninitialized,
    /// Next step pops a vertex from the frontier.
    ExamineVertex,
    /// Next step looks at one edge of the current vertex.
    ExamineEdge,
    Finished,
}

#[derive(Debug, Clone)]
pub struct StepScanDFS {
    state: ScanState,
    start: Vertex,
    target: Option<Vertex>,
    /// Hashed so a scan of a small component only pays for what it touches.
    visited: HashSet<Vertex>,
    stack: Vec<Vertex>,
    current: Vertex,
    /// Last neighbor of `current` examined, None right after `current` is popped.
    cursor: Option<Vertex>,
    component: Vec<Vertex>,
    tree_edges: Vec<Edge>,
    result: bool,
    steps: usize,
}

impl StepScanDFS {
    /// Scans the whole component of `start`.
    pub fn new(start: Vertex) -> Self {
        Self {
            state: ScanState::Uninitialized,
            start,
            target: None,
            visited: HashSet::new(),
            stack: Vec::new(),
            current: start,
            cursor: None,
            component: Vec::new(),
            tree_edges: Vec::new(),
            result: false,
            steps: 0,
        }
    }

    /// Scans from `start` until `target` is found or the component of `start` is exhausted.
    pub fn with_target(start: Vertex, target: Vertex) -> Self {
        let mut scan = Self::new(start);
        scan.target = Some(target);
        if start == target {
            scan.visited.insert(start);
            scan.component.push(start);
            scan.result = true;
            scan.state = ScanState::Finished;
        }
        scan
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == ScanState::Finished
    }

    /// Whether the target was found. Always false in whole component mode.
    pub fn result(&self) -> bool {
        self.result
    }

    /// Vertices discovered so far, in discovery order. Once finished without finding the target, this is
    /// the whole component of the start vertex.
    pub fn component(&self) -> &[Vertex] {
        &self.component
    }

    pub(crate) fn take_component(&mut self) -> Vec<Vertex> {
        std::mem::take(&mut self.component)
    }

    /// The edge through which each vertex other than the start was discovered.
    pub fn tree_edges(&self) -> &[Edge] {
        &self.tree_edges
    }

    pub fn is_visited(&self, v: Vertex) -> bool {
        self.visited.contains(&v)
    }

    /// Number of `advance` calls that did work.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Performs exactly one unit of work: pops a vertex, or looks at a single one of its edges. Does nothing
    /// once finished.
    pub fn advance(&mut self, graph: &impl Graph) {
        if !self.is_finished() {
            self.steps += 1;
        }
        match self.state {
            ScanState::Uninitialized => {
                self.visited.insert(self.start);
                self.component.push(self.start);
                self.stack.push(self.start);
                self.state = ScanState::ExamineVertex;
            }
            ScanState::ExamineVertex => match self.stack.pop() {
                Some(u) => {
                    self.current = u;
                    self.cursor = None;
                    self.state = ScanState::ExamineEdge;
                }
                None => {
                    log::trace!(
                        "scan from {} exhausted after {} vertices",
                        self.start,
                        self.component.len()
                    );
                    self.result = false;
                    self.state = ScanState::Finished;
                }
            },
            ScanState::ExamineEdge => match graph.next_neighbor(self.current, self.cursor) {
                Some(w) => {
                    self.cursor = Some(w);
                    if self.visited.insert(w) {
                        self.component.push(w);
                        self.tree_edges.push(Edge::new(self.current, w));
                        if self.target == Some(w) {
                            log::trace!("scan from {} reached {w}", self.start);
                            self.result = true;
                            self.state = ScanState::Finished;
                        } else {
                            self.stack.push(w);
                        }
                    }
                }
                None => self.state = ScanState::ExamineVertex,
            },
            ScanState::Finished => {}
        }
    }

    /// Advances until finished.
    pub fn run(&mut self, graph: &impl Graph) {
        while !self.is_finished() {
            self.advance(graph);
        }
    }
}

/// Spanning tree of the component of `start`, made of the edges a whole component scan discovers
/// vertices through.
pub fn dfs_tree(graph: &impl Graph, start: Vertex) -> Vec<Edge> {
    let mut scan = StepScanDFS::new(start);
    scan.run(graph);
    scan.tree_edges
}
