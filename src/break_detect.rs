//! Detects whether removing an edge split its component, by scanning from both endpoints in lockstep.
//! The work done is proportional to the smaller of the two pieces.

use crate::graph::{Graph, Vertex};
use crate::scan::StepScanDFS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectState {
    /// The scanner from the first endpoint moves next.
    FirstBranch,
    SecondBranch,
    Finished,
}

#[derive(Debug, Clone)]
pub struct BreakDetector {
    state: DetectState,
    first: StepScanDFS,
    second: StepScanDFS,
    component_breaks: bool,
    small_component: Vec<Vertex>,
}

impl BreakDetector {
    /// `u` and `v` are the endpoints of an edge already removed from the graph.
    pub fn new(u: Vertex, v: Vertex) -> Self {
        Self {
            state: DetectState::FirstBranch,
            first: StepScanDFS::with_target(u, v),
            second: StepScanDFS::with_target(v, u),
            component_breaks: false,
            small_component: Vec::new(),
        }
    }

    pub fn state(&self) -> DetectState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == DetectState::Finished
    }

    /// Only meaningful once finished.
    pub fn component_breaks(&self) -> bool {
        self.component_breaks
    }

    /// The piece that got cut off, when the component breaks.
    pub fn small_component(&self) -> &[Vertex] {
        &self.small_component
    }

    pub fn into_small_component(self) -> Vec<Vertex> {
        self.small_component
    }

    /// Units of work done by both scanners together.
    pub fn steps(&self) -> usize {
        self.first.steps() + self.second.steps()
    }

    /// Steps one of the two scanners by one unit, alternating between them.
    pub fn advance(&mut self, graph: &impl Graph) {
        let scan = match self.state {
            DetectState::FirstBranch => &mut self.first,
            DetectState::SecondBranch => &mut self.second,
            DetectState::Finished => return,
        };
        scan.advance(graph);
        if scan.is_finished() {
            if !scan.result() {
                // It exhausted its side first, so that side is the smaller one.
                self.component_breaks = true;
                self.small_component = scan.take_component();
            }
            log::trace!(
                "break detection done, breaks: {}, small side: {} vertices",
                self.component_breaks,
                self.small_component.len()
            );
            self.state = DetectState::Finished;
        } else {
            self.state = match self.state {
                DetectState::FirstBranch => DetectState::SecondBranch,
                _ => DetectState::FirstBranch,
            };
        }
    }
}

/// For structures known to be acyclic, such as a spanning forest, where removing the edge (u, v) always
/// splits its component. The two scans are interleaved and the side whose scan finishes first gets the label
/// `new_id`; with both starting together, that side is never the larger one.
/// Returns the relabelled vertices, or `None` if u and v are still connected.
pub fn circuit_free_update_components(
    graph: &impl Graph,
    u: Vertex,
    v: Vertex,
    components: &mut [usize],
    new_id: usize,
) -> Option<Vec<Vertex>> {
    let mut detector = BreakDetector::new(u, v);
    while !detector.is_finished() {
        detector.advance(graph);
    }
    if !detector.component_breaks() {
        return None;
    }
    let small = detector.into_small_component();
    for &w in &small {
        components[w] = new_id;
    }
    Some(small)
}
