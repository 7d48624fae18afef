//! Repairs the layering after an edge deletion by promoting the vertices that lost their last edge
//! towards the root, one unit of work per step.

use std::collections::VecDeque;

use derivative::Derivative;

use crate::change_record::{ChangeRecord, UndoLog};
use crate::edge_set::EdgeSet;
use crate::graph::Vertex;
use crate::layering::{Layering, SetKind};

/// The eight steps of processing one promoted vertex `w`, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvalancheStep {
    Dequeue,
    /// levels[w] += 1
    Bump,
    /// Starts the walk over beta[w].
    CollectSiblings,
    /// A sibling of w now sits one level below it: beta -> gamma on the sibling's side.
    DemoteSibling,
    /// beta[w] becomes alpha[w].
    SiblingsToAlpha,
    /// Starts the walk over gamma[w].
    CollectChildren,
    /// A child of w is now on w's level: alpha -> beta on the child's side.
    PromoteChild,
    /// gamma[w] becomes beta[w].
    ChildrenToBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairState {
    InitialCheckLevels,
    InitialDifferentLevels,
    InitLevelAvalanche,
    Avalanche(AvalancheStep),
    Finished,
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct AvalancheRepair {
    state: RepairState,
    /// Endpoints of the removed edge. Once levels differ, `u` is the lower one.
    u: Vertex,
    v: Vertex,
    queue: VecDeque<Vertex>,
    current: Vertex,
    /// Last edge of the bucket of `current` being walked.
    #[derivative(Debug = "ignore")]
    cursor: Option<(Vertex, Vertex)>,
    record_changes: bool,
    steps: usize,
}

impl AvalancheRepair {
    /// `u` and `v` are the endpoints of an edge already removed from the graph, but still in the buckets.
    pub fn new(u: Vertex, v: Vertex) -> Self {
        Self {
            state: RepairState::InitialCheckLevels,
            u,
            v,
            queue: VecDeque::new(),
            current: v,
            cursor: None,
            record_changes: true,
            steps: 0,
        }
    }

    pub fn state(&self) -> RepairState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == RepairState::Finished
    }

    pub fn is_recording(&self) -> bool {
        self.record_changes
    }

    /// From now on mutations are not logged, so they can no longer be rewound.
    pub fn stop_recording(&mut self) {
        self.record_changes = false;
    }

    /// Number of `advance` calls that did work.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn record(&self, undo: &mut UndoLog, record: ChangeRecord) {
        if self.record_changes {
            undo.push(record);
        }
    }

    /// Removes (v, u) from bucket `set` of v.
    fn remove(&self, l: &mut Layering, undo: &mut UndoLog, v: Vertex, u: Vertex, set: SetKind) {
        let removed = l.set_mut(set, v).remove(v, u);
        debug_assert!(removed, "({v}, {u}) not in {set:?}[{v}]");
        self.record(undo, ChangeRecord::Remove { v, u, set });
    }

    /// Adds (v, u) to bucket `set` of v.
    fn insert(&self, l: &mut Layering, undo: &mut UndoLog, v: Vertex, u: Vertex, set: SetKind) {
        l.set_mut(set, v).add(v, u);
        self.record(undo, ChangeRecord::Insert { v, u, set });
    }

    /// Performs one unit of work. Does nothing once finished.
    pub fn advance(&mut self, l: &mut Layering, undo: &mut UndoLog) {
        use AvalancheStep::*;
        if self.is_finished() {
            return;
        }
        self.steps += 1;
        let (u, v) = (self.u, self.v);
        self.state = match self.state {
            RepairState::InitialCheckLevels => {
                if l.levels[u] == l.levels[v] {
                    self.remove(l, undo, u, v, SetKind::Beta);
                    self.remove(l, undo, v, u, SetKind::Beta);
                    RepairState::Finished
                } else {
                    RepairState::InitialDifferentLevels
                }
            }
            RepairState::InitialDifferentLevels => {
                if l.levels[u] > l.levels[v] {
                    std::mem::swap(&mut self.u, &mut self.v);
                }
                let (u, v) = (self.u, self.v);
                self.remove(l, undo, u, v, SetKind::Gamma);
                self.remove(l, undo, v, u, SetKind::Alpha);
                if l.alpha[v].is_empty() {
                    RepairState::InitLevelAvalanche
                } else {
                    RepairState::Finished
                }
            }
            RepairState::InitLevelAvalanche => {
                log::trace!("{v} lost its last parent, starting avalanche");
                self.queue.push_back(v);
                RepairState::Avalanche(Dequeue)
            }
            RepairState::Avalanche(Dequeue) => match self.queue.pop_front() {
                Some(w) => {
                    self.current = w;
                    RepairState::Avalanche(Bump)
                }
                None => RepairState::Finished,
            },
            RepairState::Avalanche(Bump) => {
                let w = self.current;
                l.levels[w] += 1;
                self.record(undo, ChangeRecord::LevelBump(w));
                RepairState::Avalanche(CollectSiblings)
            }
            RepairState::Avalanche(CollectSiblings) => {
                self.cursor = None;
                RepairState::Avalanche(DemoteSibling)
            }
            // Only the buckets of the neighbor change, so beta[w] stays put during the walk.
            RepairState::Avalanche(DemoteSibling) => match l.beta[self.current].next_after(self.cursor) {
                Some(e) => {
                    self.cursor = Some(e);
                    let w = self.current;
                    let x = EdgeSet::other_end(&e, w);
                    self.remove(l, undo, x, w, SetKind::Beta);
                    self.insert(l, undo, x, w, SetKind::Gamma);
                    RepairState::Avalanche(DemoteSibling)
                }
                None => RepairState::Avalanche(SiblingsToAlpha),
            },
            RepairState::Avalanche(SiblingsToAlpha) => {
                let w = self.current;
                let old_alpha = l.alpha[w].move_from(&mut l.beta[w]);
                self.record(undo, ChangeRecord::AlphaBetaMove { v: w, old_alpha });
                // Rewinding the marker first puts beta back from whatever alpha holds by then.
                self.record(undo, ChangeRecord::RestoreBeta(w));
                RepairState::Avalanche(CollectChildren)
            }
            RepairState::Avalanche(CollectChildren) => {
                self.cursor = None;
                RepairState::Avalanche(PromoteChild)
            }
            RepairState::Avalanche(PromoteChild) => match l.gamma[self.current].next_after(self.cursor) {
                Some(e) => {
                    self.cursor = Some(e);
                    let w = self.current;
                    let x = EdgeSet::other_end(&e, w);
                    self.remove(l, undo, x, w, SetKind::Alpha);
                    self.insert(l, undo, x, w, SetKind::Beta);
                    if l.alpha[x].is_empty() {
                        self.queue.push_back(x);
                    }
                    RepairState::Avalanche(PromoteChild)
                }
                None => RepairState::Avalanche(ChildrenToBeta),
            },
            RepairState::Avalanche(ChildrenToBeta) => {
                let w = self.current;
                let old_beta = l.beta[w].move_from(&mut l.gamma[w]);
                debug_assert!(old_beta.is_empty());
                self.record(undo, ChangeRecord::GammaEmptyMove(w));
                if l.alpha[w].is_empty() {
                    self.queue.push_back(w);
                }
                RepairState::Avalanche(Dequeue)
            }
            RepairState::Finished => RepairState::Finished,
        };
        log::trace!("avalanche repair -> {:?}", self.state);
    }
}
