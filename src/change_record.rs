//! Reversible log of the elementary mutations the avalanche repair makes to a [`Layering`].

use std::fmt::Formatter;

use derivative::Derivative;

use crate::edge_set::EdgeSet;
use crate::graph::Vertex;
use crate::layering::{Layering, SetKind};

fn set_len_fmt(set: &EdgeSet, f: &mut Formatter) -> std::fmt::Result {
    write!(f, "<{} edges>", set.len())
}

fn alg_panic(record: &ChangeRecord) -> ! {
    panic!("rewind of {record:?} found the layering in a state it never produced")
}

/// One reversible primitive. `v` is always the vertex whose bucket or level changed.
#[derive(Derivative)]
#[derivative(Debug)]
pub enum ChangeRecord {
    /// `levels[v]` went up by one.
    LevelBump(Vertex),
    /// Edge (v, u) was added to bucket `set` of v.
    Insert { v: Vertex, u: Vertex, set: SetKind },
    /// Edge (v, u) was removed from bucket `set` of v.
    Remove { v: Vertex, u: Vertex, set: SetKind },
    /// beta[v] became alpha[v]. Carries what alpha[v] held before.
    AlphaBetaMove {
        v: Vertex,
        #[derivative(Debug(format_with = "set_len_fmt"))]
        old_alpha: EdgeSet,
    },
    /// Pushed right after [`ChangeRecord::AlphaBetaMove`]. Rewinding it moves alpha[v] back into beta[v].
    RestoreBeta(Vertex),
    /// Never pushed. Moving beta back into gamma is done by [`ChangeRecord::GammaEmptyMove`], whose
    /// rewind only reads beta after every later record has been undone.
    BetaGammaMove(Vertex),
    /// gamma[v] was moved into the (empty) beta[v], leaving gamma[v] empty.
    GammaEmptyMove(Vertex),
}

impl Layering {
    /// Undoes a single record. Must be called in reverse push order.
    pub fn rewind(&mut self, record: ChangeRecord) {
        log::trace!("rewind {record:?}");
        match record {
            ChangeRecord::LevelBump(v) => {
                self.levels[v] = self.levels[v]
                    .checked_sub(1)
                    .unwrap_or_else(|| alg_panic(&record));
            }
            ChangeRecord::Insert { v, u, set } => {
                if !self.set_mut(set, v).remove(v, u) {
                    alg_panic(&record)
                }
            }
            ChangeRecord::Remove { v, u, set } => self.set_mut(set, v).add(v, u),
            ChangeRecord::AlphaBetaMove { v, old_alpha } => {
                debug_assert!(self.alpha[v].is_empty());
                self.alpha[v] = old_alpha;
            }
            ChangeRecord::RestoreBeta(v) => {
                let old = self.beta[v].move_from(&mut self.alpha[v]);
                debug_assert!(old.is_empty());
            }
            ChangeRecord::GammaEmptyMove(v) => {
                let old = self.gamma[v].move_from(&mut self.beta[v]);
                debug_assert!(old.is_empty());
            }
            ChangeRecord::BetaGammaMove(_) => alg_panic(&record),
        }
    }
}

/// Records of a single deletion call, most recent last.
#[derive(Debug, Default)]
pub struct UndoLog(Vec<ChangeRecord>);

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, record: ChangeRecord) {
        log::trace!("record {record:?}");
        self.0.push(record);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Drops every record, keeping the mutations they describe.
    pub fn clear(&mut self) {
        self.0.clear();
    }
    /// Undoes every record, most recent first. Returns how many were undone.
    pub fn rewind_all(&mut self, layering: &mut Layering) -> usize {
        let count = self.0.len();
        while let Some(record) = self.0.pop() {
            layering.rewind(record);
        }
        count
    }
}
