use std::cell::Cell;
use std::collections::BTreeSet;
use std::sync::{LazyLock, Mutex};

use decremental_conn::{
    layering::{Layering, SetKind},
    AdjacencyGraph, DecrementalConnectivity, DynGraph, Edge, Graph, Vertex,
};
use flexi_logger::{Logger, LoggerHandle};
use scopeguard::{OnUnwind, ScopeGuard};

pub mod gen;

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .set_palette("196;208;3;7;8".to_owned())
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}

/// Logs the structure if the test panics while holding it.
#[allow(dead_code)]
pub fn guard<T: std::fmt::Debug>(t: T) -> ScopeGuard<T, impl FnOnce(T), OnUnwind> {
    scopeguard::guard_on_unwind(t, |t| log::error!("Crash with {t:?}"))
}

/// Graph that counts the edges handed out one at a time through `next_neighbor`.
#[allow(dead_code)]
#[derive(Debug)]
pub struct CountingGraph {
    pub inner: AdjacencyGraph,
    pub pulls: Cell<usize>,
}

#[allow(dead_code)]
impl CountingGraph {
    pub fn new(inner: AdjacencyGraph) -> Self {
        Self {
            inner,
            pulls: Cell::new(0),
        }
    }

    /// Pulls since the last call.
    pub fn take_pulls(&self) -> usize {
        self.pulls.replace(0)
    }
}

impl Graph for CountingGraph {
    fn num_vertices(&self) -> usize {
        self.inner.num_vertices()
    }

    fn num_edges(&self) -> usize {
        self.inner.num_edges()
    }

    fn out_edges(&self, v: Vertex) -> impl Iterator<Item = Edge> + '_ {
        self.inner.out_edges(v)
    }

    fn next_neighbor(&self, v: Vertex, after: Option<Vertex>) -> Option<Vertex> {
        self.pulls.set(self.pulls.get() + 1);
        self.inner.next_neighbor(v, after)
    }

    fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.inner.has_edge(u, v)
    }

    fn remove_edge(&mut self, edge: Edge) -> bool {
        self.inner.remove_edge(edge)
    }
}

/// Brute force connectivity, recomputed on every query.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Dumb {
    adj: Vec<BTreeSet<usize>>,
}

#[allow(dead_code)]
impl Dumb {
    pub fn new(g: &impl Graph) -> Self {
        Self {
            adj: (0..g.num_vertices())
                .map(|u| g.neighbors(u).collect())
                .collect(),
        }
    }

    /// Group id of every vertex, ids starting from 1.
    pub fn groups(&self) -> Vec<usize> {
        let mut groups = vec![0; self.adj.len()];
        let mut group_id = 0;
        for u in 0..self.adj.len() {
            if groups[u] == 0 {
                group_id += 1;
                groups[u] = group_id;
                let mut stack = vec![u];
                while let Some(u) = stack.pop() {
                    stack.extend(self.adj[u].iter().copied().filter(|&v| {
                        if groups[v] == 0 {
                            groups[v] = group_id;
                            true
                        } else {
                            false
                        }
                    }));
                }
            }
        }
        groups
    }
}

#[allow(dead_code)]
impl DecrementalConnectivity for Dumb {
    fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        self.adj[u].remove(&v) && self.adj[v].remove(&u)
    }

    fn is_connected(&self, u: usize, v: usize) -> bool {
        let mut seen = BTreeSet::new();
        let mut stack = vec![u];
        while let Some(u) = stack.pop() {
            if u == v {
                return true;
            }
            if seen.insert(u) {
                stack.extend(self.adj[u].iter().copied());
            }
        }
        false
    }
}

/// Every pair is connected in `t` iff it is in `oracle`.
#[allow(dead_code)]
pub fn assert_same_connectivity(t: &impl DecrementalConnectivity, oracle: &Dumb) {
    let gs = oracle.groups();
    let n = t.num_vertices();
    for u in 0..n {
        for v in 0..n {
            assert_eq!(
                t.is_connected(u, v),
                gs[u] == gs[v],
                "u {u} v {v} groups {gs:?}"
            );
        }
    }
}

#[allow(dead_code)]
pub fn assert_layering(t: &DynGraph<AdjacencyGraph>) {
    if let Err(e) = t.check_layering() {
        panic!("{e}\n{t:?}");
    }
}

/// Levels plus sorted bucket contents of every vertex, in the order alpha, beta, gamma.
#[allow(dead_code)]
pub type Snapshot = (Vec<usize>, Vec<[BTreeSet<(usize, usize)>; 3]>);

#[allow(dead_code)]
pub fn snapshot(l: &Layering) -> Snapshot {
    let buckets: Vec<[BTreeSet<(usize, usize)>; 3]> = (0..l.len())
        .map(|v| {
            [SetKind::Alpha, SetKind::Beta, SetKind::Gamma]
                .map(|kind| l.set(kind, v).iter().copied().collect())
        })
        .collect();
    (l.levels().to_vec(), buckets)
}

/// The snapshot with the edge (u, v) taken out of every bucket.
#[allow(dead_code)]
pub fn without_edge(mut s: Snapshot, u: usize, v: usize) -> Snapshot {
    let e = (u.min(v), u.max(v));
    for sets in s.1.iter_mut() {
        for set in sets.iter_mut() {
            set.remove(&e);
        }
    }
    s
}
