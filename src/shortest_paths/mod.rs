//! The shortest-path family: a generic Dijkstra (`Sum`/`Maximum` modes),
//! Bellman-Ford, A*, bidirectional Dijkstra, and edge/node-disjoint
//! shortest paths, all built on the crate's own [`crate::queue::PriorityQueue`].
//!
//! Every algorithm here is a `Step`/`Run`/`RunUntilFixed`-advanced finite
//! state object rather than a free function: construction only wires up
//! the graph, cost callback, and mode; no work happens until the caller
//! steps it, matching the cooperative single-threaded scheduling model the
//! rest of the crate follows (see [`CancellationToken`]).

mod astar;
mod bellman_ford;
mod bidirectional;
mod dijkstra;
mod disjoint_paths;

pub use astar::AStar;
pub use bellman_ford::BellmanFord;
pub use bidirectional::BidirectionalDijkstra;
pub use dijkstra::{Dijkstra, DijkstraMode, IncrementalDijkstra, IncrementalStatus};
pub use disjoint_paths::{disjoint_paths, DisjointPathsKind};

use std::sync::atomic::{AtomicBool, Ordering};

/// A reusable, cooperative cancellation flag.
///
/// Checked once per `Step` inside every `Run`/`RunUntilFixed` loop in this
/// module. Setting it mid-run leaves the algorithm's distance/parent-arc
/// tables exactly as they stood after the last completed step: partial,
/// but internally consistent and safe to read.
#[derive(Debug, Default)]
pub struct CancellationToken(AtomicBool);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(AtomicBool::new(false))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Reset the token so the same instance can guard a subsequent run.
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
