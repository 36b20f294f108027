//! Heuristic traveling-salesman tour construction and local-search
//! improvement.
//!
//! Named in the system overview's component table but never given its own
//! `§4` subsection in the distilled spec; this module's shape is supplied
//! by `SPEC_FULL.md §4.10`: cheapest-insertion construction over a
//! symmetric distance callback, followed by 2-opt local search, exposing
//! the tour as the crate's own [`Path`] (a cycle: `Path::is_cycle() ==
//! true`) so it composes with everything else that reads a `Path` back
//! (isomorphism fixtures, `PathGraph`).

use either::Either;

use crate::graph::GraphCapability;
use crate::id::{ArcId, NodeId};
use crate::path::Path;

/// A symmetric distance callback: `d(u, v) == d(v, u)` is assumed but not
/// checked (the caller's responsibility, matching the "pure callback"
/// contract the rest of the crate holds cost/capacity/heuristic callbacks
/// to).
pub trait Distance {
    fn distance(&mut self, u: NodeId, v: NodeId) -> f64;
}

impl<F> Distance for F
where
    F: FnMut(NodeId, NodeId) -> f64,
{
    fn distance(&mut self, u: NodeId, v: NodeId) -> f64 {
        self(u, v)
    }
}

/// Lets a caller pick, at construction time, between two distance sources
/// (commonly a cheap precomputed matrix lookup and a fallback callback for
/// pairs the matrix doesn't cover) without paying for a `Box<dyn
/// Distance>`: `Either`'s two variants are matched directly in the hot
/// `distance` call.
impl<L, R> Distance for Either<L, R>
where
    L: Distance,
    R: Distance,
{
    fn distance(&mut self, u: NodeId, v: NodeId) -> f64 {
        match self {
            Either::Left(l) => l.distance(u, v),
            Either::Right(r) => r.distance(u, v),
        }
    }
}

/// Configuration for the 2-opt improvement phase: an iteration budget
/// rather than a hidden constant, matching the cooperative-`Step` model
/// the rest of the crate follows (`§5`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOptConfig {
    /// Maximum number of full passes over all candidate edge pairs before
    /// giving up even if an improving swap might still exist.
    pub max_passes: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        TwoOptConfig { max_passes: 64 }
    }
}

/// The constructed tour: the candidate-node cycle, its realizing arcs (an
/// arc per consecutive pair, looked up from the graph on construction), and
/// its total length under the same distance callback used to build it.
pub struct Tour {
    order: Vec<NodeId>,
    length: f64,
}

impl Tour {
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Present the tour as a [`Path`] over `graph`: every consecutive pair
    /// of tour nodes must be joined by some arc of `graph` (a complete
    /// graph view is the common case), found by scanning that node's
    /// incident arcs once per edge. Returns `None` if a required arc is
    /// missing — the tour was built over a different candidate set.
    pub fn as_path<G: GraphCapability + ?Sized>(&self, graph: &G) -> Option<Path> {
        if self.order.len() < 2 {
            return None;
        }
        let mut arcs = Vec::with_capacity(self.order.len());
        for window in self.order.windows(2) {
            let (u, v) = (window[0], window[1]);
            arcs.push(find_arc(graph, u, v)?);
        }
        arcs.push(find_arc(graph, *self.order.last().unwrap(), self.order[0])?);
        let mut nodes = self.order.clone();
        nodes.push(self.order[0]);
        Some(Path::from_nodes_and_arcs(nodes, arcs))
    }
}

fn find_arc<G: GraphCapability + ?Sized>(graph: &G, u: NodeId, v: NodeId) -> Option<ArcId> {
    graph
        .incident(u, crate::id::ArcFilter::All)
        .find(|&arc| graph.other(arc, u) == v)
}

/// Build an initial tour over `nodes` by cheapest insertion: start from a
/// 2-node tour on the first two candidates, then repeatedly insert the
/// remaining node whose cheapest insertion point (minimizing the
/// length increase of breaking one tour edge to splice it in) is smallest.
pub fn cheapest_insertion<D: Distance>(nodes: &[NodeId], mut d: D) -> Tour {
    if nodes.len() < 2 {
        return Tour {
            order: nodes.to_vec(),
            length: 0.0,
        };
    }

    let mut order = vec![nodes[0], nodes[1]];
    let mut remaining: Vec<NodeId> = nodes[2..].to_vec();

    while !remaining.is_empty() {
        let mut best: Option<(usize, usize, f64)> = None; // (remaining idx, insert-after idx, extra cost)
        for (ri, &candidate) in remaining.iter().enumerate() {
            for i in 0..order.len() {
                let a = order[i];
                let b = order[(i + 1) % order.len()];
                let extra = d.distance(a, candidate) + d.distance(candidate, b) - d.distance(a, b);
                if best.map(|(_, _, e)| extra < e).unwrap_or(true) {
                    best = Some((ri, i, extra));
                }
            }
        }
        let (ri, insert_after, _) = best.expect("remaining is non-empty");
        let candidate = remaining.remove(ri);
        order.insert(insert_after + 1, candidate);
    }

    let length = tour_length(&order, &mut d);
    Tour { order, length }
}

fn tour_length<D: Distance>(order: &[NodeId], d: &mut D) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..order.len() {
        let a = order[i];
        let b = order[(i + 1) % order.len()];
        total += d.distance(a, b);
    }
    total
}

/// Improve `tour` in place by repeated 2-opt edge-pair reversal: for every
/// pair of non-adjacent tour edges `(a,b)` and `(c,d)`, replacing them with
/// `(a,c)` and `(b,d)` (reversing the segment between `b` and `c`) whenever
/// that strictly shortens the tour. Iterates until a full pass finds no
/// improving swap or `config.max_passes` passes have run.
pub fn two_opt<D: Distance>(tour: &mut Tour, mut d: D, config: TwoOptConfig) {
    let n = tour.order.len();
    if n < 4 {
        return;
    }
    for _ in 0..config.max_passes {
        let mut improved = false;
        for i in 0..n - 1 {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue; // adjacent through the wraparound edge
                }
                let a = tour.order[i];
                let b = tour.order[i + 1];
                let c = tour.order[j];
                let e = tour.order[(j + 1) % n];

                let before = d.distance(a, b) + d.distance(c, e);
                let after = d.distance(a, c) + d.distance(b, e);
                if after + 1e-9 < before {
                    tour.order[i + 1..=j].reverse();
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    tour.length = tour_length(&tour.order, &mut d);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, MutableGraph};
    use crate::id::Directedness;

    /// Four points on a unit square; the optimal tour is the square's
    /// perimeter, length 4.0, and should survive cheapest insertion + 2-opt
    /// regardless of input order.
    fn square() -> (Vec<NodeId>, Vec<(f64, f64)>) {
        let positions = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        (vec![], positions)
    }

    #[test]
    fn cheapest_insertion_then_two_opt_finds_the_perimeter() {
        let (_, positions) = square();
        let mut g = Graph::new();
        let nodes: Vec<NodeId> = (0..4).map(|_| g.add_node()).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                g.add_arc(nodes[i], nodes[j], Directedness::Undirected).unwrap();
            }
        }

        let dist = |u: NodeId, v: NodeId| -> f64 {
            let (ux, uy) = positions[nodes.iter().position(|&n| n == u).unwrap()];
            let (vx, vy) = positions[nodes.iter().position(|&n| n == v).unwrap()];
            ((ux - vx).powi(2) + (uy - vy).powi(2)).sqrt()
        };

        // Deliberately scramble the candidate order so insertion has work
        // to do.
        let scrambled = vec![nodes[0], nodes[2], nodes[1], nodes[3]];
        let mut tour = cheapest_insertion(&scrambled, dist);
        two_opt(&mut tour, dist, TwoOptConfig::default());

        assert!((tour.length() - 4.0).abs() < 1e-6);
        let path = tour.as_path(&g).unwrap();
        assert!(path.is_cycle());
    }

    #[test]
    fn empty_and_singleton_tours_are_trivial() {
        let mut g = Graph::new();
        let a = g.add_node();
        let tour = cheapest_insertion(&[a], |_, _| 1.0);
        assert_eq!(tour.length(), 0.0);
        assert!(tour.as_path(&g).is_none());

        let empty = cheapest_insertion(&[], |_, _| 1.0);
        assert_eq!(empty.length(), 0.0);
    }

    #[test]
    fn either_distance_dispatches_to_the_active_variant() {
        let make = |pick_left: bool| -> Either<fn(NodeId, NodeId) -> f64, fn(NodeId, NodeId) -> f64> {
            if pick_left {
                Either::Left(|_, _| 2.0)
            } else {
                Either::Right(|_, _| 5.0)
            }
        };
        let mut left = make(true);
        assert_eq!(left.distance(NodeId::end(), NodeId::end()), 2.0);
        let mut right = make(false);
        assert_eq!(right.distance(NodeId::end(), NodeId::end()), 5.0);
    }
}
