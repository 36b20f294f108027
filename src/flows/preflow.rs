//! Highest-label push-relabel maximum flow.
//!
//! Edges (undirected arcs) are folded into the same residual bookkeeping
//! as directed arcs by letting an arc's stored flow range over `[-cap,
//! cap]` instead of `[0, cap]`: `residual_forward = cap - flow`,
//! `residual_backward = cap + flow` for an edge versus `flow` for a
//! directed arc. One `residual_and_other` helper covers both cases so the
//! discharge loop never branches on directedness.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::GraphResult;
use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;

/// Active-node selection policy. `Saturating` (the default) saturates
/// every arc out of the source at initialization and always discharges
/// the active node with the highest label, with the gap heuristic active.
/// `AugmentingPathLike` instead keeps the source's excess conceptually
/// unbounded and lets flow reach the active set lazily, one admissible
/// push at a time, closer to how repeated-augmenting-path solvers behave.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PreflowMode {
    Saturating,
    AugmentingPathLike,
}

pub struct Preflow<'a, G: ?Sized, M> {
    graph: &'a G,
    cap: HashMap<ArcId, M>,
    mode: PreflowMode,
    source: NodeId,
    sink: NodeId,

    flow: HashMap<ArcId, M>,
    excess: HashMap<NodeId, M>,
    label: HashMap<NodeId, usize>,
    label_count: HashMap<usize, usize>,
    active: VecDeque<NodeId>,
    active_set: HashSet<NodeId>,
    initialized: bool,
}

impl<'a, G, M> Preflow<'a, G, M>
where
    G: GraphCapability + ?Sized,
    M: Measure,
{
    pub fn new<C>(
        graph: &'a G,
        mut cap: C,
        source: NodeId,
        sink: NodeId,
        mode: PreflowMode,
    ) -> GraphResult<Self>
    where
        C: FnMut(ArcId) -> M,
    {
        let cap: HashMap<ArcId, M> = graph.arcs(ArcFilter::All).map(|a| (a, cap(a))).collect();
        if cap.values().any(|c| c.is_negative()) {
            return Err(crate::graph::precondition(
                "preflow requires every arc capacity to be nonnegative",
            ));
        }
        Ok(Preflow {
            graph,
            cap,
            mode,
            source,
            sink,
            flow: HashMap::new(),
            excess: HashMap::new(),
            label: HashMap::new(),
            label_count: HashMap::new(),
            active: VecDeque::new(),
            active_set: HashSet::new(),
            initialized: false,
        })
    }

    fn n(&self) -> usize {
        self.graph.node_count()
    }

    fn label_of(&self, node: NodeId) -> usize {
        self.label.get(&node).copied().unwrap_or(0)
    }

    fn excess_of(&self, node: NodeId) -> M {
        self.excess.get(&node).copied().unwrap_or_else(M::zero)
    }

    fn flow_of(&self, arc: ArcId) -> M {
        self.flow.get(&arc).copied().unwrap_or_else(M::zero)
    }

    /// Residual capacity leaving `from` along `arc`, and `arc`'s other
    /// endpoint.
    fn residual_and_other(&self, arc: ArcId, from: NodeId) -> (M, NodeId) {
        let u = self.graph.u(arc);
        let v = self.graph.v(arc);
        let f = self.flow_of(arc);
        let c = self.cap[&arc];
        if from == u {
            (c - f, v)
        } else {
            let back = if self.graph.is_edge(arc) { c + f } else { f };
            (back, u)
        }
    }

    fn push(&mut self, arc: ArcId, from: NodeId, delta: M) {
        let u = self.graph.u(arc);
        let entry = self.flow.entry(arc).or_insert_with(M::zero);
        if from == u {
            *entry = *entry + delta;
        } else {
            *entry = *entry - delta;
        }
    }

    fn activate(&mut self, node: NodeId) {
        if node == self.source || node == self.sink {
            return;
        }
        if self.excess_of(node) > M::zero() && self.active_set.insert(node) {
            self.active.push_back(node);
        }
    }

    fn relabel(&mut self, node: NodeId, new_label: usize) {
        let old_label = self.label_of(node);
        if let Some(count) = self.label_count.get_mut(&old_label) {
            *count = count.saturating_sub(1);
            if *count == 0 && self.mode == PreflowMode::Saturating {
                self.apply_gap(old_label);
            }
        }
        self.label.insert(node, new_label);
        *self.label_count.entry(new_label).or_insert(0) += 1;
    }

    /// Gap heuristic: once no node carries `old_label`, every node with a
    /// label strictly between `old_label` and `n` cannot reach the sink in
    /// the residual graph; jump it straight to `n + 1` so it stops being
    /// considered for further pushes toward the sink and instead drains
    /// back toward the source.
    fn apply_gap(&mut self, old_label: usize) {
        let n = self.n();
        let bumped: Vec<NodeId> = self
            .label
            .iter()
            .filter(|&(&node, &l)| {
                node != self.source && node != self.sink && l > old_label && l < n
            })
            .map(|(&node, _)| node)
            .collect();
        for node in bumped {
            let old = self.label_of(node);
            if let Some(count) = self.label_count.get_mut(&old) {
                *count = count.saturating_sub(1);
            }
            self.label.insert(node, n + 1);
            *self.label_count.entry(n + 1).or_insert(0) += 1;
        }
    }

    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let n = self.n();
        self.label.insert(self.source, n);
        *self.label_count.entry(n).or_insert(0) += 1;
        *self.label_count.entry(0).or_insert(0) += n.saturating_sub(1);

        if self.mode == PreflowMode::Saturating {
            let arcs: Vec<ArcId> = self.graph.incident(self.source, ArcFilter::All).collect();
            for arc in arcs {
                let (r, other) = self.residual_and_other(arc, self.source);
                if r > M::zero() {
                    self.push(arc, self.source, r);
                    let e = self.excess_of(other) + r;
                    self.excess.insert(other, e);
                    self.activate(other);
                }
            }
        } else {
            // AugmentingPathLike: the source itself is discharged as if
            // it carried unbounded excess, one admissible push at a time.
            self.active.push_back(self.source);
            self.active_set.insert(self.source);
        }
    }

    /// Discharge one active node fully: push along every admissible
    /// residual arc, relabeling and retrying until its excess is drained
    /// or it becomes disconnected from the sink. Returns the discharged
    /// node, or `None` once no active node remains.
    pub fn step(&mut self) -> GraphResult<Option<NodeId>> {
        self.initialize();
        let Some(u) = self.active.pop_front() else {
            return Ok(None);
        };
        self.active_set.remove(&u);
        #[cfg(feature = "tracing")]
        tracing::trace!(node = ?u, label = self.label_of(u), "preflow discharge");
        self.discharge(u);
        Ok(Some(u))
    }

    fn discharge(&mut self, u: NodeId) {
        let unbounded = self.mode == PreflowMode::AugmentingPathLike && u == self.source;
        loop {
            if !unbounded && self.excess_of(u) <= M::zero() {
                return;
            }
            let arcs: Vec<ArcId> = self.graph.incident(u, ArcFilter::All).collect();
            let mut pushed_any = false;
            for arc in arcs.iter().copied() {
                if !unbounded && self.excess_of(u) <= M::zero() {
                    break;
                }
                let (r, other) = self.residual_and_other(arc, u);
                if r > M::zero() && self.label_of(u) == self.label_of(other) + 1 {
                    let delta = if unbounded {
                        r
                    } else {
                        let e = self.excess_of(u);
                        if e < r {
                            e
                        } else {
                            r
                        }
                    };
                    if delta <= M::zero() {
                        continue;
                    }
                    self.push(arc, u, delta);
                    if !unbounded {
                        let eu = self.excess_of(u) - delta;
                        self.excess.insert(u, eu);
                    }
                    let eo = self.excess_of(other) + delta;
                    self.excess.insert(other, eo);
                    self.activate(other);
                    pushed_any = true;
                }
            }
            if pushed_any {
                if unbounded || self.excess_of(u) > M::zero() {
                    continue;
                }
                return;
            }
            // Relabel: one more than the minimum label across arcs with
            // positive residual capacity.
            let min_label = arcs
                .iter()
                .filter_map(|&arc| {
                    let (r, other) = self.residual_and_other(arc, u);
                    if r > M::zero() {
                        Some(self.label_of(other))
                    } else {
                        None
                    }
                })
                .min();
            match min_label {
                Some(m) => self.relabel(u, m + 1),
                None => {
                    // Disconnected from the sink; park it at n + 1 so the
                    // gap heuristic and future scans leave it alone.
                    self.relabel(u, self.n() + 1);
                    if unbounded {
                        return;
                    }
                }
            }
            if unbounded {
                continue;
            }
            if self.excess_of(u) <= M::zero() {
                return;
            }
        }
    }

    pub fn run(&mut self) -> GraphResult<()> {
        while self.step()?.is_some() {}
        Ok(())
    }

    pub fn get_flow(&self, arc: ArcId) -> M {
        self.flow_of(arc)
    }

    pub fn flow_value(&self) -> M {
        self.excess_of(self.sink)
    }

    /// The source side of the minimum cut: nodes reachable from the
    /// source in the residual graph after termination.
    pub fn cut(&self) -> HashSet<NodeId> {
        let mut reached = HashSet::new();
        let mut queue = VecDeque::new();
        reached.insert(self.source);
        queue.push_back(self.source);
        while let Some(u) = queue.pop_front() {
            let arcs: Vec<ArcId> = self.graph.incident(u, ArcFilter::All).collect();
            for arc in arcs {
                let (r, other) = self.residual_and_other(arc, u);
                if r > M::zero() && reached.insert(other) {
                    queue.push_back(other);
                }
            }
        }
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn s4_preflow_max_flow_and_min_cut() {
        let mut g = ConcreteGraph::new();
        let s = g.add_node();
        let u = g.add_node();
        let v = g.add_node();
        let t = g.add_node();
        let mut cap = HashMap::new();
        let su = g.add_arc(s, u, Directedness::Directed).unwrap();
        let sv = g.add_arc(s, v, Directedness::Directed).unwrap();
        let uv = g.add_arc(u, v, Directedness::Directed).unwrap();
        let ut = g.add_arc(u, t, Directedness::Directed).unwrap();
        let vt = g.add_arc(v, t, Directedness::Directed).unwrap();
        cap.insert(su, 10i64);
        cap.insert(sv, 5i64);
        cap.insert(uv, 15i64);
        cap.insert(ut, 10i64);
        cap.insert(vt, 10i64);

        let mut pf = Preflow::new(&g, |arc| cap[&arc], s, t, PreflowMode::Saturating).unwrap();
        pf.run().unwrap();
        assert_eq!(pf.flow_value(), 15);

        let s_side = pf.cut();
        assert!(s_side.contains(&s));
        assert!(s_side.contains(&u));
        assert!(!s_side.contains(&t));
    }

    #[test]
    fn conservation_holds_at_every_internal_node() {
        let mut g = ConcreteGraph::new();
        let s = g.add_node();
        let a = g.add_node();
        let t = g.add_node();
        let mut cap = HashMap::new();
        let sa = g.add_arc(s, a, Directedness::Directed).unwrap();
        let at = g.add_arc(a, t, Directedness::Directed).unwrap();
        cap.insert(sa, 7i64);
        cap.insert(at, 3i64);

        let mut pf = Preflow::new(&g, |arc| cap[&arc], s, t, PreflowMode::Saturating).unwrap();
        pf.run().unwrap();
        assert_eq!(pf.flow_value(), 3);
        assert_eq!(pf.get_flow(at), 3);
    }
}
