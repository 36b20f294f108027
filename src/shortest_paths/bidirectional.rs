//! Bidirectional Dijkstra: two simultaneous single-source searches, one
//! over the forward arcs from the source and one over the backward arcs
//! from the target, meeting in the middle.
//!
//! Rather than materializing a [`crate::graph::Reversed`] view (which
//! would need a second borrow with its own lifetime, awkward to thread
//! through a single struct), the backward search just walks `Backward`
//! -filtered incidence on the same graph — the same traversal a
//! `Reversed` wrapper would produce, without the extra indirection.

use indexmap::IndexMap;
use num_traits::Bounded;

use crate::error::GraphResult;
use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;
use crate::path::Path;
use crate::queue::PriorityQueue;

pub struct BidirectionalDijkstra<'a, G: ?Sized, C, M> {
    graph: &'a G,
    cost: C,
    source: NodeId,
    target: NodeId,

    dist_f: IndexMap<NodeId, M>,
    parent_f: IndexMap<NodeId, ArcId>,
    fixed_f: IndexMap<NodeId, bool>,
    queue_f: PriorityQueue<NodeId, M>,

    dist_b: IndexMap<NodeId, M>,
    parent_b: IndexMap<NodeId, ArcId>,
    fixed_b: IndexMap<NodeId, bool>,
    queue_b: PriorityQueue<NodeId, M>,

    best: Option<M>,
    meeting: Option<NodeId>,
}

impl<'a, G, C, M> BidirectionalDijkstra<'a, G, C, M>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    pub fn new(graph: &'a G, source: NodeId, target: NodeId, cost: C) -> Self {
        let mut queue_f = PriorityQueue::new();
        queue_f.set(source, M::zero());
        let mut dist_f = IndexMap::new();
        dist_f.insert(source, M::zero());

        let mut queue_b = PriorityQueue::new();
        queue_b.set(target, M::zero());
        let mut dist_b = IndexMap::new();
        dist_b.insert(target, M::zero());

        BidirectionalDijkstra {
            graph,
            cost,
            source,
            target,
            dist_f,
            parent_f: IndexMap::new(),
            fixed_f: IndexMap::new(),
            queue_f,
            dist_b,
            parent_b: IndexMap::new(),
            fixed_b: IndexMap::new(),
            queue_b,
            best: None,
            meeting: None,
        }
    }

    fn update_meeting(&mut self, node: NodeId) {
        if let (Some(&df), Some(&db)) = (self.dist_f.get(&node), self.dist_b.get(&node)) {
            let candidate = df + db;
            if self.best.map(|b| candidate < b).unwrap_or(true) {
                self.best = Some(candidate);
                self.meeting = Some(node);
            }
        }
    }

    fn relax_forward(&mut self, u: NodeId) -> GraphResult<()> {
        let d_u = self.dist_f[&u];
        let arcs: Vec<ArcId> = self.graph.incident(u, ArcFilter::Forward).collect();
        for arc in arcs {
            let c = (self.cost)(arc);
            if c.is_negative() {
                return Err(crate::graph::precondition(
                    "bidirectional Dijkstra requires nonnegative arc costs",
                ));
            }
            let v = self.graph.other(arc, u);
            if self.fixed_f.contains_key(&v) {
                continue;
            }
            let new_d = d_u + c;
            let improves = self.dist_f.get(&v).map(|&d| new_d < d).unwrap_or(true);
            if improves {
                self.dist_f.insert(v, new_d);
                self.parent_f.insert(v, arc);
                self.queue_f.set(v, new_d);
            }
        }
        Ok(())
    }

    fn relax_backward(&mut self, u: NodeId) -> GraphResult<()> {
        let d_u = self.dist_b[&u];
        let arcs: Vec<ArcId> = self.graph.incident(u, ArcFilter::Backward).collect();
        for arc in arcs {
            let c = (self.cost)(arc);
            if c.is_negative() {
                return Err(crate::graph::precondition(
                    "bidirectional Dijkstra requires nonnegative arc costs",
                ));
            }
            let w = self.graph.other(arc, u);
            if self.fixed_b.contains_key(&w) {
                continue;
            }
            let new_d = d_u + c;
            let improves = self.dist_b.get(&w).map(|&d| new_d < d).unwrap_or(true);
            if improves {
                self.dist_b.insert(w, new_d);
                self.parent_b.insert(w, arc);
                self.queue_b.set(w, new_d);
            }
        }
        Ok(())
    }

    fn should_stop(&self) -> bool {
        match (self.queue_f.peek_priority(), self.queue_b.peek_priority(), self.best) {
            (Some(&pf), Some(&pb), Some(best)) => pf + pb >= best,
            (None, _, _) | (_, None, _) => true,
            _ => false,
        }
    }

    /// Advance both searches by one node each. Returns `false` once the
    /// termination rule fires (the sum of the two not-yet-fixed smallest
    /// priorities meets or exceeds the best known meeting distance).
    pub fn step(&mut self) -> GraphResult<bool> {
        if self.should_stop() {
            return Ok(false);
        }
        if let Some((u, _)) = self.queue_f.pop() {
            self.fixed_f.insert(u, true);
            self.update_meeting(u);
            self.relax_forward(u)?;
        }
        if let Some((u, _)) = self.queue_b.pop() {
            self.fixed_b.insert(u, true);
            self.update_meeting(u);
            self.relax_backward(u)?;
        }
        Ok(true)
    }

    pub fn run(&mut self) -> GraphResult<()> {
        while self.step()? {}
        Ok(())
    }

    pub fn get_distance(&self) -> M {
        self.best.unwrap_or_else(M::max_value)
    }

    fn forward_arcs_to(&self, node: NodeId) -> Vec<ArcId> {
        let mut arcs = Vec::new();
        let mut cur = node;
        while let Some(&arc) = self.parent_f.get(&cur) {
            arcs.push(arc);
            cur = self.graph.other(arc, cur);
        }
        arcs.reverse();
        arcs
    }

    fn backward_arcs_from(&self, node: NodeId) -> Vec<ArcId> {
        let mut arcs = Vec::new();
        let mut cur = node;
        while let Some(&arc) = self.parent_b.get(&cur) {
            arcs.push(arc);
            cur = self.graph.other(arc, cur);
        }
        arcs
    }

    /// Stitch the forward and backward parent-arc chains at the meeting
    /// node into a single `source -> target` path.
    pub fn get_path(&self) -> Option<Path> {
        let m = self.meeting?;
        let mut arcs = self.forward_arcs_to(m);
        arcs.extend(self.backward_arcs_from(m));
        Path::from_arcs(self.graph, self.source, arcs).ok()
    }
}
