//! Generic Dijkstra over `Sum` (addition, nonnegative costs only) and
//! `Maximum` (bottleneck, any sign) aggregation.

use indexmap::IndexMap;
use num_traits::Bounded;

use crate::error::{GraphError, GraphResult};
use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;
use crate::path::Path;
use crate::queue::PriorityQueue;

use super::CancellationToken;

/// How a relaxation combines a fixed node's distance with an arc's cost.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DijkstraMode {
    /// `combine(d, c) = d + c`. Requires every relaxed cost to be `>= 0`.
    Sum,
    /// `combine(d, c) = max(d, c)`. No sign restriction.
    Maximum,
}

/// A single run of Dijkstra's algorithm as a `Step`-advanced state machine.
pub struct Dijkstra<'a, G: ?Sized, C, M> {
    graph: &'a G,
    cost: C,
    mode: DijkstraMode,
    dist: IndexMap<NodeId, M>,
    parent_arc: IndexMap<NodeId, ArcId>,
    fixed: IndexMap<NodeId, bool>,
    queue: PriorityQueue<NodeId, M>,
}

impl<'a, G, C, M> Dijkstra<'a, G, C, M>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    pub fn new(graph: &'a G, cost: C, mode: DijkstraMode) -> Self {
        Dijkstra {
            graph,
            cost,
            mode,
            dist: IndexMap::new(),
            parent_arc: IndexMap::new(),
            fixed: IndexMap::new(),
            queue: PriorityQueue::new(),
        }
    }

    /// Mark `source` reached at distance zero. Multiple sources may be
    /// added before the first `Step`.
    pub fn add_source(&mut self, source: NodeId) {
        self.add_source_with_distance(source, M::zero());
    }

    /// Mark `source` reached at a caller-supplied base distance.
    pub fn add_source_with_distance(&mut self, source: NodeId, distance: M) {
        if self.fixed.contains_key(&source) {
            return;
        }
        let improves = self
            .dist
            .get(&source)
            .map(|&d| distance < d)
            .unwrap_or(true);
        if improves {
            self.dist.insert(source, distance);
            self.queue.set(source, distance);
        }
    }

    fn combine(&self, d_u: M, c: M) -> M {
        match self.mode {
            DijkstraMode::Sum => d_u + c,
            DijkstraMode::Maximum => {
                if c > d_u {
                    c
                } else {
                    d_u
                }
            }
        }
    }

    /// Pop the least-priority reached node, fix it, and relax its forward
    /// arcs. Returns `None` once the queue is exhausted.
    pub fn step(&mut self) -> GraphResult<Option<NodeId>> {
        let Some((u, d_u)) = self.queue.pop() else {
            return Ok(None);
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(fixed = ?u, distance = ?d_u, "dijkstra step");
        self.fixed.insert(u, true);

        let arcs: Vec<ArcId> = self.graph.incident(u, ArcFilter::Forward).collect();
        for arc in arcs {
            let c = (self.cost)(arc);
            if self.mode == DijkstraMode::Sum && c.is_negative() {
                return Err(crate::graph::precondition(
                    "Dijkstra: Sum mode requires nonnegative arc costs",
                ));
            }
            let v = self.graph.other(arc, u);
            if self.fixed.contains_key(&v) {
                continue;
            }
            let new_d = self.combine(d_u, c);
            let improves = self.dist.get(&v).map(|&d| new_d < d).unwrap_or(true);
            if improves {
                self.dist.insert(v, new_d);
                self.parent_arc.insert(v, arc);
                self.queue.set(v, new_d);
            }
        }
        Ok(Some(u))
    }

    /// Step until the queue is exhausted, optionally checking a
    /// cancellation token once per step.
    pub fn run(&mut self, token: Option<&CancellationToken>) -> GraphResult<()> {
        loop {
            if let Some(t) = token {
                if t.is_cancelled() {
                    return Err(error_stack::Report::new(GraphError::Cancelled)
                        .attach_printable("Dijkstra run was cancelled"));
                }
            }
            if self.step()?.is_none() {
                return Ok(());
            }
        }
    }

    /// Step until `target` is fixed, or the queue empties (returning
    /// `NodeId::end()`, not an error: "no path" is an ordinary outcome).
    pub fn run_until_fixed(&mut self, target: NodeId) -> GraphResult<NodeId> {
        loop {
            match self.step()? {
                Some(u) if u == target => return Ok(u),
                Some(_) => continue,
                None => return Ok(NodeId::end()),
            }
        }
    }

    pub fn reached(&self, node: NodeId) -> bool {
        self.dist.contains_key(&node)
    }

    pub fn fixed(&self, node: NodeId) -> bool {
        self.fixed.contains_key(&node)
    }

    pub fn get_distance(&self, node: NodeId) -> M {
        self.dist.get(&node).copied().unwrap_or_else(M::max_value)
    }

    pub fn parent_arc(&self, node: NodeId) -> Option<ArcId> {
        self.parent_arc.get(&node).copied()
    }

    pub fn get_path(&self, target: NodeId) -> Option<Path> {
        if !self.reached(target) {
            return None;
        }
        let mut arcs_rev = Vec::new();
        let mut cur = target;
        while let Some(&arc) = self.parent_arc.get(&cur) {
            arcs_rev.push(arc);
            cur = self.graph.other(arc, cur);
        }
        arcs_rev.reverse();
        Path::from_arcs(self.graph, cur, arcs_rev).ok()
    }
}

/// Whether an incremental run made progress or finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IncrementalStatus {
    Progress,
    Done,
}

/// Wraps a [`Dijkstra`] run to yield control back to the caller every `N`
/// inner `Step`s, for embedding in an event loop that cannot block on a
/// single long `Run` call.
pub struct IncrementalDijkstra<'a, G: ?Sized, C, M> {
    inner: Dijkstra<'a, G, C, M>,
    batch: usize,
}

impl<'a, G, C, M> IncrementalDijkstra<'a, G, C, M>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    pub fn new(dijkstra: Dijkstra<'a, G, C, M>, batch: usize) -> Self {
        IncrementalDijkstra {
            inner: dijkstra,
            batch: batch.max(1),
        }
    }

    /// Execute up to `batch` steps and return whether there is more work.
    pub fn resume(&mut self) -> GraphResult<IncrementalStatus> {
        for _ in 0..self.batch {
            if self.inner.step()?.is_none() {
                return Ok(IncrementalStatus::Done);
            }
        }
        Ok(IncrementalStatus::Progress)
    }

    pub fn inner(&self) -> &Dijkstra<'a, G, C, M> {
        &self.inner
    }

    pub fn into_inner(self) -> Dijkstra<'a, G, C, M> {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;
    use std::collections::HashMap;

    fn scenario_s1() -> (ConcreteGraph, HashMap<ArcId, i64>, NodeId, NodeId, NodeId, NodeId) {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let d = g.add_node();
        let mut cost = HashMap::new();
        cost.insert(g.add_arc(a, b, Directedness::Directed).unwrap(), 1i64);
        cost.insert(g.add_arc(a, c, Directedness::Directed).unwrap(), 4i64);
        cost.insert(g.add_arc(b, c, Directedness::Directed).unwrap(), 2i64);
        cost.insert(g.add_arc(c, d, Directedness::Directed).unwrap(), 1i64);
        cost.insert(g.add_arc(b, d, Directedness::Directed).unwrap(), 5i64);
        (g, cost, a, b, c, d)
    }

    #[test]
    fn s1_dijkstra_sum_mode() {
        let (g, cost, a, b, c, d) = scenario_s1();
        let mut dij = Dijkstra::new(&g, |arc| cost[&arc], DijkstraMode::Sum);
        dij.add_source(a);
        dij.run(None).unwrap();

        assert_eq!(dij.get_distance(a), 0);
        assert_eq!(dij.get_distance(b), 1);
        assert_eq!(dij.get_distance(c), 3);
        assert_eq!(dij.get_distance(d), 4);
    }

    #[test]
    fn s2_dijkstra_maximum_mode() {
        let (g, cost, a, b, c, d) = scenario_s1();
        let mut dij = Dijkstra::new(&g, |arc| cost[&arc], DijkstraMode::Maximum);
        dij.add_source(a);
        dij.run(None).unwrap();

        assert_eq!(dij.get_distance(a), 0);
        assert_eq!(dij.get_distance(b), 1);
        assert_eq!(dij.get_distance(c), 2);
        assert_eq!(dij.get_distance(d), 2);
    }

    #[test]
    fn unreached_node_reports_max_distance_and_no_path() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let mut dij = Dijkstra::new(&g, |_| 1i64, DijkstraMode::Sum);
        dij.add_source(a);
        dij.run(None).unwrap();
        assert_eq!(dij.get_distance(b), i64::max_value());
        assert!(dij.get_path(b).is_none());
    }

    #[test]
    fn sum_mode_rejects_negative_cost() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        let mut dij = Dijkstra::new(&g, |_| -1i64, DijkstraMode::Sum);
        dij.add_source(a);
        assert!(dij.run(None).is_err());
    }

    #[test]
    fn incremental_run_yields_every_batch() {
        let (g, cost, a, _b, _c, d) = scenario_s1();
        let dij = Dijkstra::new(&g, |arc| cost[&arc], DijkstraMode::Sum);
        let mut incremental = IncrementalDijkstra::new(dij, 1);
        let mut progressed = 0;
        loop {
            match incremental.resume().unwrap() {
                IncrementalStatus::Progress => progressed += 1,
                IncrementalStatus::Done => break,
            }
        }
        // add_source was never called, so this degenerates to zero steps;
        // exercise the mechanics instead via a second handle with a source.
        assert_eq!(progressed, 0);

        let mut dij2 = Dijkstra::new(&g, |arc| cost[&arc], DijkstraMode::Sum);
        dij2.add_source(a);
        let mut incremental2 = IncrementalDijkstra::new(dij2, 1);
        while incremental2.resume().unwrap() == IncrementalStatus::Progress {}
        assert_eq!(incremental2.inner().get_distance(d), 4);
    }

    mod props {
        use proptest::{collection::vec, prelude::*};

        use super::*;

        /// Brute-force shortest distances by relaxing every arc `|V|` times
        /// (Bellman-Ford without early exit), used only as an oracle here.
        fn brute_force_distances(
            nodes: &[NodeId],
            arcs: &[(NodeId, NodeId, i64)],
            source: NodeId,
        ) -> HashMap<NodeId, i64> {
            let mut dist: HashMap<NodeId, i64> = HashMap::new();
            dist.insert(source, 0);
            for _ in 0..nodes.len() {
                for &(u, v, w) in arcs {
                    if let Some(&du) = dist.get(&u) {
                        let nd = du + w;
                        if dist.get(&v).map(|&dv| nd < dv).unwrap_or(true) {
                            dist.insert(v, nd);
                        }
                    }
                }
            }
            dist
        }

        proptest! {
            /// Dijkstra's `Sum` distances must agree with a brute-force
            /// relaxation oracle on small, nonnegative-weight random graphs
            /// (spec §8's "results are reproducible given identical inputs"
            /// invariant, checked against an independent implementation
            /// rather than against itself).
            #[test]
            fn sum_mode_matches_brute_force(
                n in 2usize..8,
                raw_arcs in vec((0usize..8, 0usize..8, 0i64..20), 0..24),
            ) {
                let mut g = ConcreteGraph::new();
                let nodes: Vec<NodeId> = (0..n).map(|_| g.add_node()).collect();
                let mut weight: HashMap<ArcId, i64> = HashMap::new();
                let mut plain_arcs = Vec::new();
                for (ui, vi, w) in raw_arcs {
                    let (ui, vi) = (ui % n, vi % n);
                    if ui == vi {
                        continue;
                    }
                    if let Ok(arc) = g.add_arc(nodes[ui], nodes[vi], Directedness::Directed) {
                        weight.insert(arc, w);
                        plain_arcs.push((nodes[ui], nodes[vi], w));
                    }
                }

                let source = nodes[0];
                let mut dij = Dijkstra::new(&g, |arc| weight[&arc], DijkstraMode::Sum);
                dij.add_source(source);
                dij.run(None).unwrap();

                let oracle = brute_force_distances(&nodes, &plain_arcs, source);
                for &node in &nodes {
                    match oracle.get(&node) {
                        Some(&d) => prop_assert_eq!(dij.get_distance(node), d),
                        None => prop_assert!(!dij.reached(node)),
                    }
                }
            }
        }
    }
}
