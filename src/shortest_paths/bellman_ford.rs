//! Bellman-Ford: shortest paths under arbitrary-sign costs, with negative
//! -cycle detection carrying a witness arc.

use indexmap::IndexMap;
use num_traits::Bounded;

use crate::error::{GraphError, GraphResult};
use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;
use crate::path::Path;

pub struct BellmanFord<'a, G: ?Sized, C, M> {
    graph: &'a G,
    cost: C,
    dist: IndexMap<NodeId, M>,
    parent_arc: IndexMap<NodeId, ArcId>,
}

impl<'a, G, C, M> BellmanFord<'a, G, C, M>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    pub fn new(graph: &'a G, cost: C) -> Self {
        BellmanFord {
            graph,
            cost,
            dist: IndexMap::new(),
            parent_arc: IndexMap::new(),
        }
    }

    pub fn add_source(&mut self, source: NodeId) {
        let improves = self
            .dist
            .get(&source)
            .map(|&d| M::zero() < d)
            .unwrap_or(true);
        if improves {
            self.dist.insert(source, M::zero());
        }
    }

    /// Try every directed relaxation `(u, v)` implied by `arc`: for a
    /// directed arc just `u -> v`; for an edge both directions.
    fn relax_once(&mut self) -> Option<ArcId> {
        let directed: Vec<(NodeId, NodeId, ArcId)> = self
            .graph
            .arcs(ArcFilter::All)
            .flat_map(|arc| {
                let (u, v) = (self.graph.u(arc), self.graph.v(arc));
                if self.graph.is_edge(arc) {
                    vec![(u, v, arc), (v, u, arc)]
                } else {
                    vec![(u, v, arc)]
                }
            })
            .collect();

        let mut last_relaxed = None;
        for (u, v, arc) in directed {
            let Some(&d_u) = self.dist.get(&u) else {
                continue;
            };
            let c = (self.cost)(arc);
            let new_d = d_u + c;
            let improves = self.dist.get(&v).map(|&d| new_d < d).unwrap_or(true);
            if improves {
                self.dist.insert(v, new_d);
                self.parent_arc.insert(v, arc);
                last_relaxed = Some(arc);
            }
        }
        last_relaxed
    }

    /// Run the full `|V| - 1` relaxation rounds followed by one detection
    /// round. Returns `Err(GraphError::NegativeCycle)` (with the witness
    /// arc attached) if a negative cycle is reachable from any source.
    pub fn run(&mut self) -> GraphResult<()> {
        let rounds = self.graph.node_count().saturating_sub(1);
        for _ in 0..rounds {
            if self.relax_once().is_none() {
                return Ok(());
            }
        }
        if let Some(witness) = self.relax_once() {
            return Err(error_stack::Report::new(GraphError::NegativeCycle)
                .attach_printable(format!("witness arc {witness:?} still relaxable")));
        }
        Ok(())
    }

    pub fn reached(&self, node: NodeId) -> bool {
        self.dist.contains_key(&node)
    }

    pub fn get_distance(&self, node: NodeId) -> M {
        self.dist.get(&node).copied().unwrap_or_else(M::max_value)
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
