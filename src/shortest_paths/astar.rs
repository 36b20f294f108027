//! A* search: a Dijkstra variant whose priority key folds in an
//! admissible, consistent heuristic so that nodes far from the goal are
//! explored later. Requires nonnegative arc costs, same as Dijkstra's
//! `Sum` mode.

use indexmap::IndexMap;
use num_traits::Bounded;

use crate::error::GraphResult;
use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;
use crate::path::Path;
use crate::queue::PriorityQueue;

pub struct AStar<'a, G: ?Sized, C, H, M> {
    graph: &'a G,
    cost: C,
    heuristic: H,
    dist: IndexMap<NodeId, M>,
    parent_arc: IndexMap<NodeId, ArcId>,
    fixed: IndexMap<NodeId, bool>,
    queue: PriorityQueue<NodeId, M>,
}

impl<'a, G, C, H, M> AStar<'a, G, C, H, M>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    H: Fn(NodeId) -> M,
    M: Measure,
{
    pub fn new(graph: &'a G, cost: C, heuristic: H) -> Self {
        AStar {
            graph,
            cost,
            heuristic,
            dist: IndexMap::new(),
            parent_arc: IndexMap::new(),
            fixed: IndexMap::new(),
            queue: PriorityQueue::new(),
        }
    }

    pub fn add_source(&mut self, source: NodeId) {
        if self.dist.contains_key(&source) {
            return;
        }
        self.dist.insert(source, M::zero());
        self.queue.set(source, (self.heuristic)(source));
    }

    pub fn step(&mut self) -> GraphResult<Option<NodeId>> {
        let Some((u, _)) = self.queue.pop() else {
            return Ok(None);
        };
        self.fixed.insert(u, true);
        let g_u = self.dist[&u];

        let arcs: Vec<ArcId> = self.graph.incident(u, ArcFilter::Forward).collect();
        for arc in arcs {
            let c = (self.cost)(arc);
            if c.is_negative() {
                return Err(crate::graph::precondition(
                    "A*: requires nonnegative arc costs",
                ));
            }
            let v = self.graph.other(arc, u);
            if self.fixed.contains_key(&v) {
                continue;
            }
            let new_g = g_u + c;
            let improves = self.dist.get(&v).map(|&d| new_g < d).unwrap_or(true);
            if improves {
                self.dist.insert(v, new_g);
                self.parent_arc.insert(v, arc);
                self.queue.set(v, new_g + (self.heuristic)(v));
            }
        }
        Ok(Some(u))
    }

    pub fn run_until_fixed(&mut self, target: NodeId) -> GraphResult<NodeId> {
        loop {
            match self.step()? {
                Some(u) if u == target => return Ok(u),
                Some(_) => continue,
                None => return Ok(NodeId::end()),
            }
        }
    }

    pub fn run(&mut self) -> GraphResult<()> {
        while self.step()?.is_some() {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;
    use std::collections::HashMap;

    #[test]
    fn zero_heuristic_degenerates_to_dijkstra() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let mut cost = HashMap::new();
        cost.insert(g.add_arc(a, b, Directedness::Directed).unwrap(), 1i64);
        cost.insert(g.add_arc(b, c, Directedness::Directed).unwrap(), 2i64);

        let mut search = AStar::new(&g, |arc| cost[&arc], |_| 0i64);
        search.add_source(a);
        let found = search.run_until_fixed(c).unwrap();
        assert_eq!(found, c);
        assert_eq!(search.get_distance(c), 3);
        assert_eq!(search.get_path(c).unwrap().len(), 2);
    }
}
