//! Breadth-first and depth-first search, each exposing a level/parent-arc
//! table and a `try_get` accessor, mirroring the shape of the shortest-path
//! family's `Reached`/`GetDistance` accessors.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};

/// Breadth-first search from one or more sources, restricted to `Forward`
/// arcs (i.e. the search follows directed arcs in their natural direction
/// and edges in either direction).
#[derive(Debug, Default)]
pub struct Bfs {
    order: Vec<NodeId>,
    level: IndexMap<NodeId, usize>,
    parent_arc: IndexMap<NodeId, ArcId>,
}

impl Bfs {
    pub fn run<G: GraphCapability + ?Sized>(
        graph: &G,
        sources: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        let mut bfs = Bfs::default();
        let mut queue = VecDeque::new();

        for source in sources {
            if bfs.level.contains_key(&source) {
                continue;
            }
            bfs.level.insert(source, 0);
            bfs.order.push(source);
            queue.push_back(source);
        }

        while let Some(u) = queue.pop_front() {
            let depth = bfs.level[&u];
            for arc in graph.incident(u, ArcFilter::Forward) {
                let v = graph.other(arc, u);
                if !bfs.level.contains_key(&v) {
                    bfs.level.insert(v, depth + 1);
                    bfs.parent_arc.insert(v, arc);
                    bfs.order.push(v);
                    queue.push_back(v);
                }
            }
        }
        bfs
    }

    pub fn reached(&self, node: NodeId) -> bool {
        self.level.contains_key(&node)
    }

    pub fn level_of(&self, node: NodeId) -> Option<usize> {
        self.level.get(&node).copied()
    }

    pub fn parent_arc(&self, node: NodeId) -> Option<ArcId> {
        self.parent_arc.get(&node).copied()
    }

    /// `try_get` accessor: the level of `target`, or `None` if unreached.
    pub fn try_get(&self, target: NodeId) -> Option<usize> {
        self.level_of(target)
    }

    /// Visitation order (the order nodes were dequeued-and-discovered in).
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }
}

/// Depth-first search from one or more sources, restricted to `Forward`
/// arcs. Exposes discovery order and a parent-arc table; `finish_order`
/// gives the postorder used by bridge/cut-vertex/SCC algorithms.
#[derive(Debug, Default)]
pub struct Dfs {
    discovery_order: Vec<NodeId>,
    finish_order: Vec<NodeId>,
    parent_arc: IndexMap<NodeId, ArcId>,
    discovered: IndexMap<NodeId, bool>,
}

impl Dfs {
    pub fn run<G: GraphCapability + ?Sized>(
        graph: &G,
        sources: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        let mut dfs = Dfs::default();
        for source in sources {
            if dfs.discovered.contains_key(&source) {
                continue;
            }
            dfs.visit(graph, source);
        }
        dfs
    }

    fn visit<G: GraphCapability + ?Sized>(&mut self, graph: &G, start: NodeId) {
        // Explicit stack of (node, arc iterator position) to avoid
        // unbounded recursion depth on long paths.
        let mut stack: Vec<(NodeId, Vec<ArcId>, usize)> = Vec::new();
        self.discovered.insert(start, true);
        self.discovery_order.push(start);
        stack.push((start, graph.incident(start, ArcFilter::Forward).collect(), 0));

        while let Some((u, arcs, pos)) = stack.last_mut() {
            if *pos >= arcs.len() {
                self.finish_order.push(*u);
                stack.pop();
                continue;
            }
            let arc = arcs[*pos];
            *pos += 1;
            let u = *u;
            let v = graph.other(arc, u);
            if !self.discovered.contains_key(&v) {
                self.discovered.insert(v, true);
                self.discovery_order.push(v);
                self.parent_arc.insert(v, arc);
                stack.push((v, graph.incident(v, ArcFilter::Forward).collect(), 0));
            }
        }
    }

    pub fn reached(&self, node: NodeId) -> bool {
        self.discovered.contains_key(&node)
    }

    pub fn parent_arc(&self, node: NodeId) -> Option<ArcId> {
        self.parent_arc.get(&node).copied()
    }

    pub fn discovery_order(&self) -> &[NodeId] {
        &self.discovery_order
    }

    pub fn finish_order(&self) -> &[NodeId] {
        &self.finish_order
    }

    pub fn try_get(&self, target: NodeId) -> Option<usize> {
        self.discovery_order.iter().position(|&n| n == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    fn chain() -> (ConcreteGraph, NodeId, NodeId, NodeId) {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        g.add_arc(b, c, Directedness::Directed).unwrap();
        (g, a, b, c)
    }

    #[test]
    fn bfs_levels_increase_along_the_chain() {
        let (g, a, b, c) = chain();
        let bfs = Bfs::run(&g, [a]);
        assert_eq!(bfs.level_of(a), Some(0));
        assert_eq!(bfs.level_of(b), Some(1));
        assert_eq!(bfs.level_of(c), Some(2));
    }

    #[test]
    fn dfs_reaches_every_connected_node() {
        let (g, a, b, c) = chain();
        let dfs = Dfs::run(&g, [a]);
        assert!(dfs.reached(a));
        assert!(dfs.reached(b));
        assert!(dfs.reached(c));
    }
}
