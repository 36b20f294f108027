//! `Path`: a walk through a graph represented as an ordered sequence of
//! arcs, readable back from any shortest-path algorithm's parent-arc
//! table. A `Path` can itself be presented through the graph capability
//! interface via [`crate::graph::PathGraph`], for algorithms (TSP 2-opt,
//! isomorphism fixtures) that want to treat a walk as a small graph.

use crate::error::GraphResult;
use crate::graph::{precondition, GraphCapability};
use crate::id::{ArcId, NodeId};

/// An ordered walk: `nodes[i]` and `nodes[i+1]` are the endpoints of
/// `arcs[i]`, chained through `Other()`. Soundness (consecutive arcs share
/// a node) is checked once at construction.
#[derive(Debug, Clone)]
pub struct Path {
    nodes: Vec<NodeId>,
    arcs: Vec<ArcId>,
}

impl Path {
    /// Build a path from a starting node and an ordered sequence of arcs,
    /// validating that consecutive arcs chain through shared nodes.
    pub fn from_arcs<G: GraphCapability + ?Sized>(
        graph: &G,
        start: NodeId,
        arcs: Vec<ArcId>,
    ) -> GraphResult<Self> {
        let mut nodes = Vec::with_capacity(arcs.len() + 1);
        nodes.push(start);
        let mut current = start;
        for &arc in &arcs {
            let (u, v) = (graph.u(arc), graph.v(arc));
            if u != current && v != current {
                return Err(precondition(
                    "Path::from_arcs: arc does not chain through the previous node",
                ));
            }
            current = graph.other(arc, current);
            nodes.push(current);
        }
        Ok(Path { nodes, arcs })
    }

    /// Build a path directly from an explicit node sequence (used by
    /// algorithms that already walk node-by-node, e.g. TSP tour
    /// construction) together with the arc realizing each step.
    pub fn from_nodes_and_arcs(nodes: Vec<NodeId>, arcs: Vec<ArcId>) -> Self {
        debug_assert_eq!(nodes.len(), arcs.len() + 1);
        Path { nodes, arcs }
    }

    pub fn first_node(&self) -> NodeId {
        *self.nodes.first().unwrap_or(&NodeId::end())
    }

    pub fn last_node(&self) -> NodeId {
        *self.nodes.last().unwrap_or(&NodeId::end())
    }

    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// A path of length ≥ 1 whose first and last node coincide is a cycle.
    pub fn is_cycle(&self) -> bool {
        !self.arcs.is_empty() && self.first_node() == self.last_node()
    }

    /// Total cost under a caller-supplied cost callback.
    pub fn total_cost<C, M>(&self, mut cost: C) -> M
    where
        C: FnMut(ArcId) -> M,
        M: crate::measure::Measure,
    {
        self.arcs
            .iter()
            .fold(M::zero(), |acc, &a| acc + cost(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn chains_through_shared_nodes() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let ab = g.add_arc(a, b, Directedness::Directed).unwrap();
        let bc = g.add_arc(b, c, Directedness::Directed).unwrap();

        let path = Path::from_arcs(&g, a, vec![ab, bc]).unwrap();
        assert_eq!(path.first_node(), a);
        assert_eq!(path.last_node(), c);
        assert!(!path.is_cycle());
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn rejects_a_disconnected_arc_sequence() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let d = g.add_node();
        let ab = g.add_arc(a, b, Directedness::Directed).unwrap();
        let cd = g.add_arc(c, d, Directedness::Directed).unwrap();

        assert!(Path::from_arcs(&g, a, vec![ab, cd]).is_err());
    }

    #[test]
    fn cycle_detection() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let ab = g.add_arc(a, b, Directedness::Directed).unwrap();
        let ba = g.add_arc(b, a, Directedness::Directed).unwrap();
        let path = Path::from_arcs(&g, a, vec![ab, ba]).unwrap();
        assert!(path.is_cycle());
    }
}
