//! A node/arc-filtered view over a base graph.
//!
//! `Subgraph` wraps a base graph with two mutable toggle sets: disabled
//! nodes and disabled arcs. Enumeration simply skips filtered-out items.
//! Disabling a node transparently hides its incident arcs too, even though
//! the user never touched the arc toggle directly — this is the one place
//! the adaptor must do more than delegate.
//!
//! The toggles are `FixedBitSet`s indexed by handle, not hash sets: node
//! and arc handles are dense `u32` indices, so a bitset is the natural,
//! allocation-free toggle the teacher repo reaches for wherever it needs a
//! "mark some of these dense indices" set (visited marks during traversal,
//! here a disabled mark). The bitset grows on demand as the base graph's
//! handle space grows past its current capacity.

use fixedbitset::FixedBitSet;

use crate::id::{ArcFilter, ArcId, NodeId};

use super::GraphCapability;

/// A read-only, toggle-filtered view over `base`.
pub struct Subgraph<'a, G: ?Sized> {
    base: &'a G,
    disabled_nodes: FixedBitSet,
    disabled_arcs: FixedBitSet,
}

impl<'a, G: GraphCapability + ?Sized> Subgraph<'a, G> {
    pub fn new(base: &'a G) -> Self {
        Subgraph {
            base,
            disabled_nodes: FixedBitSet::with_capacity(0),
            disabled_arcs: FixedBitSet::with_capacity(0),
        }
    }

    /// Hide `node` (and, transparently, every arc incident to it).
    pub fn disable_node(&mut self, node: NodeId) {
        grow_for(&mut self.disabled_nodes, node.index());
        self.disabled_nodes.set(node.index(), true);
    }

    pub fn enable_node(&mut self, node: NodeId) {
        if node.index() < self.disabled_nodes.len() {
            self.disabled_nodes.set(node.index(), false);
        }
    }

    pub fn disable_arc(&mut self, arc: ArcId) {
        grow_for(&mut self.disabled_arcs, arc.index());
        self.disabled_arcs.set(arc.index(), true);
    }

    pub fn enable_arc(&mut self, arc: ArcId) {
        if arc.index() < self.disabled_arcs.len() {
            self.disabled_arcs.set(arc.index(), false);
        }
    }

    pub fn node_enabled(&self, node: NodeId) -> bool {
        node.index() >= self.disabled_nodes.len() || !self.disabled_nodes.contains(node.index())
    }

    fn arc_enabled(&self, arc: ArcId) -> bool {
        if arc.index() < self.disabled_arcs.len() && self.disabled_arcs.contains(arc.index()) {
            return false;
        }
        let (u, v) = (self.base.u(arc), self.base.v(arc));
        self.node_enabled(u) && self.node_enabled(v)
    }
}

fn grow_for(set: &mut FixedBitSet, index: usize) {
    if index >= set.len() {
        set.grow(index + 1);
    }
}

impl<G: GraphCapability + ?Sized> GraphCapability for Subgraph<'_, G> {
    fn node_count(&self) -> usize {
        self.base
            .nodes()
            .filter(|&n| self.node_enabled(n))
            .count()
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        self.arcs(filter).count()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.base.nodes().filter(move |&n| self.node_enabled(n)))
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        Box::new(
            self.base
                .arcs(filter)
                .filter(move |&a| self.arc_enabled(a)),
        )
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        if !self.node_enabled(node) {
            return Box::new(std::iter::empty());
        }
        Box::new(
            self.base
                .incident(node, filter)
                .filter(move |&a| self.arc_enabled(a)),
        )
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.base.u(arc)
    }
    fn v(&self, arc: ArcId) -> NodeId {
        self.base.v(arc)
    }
    fn is_edge(&self, arc: ArcId) -> bool {
        self.base.is_edge(arc)
    }
    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.base
            .node_at_index(index)
            .filter(|&n| self.node_enabled(n))
    }
    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        self.base
            .arc_at_index(index)
            .filter(|&a| self.arc_enabled(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph as ConcreteGraph;
    use crate::graph::MutableGraph;
    use crate::id::Directedness;

    #[test]
    fn disabling_a_node_hides_its_arcs() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        g.add_arc(b, c, Directedness::Directed).unwrap();

        let mut sub = Subgraph::new(&g);
        sub.disable_node(b);

        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.arc_count(ArcFilter::All), 0);
        assert!(sub.incident(a, ArcFilter::Forward).next().is_none());
    }

    #[test]
    fn enabling_restores_a_disabled_node() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();

        let mut sub = Subgraph::new(&g);
        sub.disable_node(a);
        assert_eq!(sub.node_count(), 1);
        sub.enable_node(a);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.arc_count(ArcFilter::All), 1);
    }
}
