//! A view that overlays extra nodes and arcs on top of a base graph,
//! presenting the union through the same capability interface.
//!
//! Extra node/arc ids are allocated starting just past the base graph's own
//! id space at construction time, so a `NodeId`/`ArcId` below the offset
//! always means "ask the base graph" and one at or above it always means
//! "look in the overlay" — no runtime tagging needed.

use crate::error::GraphResult;
use crate::graph::precondition;
use crate::id::{ArcFilter, ArcId, Directedness, NodeId};

use super::GraphCapability;

struct ExtraArc {
    u: NodeId,
    v: NodeId,
    directedness: Directedness,
}

pub struct Supergraph<'a, G: ?Sized> {
    base: &'a G,
    node_offset: u32,
    arc_offset: u32,
    extra_node_count: u32,
    extra_arcs: Vec<ExtraArc>,
}

impl<'a, G: GraphCapability + ?Sized> Supergraph<'a, G> {
    pub fn new(base: &'a G) -> Self {
        let node_offset = base.nodes().map(|n| n.index() as u32 + 1).max().unwrap_or(0);
        let arc_offset = base
            .arcs(ArcFilter::All)
            .map(|a| a.index() as u32 + 1)
            .max()
            .unwrap_or(0);
        Supergraph {
            base,
            node_offset,
            arc_offset,
            extra_node_count: 0,
            extra_arcs: Vec::new(),
        }
    }

    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.node_offset + self.extra_node_count);
        self.extra_node_count += 1;
        id
    }

    pub fn add_arc(&mut self, u: NodeId, v: NodeId, directedness: Directedness) -> GraphResult<ArcId> {
        if !self.has_node(u) || !self.has_node(v) {
            return Err(precondition("add_arc: endpoint does not belong to this supergraph"));
        }
        let id = ArcId::new(self.arc_offset + self.extra_arcs.len() as u32);
        self.extra_arcs.push(ExtraArc { u, v, directedness });
        Ok(id)
    }

    fn has_node(&self, n: NodeId) -> bool {
        if (n.index() as u32) < self.node_offset {
            self.base.node_at_index(n.index()).is_some()
        } else {
            (n.index() as u32) < self.node_offset + self.extra_node_count
        }
    }

    fn is_extra_node(&self, n: NodeId) -> bool {
        (n.index() as u32) >= self.node_offset
    }

    fn is_extra_arc(&self, a: ArcId) -> bool {
        (a.index() as u32) >= self.arc_offset
    }

    fn extra_arc(&self, a: ArcId) -> &ExtraArc {
        &self.extra_arcs[a.index() - self.arc_offset as usize]
    }
}

impl<G: GraphCapability + ?Sized> GraphCapability for Supergraph<'_, G> {
    fn node_count(&self) -> usize {
        self.base.node_count() + self.extra_node_count as usize
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        self.arcs(filter).count()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        let extra = (0..self.extra_node_count).map(|i| NodeId::new(self.node_offset + i));
        Box::new(self.base.nodes().chain(extra))
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        let extra = self
            .extra_arcs
            .iter()
            .enumerate()
            .filter(move |(_, arc)| match filter {
                ArcFilter::All => true,
                ArcFilter::Edge => arc.directedness.is_edge(),
                ArcFilter::Forward | ArcFilter::Backward => !arc.directedness.is_edge(),
            })
            .map(move |(i, _)| ArcId::new(self.arc_offset + i as u32));
        Box::new(self.base.arcs(filter).chain(extra))
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        let extra_hits = self
            .extra_arcs
            .iter()
            .enumerate()
            .filter(move |(_, arc)| match filter {
                ArcFilter::All => arc.u == node || arc.v == node,
                ArcFilter::Edge => arc.directedness.is_edge() && (arc.u == node || arc.v == node),
                ArcFilter::Forward => {
                    arc.directedness.is_edge() && (arc.u == node || arc.v == node)
                        || arc.u == node
                }
                ArcFilter::Backward => {
                    arc.directedness.is_edge() && (arc.u == node || arc.v == node)
                        || arc.v == node
                }
            })
            .map(move |(i, _)| ArcId::new(self.arc_offset + i as u32));

        if self.is_extra_node(node) {
            Box::new(extra_hits)
        } else {
            Box::new(self.base.incident(node, filter).chain(extra_hits))
        }
    }

    fn u(&self, arc: ArcId) -> NodeId {
        if self.is_extra_arc(arc) {
            self.extra_arc(arc).u
        } else {
            self.base.u(arc)
        }
    }

    fn v(&self, arc: ArcId) -> NodeId {
        if self.is_extra_arc(arc) {
            self.extra_arc(arc).v
        } else {
            self.base.v(arc)
        }
    }

    fn is_edge(&self, arc: ArcId) -> bool {
        if self.is_extra_arc(arc) {
            self.extra_arc(arc).directedness.is_edge()
        } else {
            self.base.is_edge(arc)
        }
    }

    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        let candidate = NodeId::new(index as u32);
        if self.has_node(candidate) {
            Some(candidate)
        } else {
            None
        }
    }

    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        let candidate = ArcId::new(index as u32);
        if self.is_extra_arc(candidate) {
            if index < self.arc_offset as usize + self.extra_arcs.len() {
                Some(candidate)
            } else {
                None
            }
        } else {
            self.base.arc_at_index(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph as ConcreteGraph;
    use crate::graph::MutableGraph;

    #[test]
    fn overlay_adds_nodes_and_arcs_on_top_of_base() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();

        let mut sup = Supergraph::new(&g);
        let extra = sup.add_node();
        let bridge = sup.add_arc(b, extra, Directedness::Directed).unwrap();

        assert_eq!(sup.node_count(), 3);
        assert_eq!(sup.u(bridge), b);
        assert_eq!(sup.v(bridge), extra);
        assert_eq!(sup.incident(b, ArcFilter::Forward).count(), 1);
        assert_eq!(sup.incident(extra, ArcFilter::Backward).count(), 1);
    }
}
