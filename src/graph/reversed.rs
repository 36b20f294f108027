//! A view that swaps the `U`/`V` endpoints (and Forward/Backward
//! enumeration) of every directed arc; edges are unaffected, since an
//! edge's orientation is only a convenience for consistent enumeration.
//!
//! Grounded in `src/visit.rs`'s `Reversed<G>` wrapper from the teacher's
//! pre-1.0 snapshot, modernized against the current [`GraphCapability`]
//! interface.

use crate::id::{ArcFilter, ArcId, NodeId};

use super::GraphCapability;

pub struct Reversed<'a, G: ?Sized>(pub &'a G);

impl<G: GraphCapability + ?Sized> GraphCapability for Reversed<'_, G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        self.0.arc_count(filter)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.0.nodes()
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        self.0.arcs(filter)
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        let swapped = match filter {
            ArcFilter::Forward => ArcFilter::Backward,
            ArcFilter::Backward => ArcFilter::Forward,
            other => other,
        };
        self.0.incident(node, swapped)
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.0.v(arc)
    }

    fn v(&self, arc: ArcId) -> NodeId {
        self.0.u(arc)
    }

    fn is_edge(&self, arc: ArcId) -> bool {
        self.0.is_edge(arc)
    }

    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.0.node_at_index(index)
    }

    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        self.0.arc_at_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph as ConcreteGraph;
    use crate::graph::MutableGraph;
    use crate::id::Directedness;

    #[test]
    fn swaps_endpoints_and_forward_backward() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let arc = g.add_arc(a, b, Directedness::Directed).unwrap();

        let rev = Reversed(&g);
        assert_eq!(rev.u(arc), b);
        assert_eq!(rev.v(arc), a);
        assert_eq!(rev.incident(b, ArcFilter::Forward).collect::<Vec<_>>(), vec![arc]);
        assert_eq!(rev.incident(a, ArcFilter::Backward).collect::<Vec<_>>(), vec![arc]);
    }
}
