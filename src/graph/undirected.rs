//! A view that declares every arc of the base graph an edge, regardless of
//! how it was added. Grounded in `src/visit.rs`'s `AsUndirected<G>`
//! wrapper from the teacher's pre-1.0 snapshot.

use crate::id::{ArcFilter, ArcId, NodeId};

use super::GraphCapability;

pub struct UndirectedView<'a, G: ?Sized>(pub &'a G);

impl<G: GraphCapability + ?Sized> GraphCapability for UndirectedView<'_, G> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        match filter {
            ArcFilter::Edge | ArcFilter::All => self.0.arc_count(ArcFilter::All),
            ArcFilter::Forward | ArcFilter::Backward => self.0.arc_count(ArcFilter::All),
        }
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.0.nodes()
    }

    fn arcs(&self, _filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        self.0.arcs(ArcFilter::All)
    }

    fn incident(&self, node: NodeId, _filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        self.0.incident(node, ArcFilter::All)
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.0.u(arc)
    }

    fn v(&self, arc: ArcId) -> NodeId {
        self.0.v(arc)
    }

    fn is_edge(&self, _arc: ArcId) -> bool {
        true
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
    fn every_arc_reports_as_an_edge() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let arc = g.add_arc(a, b, Directedness::Directed).unwrap();
        let view = UndirectedView(&g);
        assert!(view.is_edge(arc));
        assert_eq!(view.incident(b, ArcFilter::Forward).collect::<Vec<_>>(), vec![arc]);
    }
}
