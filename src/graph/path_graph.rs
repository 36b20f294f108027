//! A thin adaptor presenting a [`crate::path::Path`] through the graph
//! capability interface, so generic algorithms (2-opt, isomorphism
//! fixtures) can treat a walk as a graph without a second representation.

use crate::id::{ArcFilter, ArcId, NodeId};
use crate::path::Path;

use super::GraphCapability;

pub struct PathGraph<'a> {
    path: &'a Path,
}

impl<'a> PathGraph<'a> {
    pub fn new(path: &'a Path) -> Self {
        PathGraph { path }
    }

    fn arc_endpoints(&self, arc: ArcId) -> Option<(NodeId, NodeId)> {
        self.path
            .arcs()
            .iter()
            .position(|&a| a == arc)
            .map(|i| (self.path.nodes()[i], self.path.nodes()[i + 1]))
    }
}

impl GraphCapability for PathGraph<'_> {
    fn node_count(&self) -> usize {
        self.path.nodes().len()
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        match filter {
            ArcFilter::Edge => 0,
            _ => self.path.arcs().len(),
        }
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.path.nodes().iter().copied())
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        match filter {
            ArcFilter::Edge => Box::new(std::iter::empty()),
            _ => Box::new(self.path.arcs().iter().copied()),
        }
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        if matches!(filter, ArcFilter::Edge) {
            return Box::new(std::iter::empty());
        }
        let nodes = self.path.nodes();
        let arcs = self.path.arcs();
        let mut hits = Vec::new();
        for (i, &arc) in arcs.iter().enumerate() {
            let (u, v) = (nodes[i], nodes[i + 1]);
            match filter {
                ArcFilter::Forward if u == node => hits.push(arc),
                ArcFilter::Backward if v == node => hits.push(arc),
                ArcFilter::All if u == node || v == node => hits.push(arc),
                _ => {}
            }
        }
        Box::new(hits.into_iter())
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.arc_endpoints(arc).map(|(u, _)| u).unwrap_or_default()
    }

    fn v(&self, arc: ArcId) -> NodeId {
        self.arc_endpoints(arc).map(|(_, v)| v).unwrap_or_default()
    }

    fn is_edge(&self, _arc: ArcId) -> bool {
        false
    }

    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.path.nodes().get(index).copied()
    }

    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        self.path.arcs().get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn exposes_the_walk_as_a_graph() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let ab = g.add_arc(a, b, Directedness::Directed).unwrap();
        let bc = g.add_arc(b, c, Directedness::Directed).unwrap();
        let path = Path::from_arcs(&g, a, vec![ab, bc]).unwrap();

        let view = PathGraph::new(&path);
        assert_eq!(view.node_count(), 3);
        assert_eq!(view.u(ab), a);
        assert_eq!(view.v(bc), c);
        assert_eq!(view.incident(b, ArcFilter::Forward).collect::<Vec<_>>(), vec![bc]);
    }
}
