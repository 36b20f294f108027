//! A small per-arc endpoint patch over a base graph: splice a handful of
//! arc endpoints to different nodes without mutating the underlying
//! concrete graph or building a full [`crate::graph::Contracted`] quotient.
//!
//! Named in the component table (§2/§4.3) but left undefined by the
//! original distillation; this is the natural minimal adaptor for it,
//! following the same "overlay, don't allocate per-query" discipline as
//! the other adaptors.

use indexmap::IndexMap;

use crate::id::{ArcFilter, ArcId, NodeId};

use super::GraphCapability;

pub struct Redirected<'a, G: ?Sized> {
    base: &'a G,
    overrides: IndexMap<ArcId, (NodeId, NodeId)>,
}

impl<'a, G: GraphCapability + ?Sized> Redirected<'a, G> {
    pub fn new(base: &'a G) -> Self {
        Redirected {
            base,
            overrides: IndexMap::new(),
        }
    }

    /// Redirect `arc`'s endpoints to `(u, v)`. Does not validate that `u`
    /// or `v` belong to the base graph; callers composing adaptors are
    /// expected to know their own graph.
    pub fn redirect(&mut self, arc: ArcId, u: NodeId, v: NodeId) {
        self.overrides.insert(arc, (u, v));
    }

    pub fn clear_redirect(&mut self, arc: ArcId) {
        self.overrides.shift_remove(&arc);
    }
}

impl<G: GraphCapability + ?Sized> GraphCapability for Redirected<'_, G> {
    fn node_count(&self) -> usize {
        self.base.node_count()
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        self.base.arc_count(filter)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        self.base.nodes()
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        self.base.arcs(filter)
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        if self.overrides.is_empty() {
            return self.base.incident(node, filter);
        }
        // An overridden arc may now be incident to nodes it wasn't
        // originally touching (or no longer incident to ones it was), so
        // fall back to a full scan whenever any redirect is active.
        let overrides = &self.overrides;
        Box::new(self.base.arcs(filter).filter(move |&a| {
            let (u, v) = overrides.get(&a).copied().unwrap_or_else(|| {
                (self.base.u(a), self.base.v(a))
            });
            match filter {
                ArcFilter::Forward => u == node,
                ArcFilter::Backward => v == node,
                _ => u == node || v == node,
            }
        }))
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.overrides.get(&arc).map(|&(u, _)| u).unwrap_or_else(|| self.base.u(arc))
    }

    fn v(&self, arc: ArcId) -> NodeId {
        self.overrides.get(&arc).map(|&(_, v)| v).unwrap_or_else(|| self.base.v(arc))
    }

    fn is_edge(&self, arc: ArcId) -> bool {
        self.base.is_edge(arc)
    }

    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.base.node_at_index(index)
    }

    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        self.base.arc_at_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn redirect_overrides_endpoints() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let arc = g.add_arc(a, b, Directedness::Directed).unwrap();

        let mut view = Redirected::new(&g);
        view.redirect(arc, a, c);
        assert_eq!(view.v(arc), c);
        assert_eq!(view.incident(c, ArcFilter::Backward).collect::<Vec<_>>(), vec![arc]);
    }
}
