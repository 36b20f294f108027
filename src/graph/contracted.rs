//! A quotient view: nodes are merged into groups via a disjoint-set
//! overlay, and every arc's endpoints are renumbered to their group's
//! representative on the fly. Arcs wholly inside one group are hidden
//! unless the caller asks for them.
//!
//! Unlike the other adaptors, `Contracted` is not a pure constant-space
//! overlay: incremental `merge` calls mean the representative of a node
//! can change between queries, so `incident` recomputes the union of its
//! group members' adjacency on each call rather than caching a stale
//! group → arc-list index. This is the one adaptor in the family that
//! trades the "no per-query allocation" guideline for correctness under
//! incremental merges; the trade is documented here rather than silently
//! taken.

use std::cell::RefCell;

use hashbrown::HashSet;

use crate::id::{ArcFilter, ArcId, NodeId};
use crate::union_find::UnionFind;

use super::GraphCapability;

pub struct Contracted<'a, G: ?Sized> {
    base: &'a G,
    uf: RefCell<UnionFind<usize>>,
    /// When true (the default), arcs whose two endpoints contract to the
    /// same representative are excluded from enumeration.
    hide_internal: bool,
}

impl<'a, G: GraphCapability + ?Sized> Contracted<'a, G> {
    pub fn new(base: &'a G) -> Self {
        let domain = base.nodes().map(|n| n.index() + 1).max().unwrap_or(0);
        Contracted {
            base,
            uf: RefCell::new(UnionFind::new(domain)),
            hide_internal: true,
        }
    }

    /// Merge the groups containing `a` and `b`. The resulting group's
    /// representative is chosen by the underlying union-by-rank structure,
    /// not by the caller.
    pub fn merge(&self, a: NodeId, b: NodeId) {
        self.uf.borrow_mut().union(a.index(), b.index());
    }

    /// Whether `a` and `b` currently belong to the same group.
    pub fn same_group(&self, a: NodeId, b: NodeId) -> bool {
        self.uf.borrow().equiv(a.index(), b.index())
    }

    /// Include or exclude intra-group arcs from enumeration.
    pub fn set_hide_internal(&mut self, hide: bool) {
        self.hide_internal = hide;
    }

    fn repr(&self, n: NodeId) -> NodeId {
        let r = self.uf.borrow_mut().find_mut(n.index());
        NodeId::new(r as u32)
    }
}

impl<G: GraphCapability + ?Sized> GraphCapability for Contracted<'_, G> {
    fn node_count(&self) -> usize {
        let mut seen = HashSet::new();
        for n in self.base.nodes() {
            seen.insert(self.repr(n));
        }
        seen.len()
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        self.arcs(filter).count()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        let mut seen = HashSet::new();
        let reps: Vec<NodeId> = self
            .base
            .nodes()
            .map(|n| self.repr(n))
            .filter(|&r| seen.insert(r))
            .collect();
        Box::new(reps.into_iter())
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        let hide_internal = self.hide_internal;
        Box::new(self.base.arcs(filter).filter(move |&a| {
            if !hide_internal {
                return true;
            }
            self.repr(self.base.u(a)) != self.repr(self.base.v(a))
        }))
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        let group_repr = node;
        let hide_internal = self.hide_internal;
        let members: Vec<NodeId> = self
            .base
            .nodes()
            .filter(|&n| self.repr(n) == group_repr)
            .collect();
        let mut seen = HashSet::new();
        let arcs: Vec<ArcId> = members
            .into_iter()
            .flat_map(move |m| self.base.incident(m, filter).collect::<Vec<_>>())
            .filter(|&a| seen.insert(a))
            .filter(move |&a| {
                if !hide_internal {
                    return true;
                }
                self.repr(self.base.u(a)) != self.repr(self.base.v(a))
            })
            .collect();
        Box::new(arcs.into_iter())
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.repr(self.base.u(arc))
    }

    fn v(&self, arc: ArcId) -> NodeId {
        self.repr(self.base.v(arc))
    }

    fn is_edge(&self, arc: ArcId) -> bool {
        self.base.is_edge(arc)
    }

    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.base.node_at_index(index).map(|n| self.repr(n))
    }

    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        self.base.arc_at_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph as ConcreteGraph;
    use crate::graph::MutableGraph;
    use crate::id::Directedness;

    #[test]
    fn merging_hides_internal_arcs_and_renumbers_external_ones() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let internal = g.add_arc(a, b, Directedness::Directed).unwrap();
        let external = g.add_arc(b, c, Directedness::Directed).unwrap();

        let contracted = Contracted::new(&g);
        contracted.merge(a, b);

        let arcs: Vec<_> = contracted.arcs(ArcFilter::All).collect();
        assert!(!arcs.contains(&internal));
        assert!(arcs.contains(&external));

        let rep = contracted.u(external);
        assert!(contracted.same_group(a, b));
        assert_eq!(contracted.u(external), rep);
        assert_ne!(contracted.v(external), rep);
    }
}
