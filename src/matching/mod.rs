//! Matching engines: general maximum matching via blossom contraction, and
//! bipartite matching (max cardinality and minimum cost) via successive
//! shortest augmenting paths.

mod bipartite;
mod general;

pub use bipartite::{AugmentationPolicy, BipartiteMatching};
pub use general::general_max_matching;

use indexmap::IndexMap;

use crate::id::{ArcId, NodeId};

/// A matching: a subset of arcs covering each node at most once.
#[derive(Debug, Clone, Default)]
pub struct Matching {
    arc_of: IndexMap<NodeId, ArcId>,
}

impl Matching {
    pub(crate) fn new() -> Self {
        Matching {
            arc_of: IndexMap::new(),
        }
    }

    pub(crate) fn cover(&mut self, a: NodeId, b: NodeId, arc: ArcId) {
        self.arc_of.insert(a, arc);
        self.arc_of.insert(b, arc);
    }

    /// The arc matching `node`, if any.
    pub fn matched_arc(&self, node: NodeId) -> Option<ArcId> {
        self.arc_of.get(&node).copied()
    }

    pub fn is_matched(&self, node: NodeId) -> bool {
        self.arc_of.contains_key(&node)
    }

    /// Nodes covered by this matching, each once.
    pub fn covered_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arc_of.keys().copied()
    }

    /// Number of arcs in the matching (half the number of covered nodes).
    pub fn len(&self) -> usize {
        self.arc_of.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.arc_of.is_empty()
    }

    /// The distinct arcs making up this matching.
    pub fn arcs(&self) -> Vec<ArcId> {
        let mut seen = hashbrown::HashSet::new();
        let mut out = Vec::new();
        for &arc in self.arc_of.values() {
            if seen.insert(arc) {
                out.push(arc);
            }
        }
        out
    }
}
