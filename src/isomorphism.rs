//! Structural isomorphism between two graph views.
//!
//! Named in the system overview's component table but, like [`crate::tsp`],
//! never given its own `§4` subsection in the distilled spec; filled in by
//! `SPEC_FULL.md §4.10` as a VF2-style state-space search: grow a partial
//! node bijection one pair at a time, pruned by degree and by the
//! syntactic (forward/backward/self-loop) consistency every already-placed
//! pair must keep, backtracking on dead ends. `Induced`/`NotNecessarilyInduced`
//! is a mode flag rather than a second algorithm, per the spec.

use indexmap::IndexMap;

use crate::graph::GraphCapability;
use crate::id::{ArcFilter, NodeId};

/// Whether a match additionally requires that *no* arc exists between two
/// mapped nodes in one graph unless the corresponding arc exists in the
/// other (a true induced-subgraph / full-graph isomorphism), or only that
/// every arc of the smaller/first graph has a counterpart (an embedding
/// that may ignore extra arcs of the second graph).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchMode {
    /// Corresponding pairs must agree on adjacency in both directions:
    /// `u1 ~ v1` in `g1` iff `u2 ~ v2` in `g2`.
    Induced,
    /// Every adjacency in `g1` must have a counterpart in `g2`; `g2` may
    /// have extra arcs between mapped nodes that `g1` lacks.
    NotNecessarilyInduced,
}

/// The witnessing bijection found by a successful search: `g1` node →
/// `g2` node, and its inverse.
#[derive(Debug, Clone)]
pub struct Isomorphism {
    forward: IndexMap<NodeId, NodeId>,
    backward: IndexMap<NodeId, NodeId>,
}

impl Isomorphism {
    pub fn map(&self, node: NodeId) -> Option<NodeId> {
        self.forward.get(&node).copied()
    }

    pub fn inverse(&self, node: NodeId) -> Option<NodeId> {
        self.backward.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Search for a structural isomorphism (or, in `NotNecessarilyInduced`
/// mode, a subgraph-embedding witness) between `g1` and `g2`, restricted to
/// `filter`-selected arcs on each side. Returns `None` if none exists.
///
/// VF2-style: `g1`'s nodes are placed one at a time (insertion order), each
/// candidate `g2` node checked against every pair already placed; ties are
/// broken by trying candidates in `g2`'s insertion order, so the witness
/// returned for a given pair of graphs is deterministic.
pub fn find_isomorphism<G1, G2>(
    g1: &G1,
    g2: &G2,
    filter: ArcFilter,
    mode: MatchMode,
) -> Option<Isomorphism>
where
    G1: GraphCapability + ?Sized,
    G2: GraphCapability + ?Sized,
{
    if g1.node_count() != g2.node_count() {
        return None;
    }
    if mode == MatchMode::Induced && g1.arc_count(filter) != g2.arc_count(filter) {
        return None;
    }

    let order: Vec<NodeId> = g1.nodes().collect();
    let candidates: Vec<NodeId> = g2.nodes().collect();

    let mut forward: IndexMap<NodeId, NodeId> = IndexMap::new();
    let mut backward: IndexMap<NodeId, NodeId> = IndexMap::new();

    if search(g1, g2, filter, mode, &order, &candidates, 0, &mut forward, &mut backward) {
        Some(Isomorphism { forward, backward })
    } else {
        None
    }
}

fn search<G1, G2>(
    g1: &G1,
    g2: &G2,
    filter: ArcFilter,
    mode: MatchMode,
    order: &[NodeId],
    candidates: &[NodeId],
    depth: usize,
    forward: &mut IndexMap<NodeId, NodeId>,
    backward: &mut IndexMap<NodeId, NodeId>,
) -> bool
where
    G1: GraphCapability + ?Sized,
    G2: GraphCapability + ?Sized,
{
    if depth == order.len() {
        return true;
    }
    let u1 = order[depth];

    for &u2 in candidates {
        if backward.contains_key(&u2) {
            continue;
        }
        if g1.incident(u1, filter).count() != g2.incident(u2, filter).count() && mode == MatchMode::Induced {
            continue;
        }
        if !consistent(g1, g2, filter, mode, u1, u2, forward, backward) {
            continue;
        }
        forward.insert(u1, u2);
        backward.insert(u2, u1);
        if search(g1, g2, filter, mode, order, candidates, depth + 1, forward, backward) {
            return true;
        }
        forward.shift_remove(&u1);
        backward.shift_remove(&u2);
    }
    false
}

/// Whether placing `u1 -> u2` keeps adjacency consistent with every pair
/// already in `forward`/`backward`.
fn consistent<G1, G2>(
    g1: &G1,
    g2: &G2,
    filter: ArcFilter,
    mode: MatchMode,
    u1: NodeId,
    u2: NodeId,
    forward: &IndexMap<NodeId, NodeId>,
    _backward: &IndexMap<NodeId, NodeId>,
) -> bool
where
    G1: GraphCapability + ?Sized,
    G2: GraphCapability + ?Sized,
{
    for (&placed1, &placed2) in forward.iter() {
        let adj1 = adjacent(g1, u1, placed1, filter);
        let adj2 = adjacent(g2, u2, placed2, filter);
        match mode {
            MatchMode::Induced => {
                if adj1 != adj2 {
                    return false;
                }
            }
            MatchMode::NotNecessarilyInduced => {
                if adj1 && !adj2 {
                    return false;
                }
            }
        }
    }
    true
}

fn adjacent<G: GraphCapability + ?Sized>(g: &G, a: NodeId, b: NodeId, filter: ArcFilter) -> bool {
    g.incident(a, filter).any(|arc| g.other(arc, a) == b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, MutableGraph};
    use crate::id::Directedness;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Undirected).unwrap();
        g.add_arc(b, c, Directedness::Undirected).unwrap();
        g.add_arc(c, a, Directedness::Undirected).unwrap();
        g
    }

    #[test]
    fn a_triangle_is_isomorphic_to_itself_relabeled() {
        let g1 = triangle();
        // Build g2 with nodes inserted in a different order, same shape.
        let mut g2 = Graph::new();
        let x = g2.add_node();
        let y = g2.add_node();
        let z = g2.add_node();
        g2.add_arc(y, z, Directedness::Undirected).unwrap();
        g2.add_arc(z, x, Directedness::Undirected).unwrap();
        g2.add_arc(x, y, Directedness::Undirected).unwrap();

        let iso = find_isomorphism(&g1, &g2, ArcFilter::Edge, MatchMode::Induced);
        assert!(iso.is_some());
        assert_eq!(iso.unwrap().len(), 3);
    }

    #[test]
    fn a_path_is_not_isomorphic_to_a_triangle() {
        let g1 = triangle();
        let mut g2 = Graph::new();
        let a = g2.add_node();
        let b = g2.add_node();
        let c = g2.add_node();
        g2.add_arc(a, b, Directedness::Undirected).unwrap();
        g2.add_arc(b, c, Directedness::Undirected).unwrap();

        assert!(find_isomorphism(&g1, &g2, ArcFilter::Edge, MatchMode::Induced).is_none());
    }

    #[test]
    fn not_necessarily_induced_allows_extra_arcs_in_g2() {
        // g1: a path a-b-c. g2: a triangle. The path embeds into the
        // triangle (every g1 adjacency has a g2 counterpart) even though
        // g2 has one extra edge the path doesn't.
        let mut g1 = Graph::new();
        let a = g1.add_node();
        let b = g1.add_node();
        let c = g1.add_node();
        g1.add_arc(a, b, Directedness::Undirected).unwrap();
        g1.add_arc(b, c, Directedness::Undirected).unwrap();

        let g2 = triangle();

        assert!(find_isomorphism(&g1, &g2, ArcFilter::Edge, MatchMode::NotNecessarilyInduced).is_some());
    }
}
