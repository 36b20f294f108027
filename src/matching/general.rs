//! General (non-bipartite) maximum matching via Edmonds' blossom
//! algorithm: alternating-tree BFS with odd-cycle contraction.
//!
//! Blossoms are represented the way the spec frames them: each node maps
//! to a "base" representative, flattened eagerly whenever a blossom is
//! found rather than carried through a persistent `UnionFind` — the
//! contraction only needs to survive the current search, so a plain
//! `Vec<usize>` reset per augmentation is simpler than threading a
//! disjoint-set through blossom creation and the subsequent expansion.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};

use super::Matching;

/// A maximum matching of `graph`, treating every arc as an undirected
/// edge between its two endpoints (directedness is irrelevant to
/// matching). Runs one blossom-search augmentation per node in turn,
/// `O(V^3)` overall.
pub fn general_max_matching<G>(graph: &G) -> Matching
where
    G: GraphCapability + ?Sized,
{
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let n = nodes.len();
    let mut index: IndexMap<NodeId, usize> = IndexMap::with_capacity(n);
    for (i, &node) in nodes.iter().enumerate() {
        index.insert(node, i);
    }

    let mut adj: Vec<Vec<(usize, ArcId)>> = vec![Vec::new(); n];
    for arc in graph.arcs(ArcFilter::All) {
        let (u, v) = (graph.u(arc), graph.v(arc));
        if u == v {
            continue;
        }
        let (iu, iv) = (index[&u], index[&v]);
        adj[iu].push((iv, arc));
        adj[iv].push((iu, arc));
    }

    let mut match_: Vec<Option<usize>> = vec![None; n];

    for root in 0..n {
        if match_[root].is_some() {
            continue;
        }
        if let Some((found, parent)) = find_augmenting_path(n, &adj, &match_, root) {
            augment(&mut match_, &parent, found);
        }
    }

    let mut matching = Matching::new();
    for i in 0..n {
        if let Some(j) = match_[i] {
            if i < j {
                let arc = adj[i]
                    .iter()
                    .find(|&&(to, _)| to == j)
                    .map(|&(_, a)| a)
                    .expect("matched pair must be connected by a traversed arc");
                matching.cover(nodes[i], nodes[j], arc);
            }
        }
    }
    matching
}

fn lca(base: &[usize], parent: &[Option<usize>], match_: &[Option<usize>], a: usize, b: usize) -> usize {
    let n = base.len();
    let mut seen = vec![false; n];
    let mut q = a;
    loop {
        q = base[q];
        seen[q] = true;
        match match_[q] {
            Some(mq) => q = parent[mq].expect("even vertex below root always has a tree parent"),
            None => break,
        }
    }
    let mut q = b;
    loop {
        q = base[q];
        if seen[q] {
            return q;
        }
        q = parent[match_[q].expect("walking an alternating path to the lca stays matched")]
            .expect("odd vertex always has a tree parent");
    }
}

fn mark_blossom_path(
    base: &mut [usize],
    parent: &mut [Option<usize>],
    match_: &[Option<usize>],
    in_blossom: &mut [bool],
    mut v: usize,
    b: usize,
    mut child: usize,
) {
    while base[v] != b {
        in_blossom[base[v]] = true;
        let mv = match_[v].expect("v is even: matched unless it is the search root");
        in_blossom[base[mv]] = true;
        parent[v] = Some(child);
        child = mv;
        v = parent[mv].expect("matched vertex on an alternating path has a tree parent");
    }
}

/// BFS from `root` maintaining an alternating tree, contracting blossoms
/// as they're discovered. Returns `(exposed_vertex, parent_table)` on
/// success, so the caller can walk the augmenting path back to `root`.
fn find_augmenting_path(
    n: usize,
    adj: &[Vec<(usize, ArcId)>],
    match_: &[Option<usize>],
    root: usize,
) -> Option<(usize, Vec<Option<usize>>)> {
    let mut used = vec![false; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut base: Vec<usize> = (0..n).collect();
    used[root] = true;

    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(v) = queue.pop_front() {
        for &(to, _arc) in &adj[v] {
            if base[v] == base[to] || match_[v] == Some(to) {
                continue;
            }
            let to_is_even_already = to == root || match_[to].map(|m| parent[m].is_some()).unwrap_or(false);
            if to_is_even_already {
                let curbase = lca(&base, &parent, match_, v, to);
                let mut in_blossom = vec![false; n];
                mark_blossom_path(&mut base, &mut parent, match_, &mut in_blossom, v, curbase, to);
                mark_blossom_path(&mut base, &mut parent, match_, &mut in_blossom, to, curbase, v);
                for i in 0..n {
                    if in_blossom[base[i]] {
                        base[i] = curbase;
                        if !used[i] {
                            used[i] = true;
                            queue.push_back(i);
                        }
                    }
                }
            } else if parent[to].is_none() {
                parent[to] = Some(v);
                match match_[to] {
                    None => return Some((to, parent)),
                    Some(mt) => {
                        used[mt] = true;
                        queue.push_back(mt);
                    }
                }
            }
        }
    }
    None
}

fn augment(match_: &mut [Option<usize>], parent: &[Option<usize>], found: usize) {
    let mut cur = Some(found);
    while let Some(v) = cur {
        let pv = parent[v].expect("augmenting path parent must exist up to the root");
        let previous_partner = match_[pv];
        match_[v] = Some(pv);
        match_[pv] = Some(v);
        cur = previous_partner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn matches_every_node_on_a_triangle_plus_pendant() {
        // A 4-cycle decorated with an odd triangle: 0-1-2-0 (triangle) and
        // 2-3 (pendant). Maximum matching covers all four nodes: one
        // triangle edge plus the pendant.
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let d = g.add_node();
        g.add_arc(a, b, Directedness::Undirected).unwrap();
        g.add_arc(b, c, Directedness::Undirected).unwrap();
        g.add_arc(c, a, Directedness::Undirected).unwrap();
        g.add_arc(c, d, Directedness::Undirected).unwrap();

        let matching = general_max_matching(&g);
        assert_eq!(matching.len(), 2);
        assert!(matching.is_matched(a));
        assert!(matching.is_matched(b));
        assert!(matching.is_matched(c));
        assert!(matching.is_matched(d));
    }

    #[test]
    fn a_single_edge_matches_both_endpoints() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let arc = g.add_arc(a, b, Directedness::Undirected).unwrap();

        let matching = general_max_matching(&g);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching.matched_arc(a), Some(arc));
        assert_eq!(matching.matched_arc(b), Some(arc));
    }

    #[test]
    fn an_isolated_node_is_never_matched() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let isolated = g.add_node();
        g.add_arc(a, b, Directedness::Undirected).unwrap();

        let matching = general_max_matching(&g);
        assert!(!matching.is_matched(isolated));
        assert_eq!(matching.len(), 1);
    }
}
