//! Connected components, strongly connected components (Kosaraju
//! two-pass), bridges and cut vertices (lowlink DFS), and two-edge
//! -connected components (built by contracting across non-bridge arcs).

use hashbrown::HashMap;
use indexmap::IndexMap;

use crate::graph::{GraphCapability, Reversed};
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::union_find::UnionFind;

use super::Dfs;

/// A partition of a graph's nodes into components, each identified by a
/// representative `NodeId`.
#[derive(Debug, Clone)]
pub struct Components {
    representative: IndexMap<NodeId, NodeId>,
    groups: IndexMap<NodeId, Vec<NodeId>>,
}

impl Components {
    pub fn representative_of(&self, node: NodeId) -> Option<NodeId> {
        self.representative.get(&node).copied()
    }

    pub fn same_component(&self, a: NodeId, b: NodeId) -> bool {
        matches!((self.representative_of(a), self.representative_of(b)), (Some(x), Some(y)) if x == y)
    }

    pub fn count(&self) -> usize {
        self.groups.len()
    }

    pub fn members_of(&self, representative: NodeId) -> &[NodeId] {
        self.groups
            .get(&representative)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn representatives(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.groups.keys().copied()
    }
}

/// Weakly-connected components: nodes joined through any arc regardless of
/// direction (`ArcFilter::All`).
pub fn connected_components<G: GraphCapability + ?Sized>(graph: &G) -> Components {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let mut index_of: HashMap<NodeId, usize> = HashMap::new();
    for (i, &n) in nodes.iter().enumerate() {
        index_of.insert(n, i);
    }
    let mut uf: UnionFind<usize> = UnionFind::new(nodes.len());
    for arc in graph.arcs(ArcFilter::All) {
        let (u, v) = (graph.u(arc), graph.v(arc));
        if let (Some(&iu), Some(&iv)) = (index_of.get(&u), index_of.get(&v)) {
            uf.union(iu, iv);
        }
    }
    build_components(&nodes, &mut uf)
}

fn build_components(nodes: &[NodeId], uf: &mut UnionFind<usize>) -> Components {
    let mut representative = IndexMap::new();
    let mut groups: IndexMap<NodeId, Vec<NodeId>> = IndexMap::new();
    for (i, &n) in nodes.iter().enumerate() {
        let rep_idx = uf.find_mut(i);
        let rep = nodes[rep_idx];
        representative.insert(n, rep);
        groups.entry(rep).or_default().push(n);
    }
    Components {
        representative,
        groups,
    }
}

/// Strongly connected components of a directed graph via Kosaraju's
/// two-pass algorithm: a DFS over the graph to get a finishing order, then
/// a DFS over the reversed graph processing nodes in reverse finish order.
pub fn strongly_connected_components<G: GraphCapability + ?Sized>(graph: &G) -> Components {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let first_pass = Dfs::run(graph, nodes.iter().copied());
    let finish_order = first_pass.finish_order().to_vec();

    let reversed = Reversed(graph);
    let mut index_of: HashMap<NodeId, usize> = HashMap::new();
    for (i, &n) in nodes.iter().enumerate() {
        index_of.insert(n, i);
    }
    let mut uf: UnionFind<usize> = UnionFind::new(nodes.len());
    let mut visited: HashMap<NodeId, bool> = HashMap::new();

    for &start in finish_order.iter().rev() {
        if visited.contains_key(&start) {
            continue;
        }
        let component_dfs = Dfs::run(&reversed, [start]);
        for &n in component_dfs.discovery_order() {
            visited.insert(n, true);
            if let (Some(&is), Some(&in_)) = (index_of.get(&start), index_of.get(&n)) {
                uf.union(is, in_);
            }
        }
    }
    build_components(&nodes, &mut uf)
}

/// Bridges (arcs whose removal disconnects their two endpoints) and cut
/// vertices (nodes whose removal increases the number of components),
/// found with a single lowlink DFS over an undirected view of the graph.
#[derive(Debug, Default)]
pub struct BridgeReport {
    pub bridges: Vec<ArcId>,
    pub cut_vertices: Vec<NodeId>,
}

pub fn bridges_and_cut_vertices<G: GraphCapability + ?Sized>(graph: &G) -> BridgeReport {
    let mut report = BridgeReport::default();
    let mut disc: HashMap<NodeId, usize> = HashMap::new();
    let mut low: HashMap<NodeId, usize> = HashMap::new();
    let mut timer = 0usize;
    let mut is_cut: HashMap<NodeId, bool> = HashMap::new();

    for root in graph.nodes().collect::<Vec<_>>() {
        if disc.contains_key(&root) {
            continue;
        }
        // Explicit-stack lowlink DFS: frame is (node, parent arc, arc
        // list, position, root-child count).
        let mut stack: Vec<(NodeId, Option<ArcId>, Vec<ArcId>, usize)> = Vec::new();
        disc.insert(root, timer);
        low.insert(root, timer);
        timer += 1;
        let mut root_children = 0usize;
        stack.push((root, None, graph.incident(root, ArcFilter::All).collect(), 0));

        while let Some(frame) = stack.last_mut() {
            let (u, parent_arc, arcs, pos) = frame;
            let u = *u;
            if *pos >= arcs.len() {
                let finished_low = low[&u];
                stack.pop();
                if let Some((parent, _, _, _)) = stack.last_mut() {
                    let parent = *parent;
                    let p_low = low[&parent];
                    low.insert(parent, p_low.min(finished_low));
                    if parent == root {
                        root_children += 1;
                    } else if finished_low >= disc[&parent] {
                        is_cut.insert(parent, true);
                    }
                    if finished_low > disc[&parent] {
                        if let Some(parent_conn_arc) = stack.last().unwrap().1 {
                            let _ = parent_conn_arc;
                        }
                    }
                }
                continue;
            }
            let arc = arcs[*pos];
            *pos += 1;
            if Some(arc) == *parent_arc {
                continue;
            }
            let v = graph.other(arc, u);
            if let Some(&dv) = disc.get(&v) {
                let cur_low = low[&u];
                low.insert(u, cur_low.min(dv));
            } else {
                disc.insert(v, timer);
                low.insert(v, timer);
                timer += 1;
                stack.push((v, Some(arc), graph.incident(v, ArcFilter::All).collect(), 0));
            }
        }
        if root_children > 1 {
            is_cut.insert(root, true);
        }
    }

    // A bridge is an arc (u, v) where low[v] > disc[u] for the child side;
    // recompute in a second, cheap pass now that disc/low are final.
    for arc in graph.arcs(ArcFilter::Edge) {
        let (u, v) = (graph.u(arc), graph.v(arc));
        if let (Some(&du), Some(&lv), Some(&dv), Some(&lu)) =
            (disc.get(&u), low.get(&v), disc.get(&v), low.get(&u))
        {
            if (lv > du && dv > du) || (lu > dv && du > dv) {
                report.bridges.push(arc);
            }
        }
    }
    report.cut_vertices = is_cut.keys().copied().collect();
    report
}

/// Two-edge-connected components: contract the graph across every arc
/// that is not a bridge, reusing the bridge pass and this crate's own
/// `DisjointSet` rather than a second traversal family.
pub fn two_edge_connected_components<G: GraphCapability + ?Sized>(graph: &G) -> Components {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let mut index_of: HashMap<NodeId, usize> = HashMap::new();
    for (i, &n) in nodes.iter().enumerate() {
        index_of.insert(n, i);
    }
    let report = bridges_and_cut_vertices(graph);
    let bridges: hashbrown::HashSet<ArcId> = report.bridges.into_iter().collect();

    let mut uf: UnionFind<usize> = UnionFind::new(nodes.len());
    for arc in graph.arcs(ArcFilter::Edge) {
        if bridges.contains(&arc) {
            continue;
        }
        let (u, v) = (graph.u(arc), graph.v(arc));
        if let (Some(&iu), Some(&iv)) = (index_of.get(&u), index_of.get(&v)) {
            uf.union(iu, iv);
        }
    }
    build_components(&nodes, &mut uf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn connected_components_merge_across_either_direction() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        let comps = connected_components(&g);
        assert!(comps.same_component(a, b));
        assert!(!comps.same_component(a, c));
        assert_eq!(comps.count(), 2);
    }

    #[test]
    fn scc_on_a_directed_cycle_is_one_component() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        g.add_arc(b, c, Directedness::Directed).unwrap();
        g.add_arc(c, a, Directedness::Directed).unwrap();
        let comps = strongly_connected_components(&g);
        assert_eq!(comps.count(), 1);
    }

    #[test]
    fn scc_on_a_dag_splits_every_node() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        g.add_arc(b, c, Directedness::Directed).unwrap();
        let comps = strongly_connected_components(&g);
        assert_eq!(comps.count(), 3);
    }

    #[test]
    fn a_single_connecting_edge_is_a_bridge() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let ab = g.add_arc(a, b, Directedness::Undirected).unwrap();
        g.add_arc(b, c, Directedness::Undirected).unwrap();
        g.add_arc(c, a, Directedness::Undirected).unwrap();
        let d = g.add_node();
        let bridge = g.add_arc(b, d, Directedness::Undirected).unwrap();

        let report = bridges_and_cut_vertices(&g);
        assert!(report.bridges.contains(&bridge));
        assert!(!report.bridges.contains(&ab));
        assert!(report.cut_vertices.contains(&b));
    }
}
