//! Spanning forests: Kruskal via `DisjointSet` when a cost callback is
//! supplied, otherwise a BFS tree over every component.

use hashbrown::HashMap;

use crate::graph::GraphCapability;
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;
use crate::union_find::UnionFind;

use super::Bfs;

/// The arcs selected to form a spanning forest, one tree per connected
/// component of the input graph.
#[derive(Debug, Clone, Default)]
pub struct SpanningForest {
    pub arcs: Vec<ArcId>,
}

/// Minimum spanning forest by Kruskal's algorithm: arcs sorted by
/// ascending cost, each accepted unless it would close a cycle.
pub fn spanning_forest<G, C, M>(graph: &G, mut cost: C) -> SpanningForest
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let mut index_of: HashMap<NodeId, usize> = HashMap::new();
    for (i, &n) in nodes.iter().enumerate() {
        index_of.insert(n, i);
    }

    let mut candidates: Vec<(ArcId, M)> = graph
        .arcs(ArcFilter::All)
        .map(|arc| (arc, cost(arc)))
        .collect();
    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut uf: UnionFind<usize> = UnionFind::new(nodes.len());
    let mut forest = SpanningForest::default();
    for (arc, _) in candidates {
        let (u, v) = (graph.u(arc), graph.v(arc));
        let (Some(&iu), Some(&iv)) = (index_of.get(&u), index_of.get(&v)) else {
            continue;
        };
        if !uf.equiv(iu, iv) {
            uf.union(iu, iv);
            forest.arcs.push(arc);
        }
    }
    forest
}

/// Spanning forest with no cost function: a BFS tree rooted at an
/// arbitrary node of each component, using each component's first
/// discovered node as root.
pub fn spanning_forest_unweighted<G: GraphCapability + ?Sized>(graph: &G) -> SpanningForest {
    let mut forest = SpanningForest::default();
    let mut visited: hashbrown::HashSet<NodeId> = hashbrown::HashSet::new();
    for root in graph.nodes() {
        if visited.contains(&root) {
            continue;
        }
        let bfs = Bfs::run(graph, [root]);
        for &node in bfs.order() {
            visited.insert(node);
            if let Some(arc) = bfs.parent_arc(node) {
                forest.arcs.push(arc);
            }
        }
    }
    forest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;
    use std::collections::HashMap as Map;

    #[test]
    fn kruskal_skips_the_arc_that_would_close_a_triangle() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        let ab = g.add_arc(a, b, Directedness::Undirected).unwrap();
        let bc = g.add_arc(b, c, Directedness::Undirected).unwrap();
        let ca = g.add_arc(c, a, Directedness::Undirected).unwrap();

        let mut costs: Map<ArcId, i64> = Map::new();
        costs.insert(ab, 1);
        costs.insert(bc, 1);
        costs.insert(ca, 1);

        let forest = spanning_forest(&g, |arc| costs[&arc]);
        assert_eq!(forest.arcs.len(), 2);
    }

    #[test]
    fn unweighted_forest_has_one_arc_per_non_root_node_per_component() {
        let mut g = ConcreteGraph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        g.add_arc(b, c, Directedness::Directed).unwrap();
        let forest = spanning_forest_unweighted(&g);
        assert_eq!(forest.arcs.len(), 2);
    }
}
