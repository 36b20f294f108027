//! Edge- or node-disjoint shortest paths: a generic repeated-Dijkstra
//! scheme for any `k`, plus Suurballe's reweighted-residual fast path for
//! the common `k = 2`, `Edge`, nonnegative-cost case.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::GraphResult;
use crate::graph::{GraphCapability, Subgraph};
use crate::id::{ArcFilter, ArcId, NodeId};
use crate::measure::Measure;
use crate::path::Path;
use crate::queue::PriorityQueue;

use super::{Dijkstra, DijkstraMode};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisjointPathsKind {
    Edge,
    Node,
}

/// Up to `k` disjoint shortest-ish paths from `source` to `target`. Fewer
/// than `k` are returned if the graph runs out of capacity before `k`
/// augmentations succeed.
pub fn disjoint_paths<G, C, M>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    mut cost: C,
    k: usize,
    kind: DisjointPathsKind,
) -> GraphResult<Vec<Path>>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    let costs: HashMap<ArcId, M> = graph.arcs(ArcFilter::All).map(|a| (a, cost(a))).collect();
    let all_nonnegative = costs.values().all(|c| !c.is_negative());

    if k == 2 && kind == DisjointPathsKind::Edge && all_nonnegative {
        if let Some(paths) = suurballe(graph, source, target, &costs)? {
            return Ok(paths);
        }
    }
    generic_disjoint_paths(graph, source, target, |arc| costs[&arc], k, kind)
}

fn generic_disjoint_paths<G, C, M>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    mut cost: C,
    k: usize,
    kind: DisjointPathsKind,
) -> GraphResult<Vec<Path>>
where
    G: GraphCapability + ?Sized,
    C: FnMut(ArcId) -> M,
    M: Measure,
{
    let mut banned_arcs: HashSet<ArcId> = HashSet::new();
    let mut banned_nodes: HashSet<NodeId> = HashSet::new();
    let mut results = Vec::new();

    for _ in 0..k {
        let mut sub = Subgraph::new(graph);
        for &n in &banned_nodes {
            sub.disable_node(n);
        }
        for &a in &banned_arcs {
            sub.disable_arc(a);
        }

        let mut dij = Dijkstra::new(&sub, |arc| cost(arc), DijkstraMode::Sum);
        dij.add_source(source);
        let found = dij.run_until_fixed(target)?;
        if found != target {
            break;
        }
        let path = dij.get_path(target).expect("target just fixed, path must exist");
        for &arc in path.arcs() {
            banned_arcs.insert(arc);
        }
        if kind == DisjointPathsKind::Node {
            let nodes = path.nodes();
            for &n in &nodes[1..nodes.len() - 1] {
                banned_nodes.insert(n);
            }
        }
        results.push(path);
    }
    Ok(results)
}

struct SynEdge {
    to: NodeId,
    weight_is_zero: bool,
    arc: ArcId,
    reversed: bool,
}

/// Suurballe's algorithm: find the shortest path P1, reweight every arc to
/// a nonnegative reduced cost via P1's distance labels, build a residual
/// where P1's arcs run only in reverse at zero cost, find a second
/// shortest path P2 in the residual, cancel any arc P2 undoes from P1, and
/// decompose what remains into two arc-disjoint source-target paths.
///
/// Returns `None` (never `Err`) when the graph turns out not to admit two
/// disjoint paths at all — callers fall back to the generic scheme, which
/// handles that case directly by returning fewer than `k` paths.
fn suurballe<G, M>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    costs: &HashMap<ArcId, M>,
) -> GraphResult<Option<Vec<Path>>>
where
    G: GraphCapability + ?Sized,
    M: Measure,
{
    let mut first = Dijkstra::new(graph, |arc| costs[&arc], DijkstraMode::Sum);
    first.add_source(source);
    first.run(None)?;
    if !first.reached(target) {
        return Ok(None);
    }
    let p1 = first.get_path(target).expect("target reached");
    let p1_arcs: HashSet<ArcId> = p1.arcs().iter().copied().collect();

    // Reduced cost of `arc = (u, v)`: `c(arc) + d[u] - d[v]`, always `>= 0`
    // for arcs out of a reached node by the shortest-path optimality
    // condition.
    let reduced = |arc: ArcId| -> Option<M> {
        let u = graph.u(arc);
        let v = graph.v(arc);
        if !first.reached(u) || !first.reached(v) {
            return None;
        }
        Some(costs[&arc] + first.get_distance(u) - first.get_distance(v))
    };

    let mut adjacency: HashMap<NodeId, Vec<SynEdge>> = HashMap::new();
    for arc in graph.arcs(ArcFilter::All) {
        if p1_arcs.contains(&arc) {
            let (u, v) = (graph.u(arc), graph.v(arc));
            adjacency.entry(v).or_default().push(SynEdge {
                to: u,
                weight_is_zero: true,
                arc,
                reversed: true,
            });
        } else if let Some(_rw) = reduced(arc) {
            let (u, v) = (graph.u(arc), graph.v(arc));
            adjacency.entry(u).or_default().push(SynEdge {
                to: v,
                weight_is_zero: false,
                arc,
                reversed: false,
            });
        }
    }

    // Manual Dijkstra over the synthetic residual: reduced cost for
    // forward edges, zero for the reversed P1 edges.
    let mut dist: IndexMap<NodeId, M> = IndexMap::new();
    let mut parent: IndexMap<NodeId, (ArcId, bool)> = IndexMap::new();
    let mut queue: PriorityQueue<NodeId, M> = PriorityQueue::new();
    dist.insert(source, M::zero());
    queue.set(source, M::zero());

    while let Some((u, d_u)) = queue.pop() {
        if u == target {
            break;
        }
        let Some(edges) = adjacency.get(&u) else {
            continue;
        };
        for edge in edges {
            let weight = if edge.weight_is_zero {
                M::zero()
            } else {
                reduced(edge.arc).expect("forward edges already filtered to reached endpoints")
            };
            let new_d = d_u + weight;
            let improves = dist.get(&edge.to).map(|&d| new_d < d).unwrap_or(true);
            if improves {
                dist.insert(edge.to, new_d);
                parent.insert(edge.to, (edge.arc, edge.reversed));
                queue.set(edge.to, new_d);
            }
        }
    }

    if !dist.contains_key(&target) {
        return Ok(None);
    }

    let mut p2_steps = Vec::new();
    let mut cur = target;
    while let Some(&(arc, reversed)) = parent.get(&cur) {
        p2_steps.push((arc, reversed));
        cur = if reversed { graph.v(arc) } else { graph.u(arc) };
    }
    p2_steps.reverse();

    let mut cancelled: HashSet<ArcId> = HashSet::new();
    for &(arc, reversed) in &p2_steps {
        if reversed {
            cancelled.insert(arc);
        }
    }

    let remaining: Vec<ArcId> = p1_arcs
        .iter()
        .copied()
        .filter(|a| !cancelled.contains(a))
        .chain(
            p2_steps
                .iter()
                .filter(|(_, reversed)| !reversed)
                .map(|(arc, _)| *arc),
        )
        .collect();

    let mut out_map: HashMap<NodeId, Vec<ArcId>> = HashMap::new();
    for arc in remaining {
        out_map.entry(graph.u(arc)).or_default().push(arc);
    }

    let trace = |out_map: &mut HashMap<NodeId, Vec<ArcId>>| -> Option<Vec<ArcId>> {
        let mut arcs = Vec::new();
        let mut cur = source;
        while cur != target {
            let arc = out_map.get_mut(&cur)?.pop()?;
            arcs.push(arc);
            cur = graph.v(arc);
        }
        Some(arcs)
    };

    let Some(arcs_a) = trace(&mut out_map) else {
        return Ok(None);
    };
    let Some(arcs_b) = trace(&mut out_map) else {
        return Ok(None);
    };

    let path_a = Path::from_arcs(graph, source, arcs_a).ok();
    let path_b = Path::from_arcs(graph, source, arcs_b).ok();
    match (path_a, path_b) {
        (Some(a), Some(b)) => Ok(Some(vec![a, b])),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph as ConcreteGraph, MutableGraph};
    use crate::id::Directedness;

    #[test]
    fn s6_two_fully_disjoint_rails() {
        let mut g = ConcreteGraph::new();
        let s = g.add_node();
        let a1 = g.add_node();
        let a2 = g.add_node();
        let t = g.add_node();
        let mut cost = HashMap::new();
        cost.insert(g.add_arc(s, a1, Directedness::Directed).unwrap(), 1i64);
        cost.insert(g.add_arc(a1, t, Directedness::Directed).unwrap(), 1i64);
        cost.insert(g.add_arc(s, a2, Directedness::Directed).unwrap(), 1i64);
        cost.insert(g.add_arc(a2, t, Directedness::Directed).unwrap(), 1i64);

        let paths = disjoint_paths(&g, s, t, |arc| cost[&arc], 2, DisjointPathsKind::Edge).unwrap();
        assert_eq!(paths.len(), 2);
        let total: i64 = paths.iter().map(|p| p.total_cost(|arc| cost[&arc])).sum();
        assert_eq!(total, 4);
        let mut used: HashSet<ArcId> = HashSet::new();
        for p in &paths {
            for &arc in p.arcs() {
                assert!(used.insert(arc), "arcs must be disjoint across paths");
            }
        }
    }

    #[test]
    fn falls_back_to_generic_scheme_for_k_three() {
        let mut g = ConcreteGraph::new();
        let s = g.add_node();
        let t = g.add_node();
        let mut cost = HashMap::new();
        cost.insert(g.add_arc(s, t, Directedness::Directed).unwrap(), 1i64);

        let paths = disjoint_paths(&g, s, t, |arc| cost[&arc], 3, DisjointPathsKind::Edge).unwrap();
        assert_eq!(paths.len(), 1);
    }
}
