//! The concrete, owning, mutable graph.
//!
//! Stores nodes and arcs in two insertion-ordered arenas keyed by monotonic
//! indices. Each node additionally owns four secondary indices — `all`,
//! `edge`, `forward`, `backward` — materialized as `Vec<ArcId>` so that
//! filtered enumeration around a node is `O(deg)` rather than a scan of
//! every arc in the graph. `add_arc` pushes the new arc's id onto the
//! appropriate per-node vectors based on directedness; deletion (rare) is
//! linear in the affected adjacency lists and never reuses a freed index.

use crate::error::{GraphError, GraphResult};
use crate::id::{ArcFilter, ArcId, Directedness, NodeId};

use super::{precondition, GraphCapability, MutableGraph};

#[derive(Debug, Clone)]
struct NodeSlot {
    alive: bool,
    all: Vec<ArcId>,
    edge: Vec<ArcId>,
    forward: Vec<ArcId>,
    backward: Vec<ArcId>,
}

impl NodeSlot {
    fn new() -> Self {
        NodeSlot {
            alive: true,
            all: Vec::new(),
            edge: Vec::new(),
            forward: Vec::new(),
            backward: Vec::new(),
        }
    }

    fn remove_arc(&mut self, arc: ArcId) {
        self.all.retain(|&a| a != arc);
        self.edge.retain(|&a| a != arc);
        self.forward.retain(|&a| a != arc);
        self.backward.retain(|&a| a != arc);
    }
}

#[derive(Debug, Clone)]
struct ArcSlot {
    alive: bool,
    u: NodeId,
    v: NodeId,
    directedness: Directedness,
}

/// A mutable graph that owns its node and arc identity space.
///
/// Node and arc handles are never reused after a delete; `Clear` resets
/// both arenas to empty, invalidating every previously issued handle.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeSlot>,
    arcs: Vec<ArcSlot>,
    node_count: usize,
    arc_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn with_capacity(nodes: usize, arcs: usize) -> Self {
        Graph {
            nodes: Vec::with_capacity(nodes),
            arcs: Vec::with_capacity(arcs),
            node_count: 0,
            arc_count: 0,
        }
    }

    fn node_slot(&self, node: NodeId) -> Option<&NodeSlot> {
        self.nodes
            .get(node.index())
            .filter(|slot| slot.alive)
    }

    fn arc_slot(&self, arc: ArcId) -> Option<&ArcSlot> {
        self.arcs.get(arc.index()).filter(|slot| slot.alive)
    }
}

impl GraphCapability for Graph {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn arc_count(&self, filter: ArcFilter) -> usize {
        match filter {
            ArcFilter::All => self.arc_count,
            _ => self.arcs(filter).count(),
        }
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(
            self.nodes
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.alive)
                .map(|(i, _)| NodeId::new(i as u32)),
        )
    }

    fn arcs(&self, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        Box::new(
            self.arcs
                .iter()
                .enumerate()
                .filter(move |(_, slot)| slot.alive && arc_matches(slot, filter))
                .map(|(i, _)| ArcId::new(i as u32)),
        )
    }

    fn incident(&self, node: NodeId, filter: ArcFilter) -> Box<dyn Iterator<Item = ArcId> + '_> {
        let Some(slot) = self.node_slot(node) else {
            return Box::new(std::iter::empty());
        };
        let list = match filter {
            ArcFilter::All => &slot.all,
            ArcFilter::Edge => &slot.edge,
            ArcFilter::Forward => &slot.forward,
            ArcFilter::Backward => &slot.backward,
        };
        Box::new(list.iter().copied())
    }

    fn u(&self, arc: ArcId) -> NodeId {
        self.arc_slot(arc).map(|s| s.u).unwrap_or_default()
    }

    fn v(&self, arc: ArcId) -> NodeId {
        self.arc_slot(arc).map(|s| s.v).unwrap_or_default()
    }

    fn is_edge(&self, arc: ArcId) -> bool {
        self.arc_slot(arc)
            .map(|s| s.directedness.is_edge())
            .unwrap_or(false)
    }

    fn node_at_index(&self, index: usize) -> Option<NodeId> {
        self.nodes
            .get(index)
            .filter(|s| s.alive)
            .map(|_| NodeId::new(index as u32))
    }

    fn arc_at_index(&self, index: usize) -> Option<ArcId> {
        self.arcs
            .get(index)
            .filter(|s| s.alive)
            .map(|_| ArcId::new(index as u32))
    }
}

fn arc_matches(slot: &ArcSlot, filter: ArcFilter) -> bool {
    match filter {
        ArcFilter::All => true,
        ArcFilter::Edge => slot.directedness.is_edge(),
        // `arcs(Forward)`/`arcs(Backward)` over the whole graph has no
        // single well-defined node to be "forward from"; treat it as a
        // synonym for "directed, non-edge" arcs, consistent with
        // `incident` which is where Forward/Backward actually matter.
        ArcFilter::Forward | ArcFilter::Backward => !slot.directedness.is_edge(),
    }
}

impl MutableGraph for Graph {
    fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(NodeSlot::new());
        self.node_count += 1;
        id
    }

    fn add_arc(&mut self, u: NodeId, v: NodeId, directedness: Directedness) -> GraphResult<ArcId> {
        if self.node_slot(u).is_none() || self.node_slot(v).is_none() {
            return Err(precondition("add_arc: endpoint does not belong to this graph"));
        }
        let id = ArcId::new(self.arcs.len() as u32);
        self.arcs.push(ArcSlot {
            alive: true,
            u,
            v,
            directedness,
        });
        self.arc_count += 1;

        let u_idx = u.index();
        let v_idx = v.index();
        match directedness {
            Directedness::Directed => {
                self.nodes[u_idx].all.push(id);
                self.nodes[u_idx].forward.push(id);
                if v_idx != u_idx {
                    self.nodes[v_idx].all.push(id);
                }
                self.nodes[v_idx].backward.push(id);
            }
            Directedness::Undirected => {
                self.nodes[u_idx].all.push(id);
                self.nodes[u_idx].edge.push(id);
                self.nodes[u_idx].forward.push(id);
                self.nodes[u_idx].backward.push(id);
                if v_idx != u_idx {
                    self.nodes[v_idx].all.push(id);
                    self.nodes[v_idx].edge.push(id);
                    self.nodes[v_idx].forward.push(id);
                    self.nodes[v_idx].backward.push(id);
                }
            }
        }
        Ok(id)
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.arcs.clear();
        self.node_count = 0;
        self.arc_count = 0;
    }

    fn delete_node(&mut self, node: NodeId) -> GraphResult<()> {
        if self.node_slot(node).is_none() {
            return Err(precondition("delete_node: node does not belong to this graph"));
        }
        let incident: Vec<ArcId> = self.nodes[node.index()].all.clone();
        for arc in incident {
            self.delete_arc(arc)?;
        }
        self.nodes[node.index()].alive = false;
        self.node_count -= 1;
        Ok(())
    }

    fn delete_arc(&mut self, arc: ArcId) -> GraphResult<()> {
        let Some(slot) = self.arc_slot(arc) else {
            return Err(precondition("delete_arc: arc does not belong to this graph"));
        };
        let (u, v) = (slot.u, slot.v);
        self.arcs[arc.index()].alive = false;
        self.arc_count -= 1;
        if let Some(u_idx) = self.nodes.get_mut(u.index()) {
            u_idx.remove_arc(arc);
        }
        if u != v {
            if let Some(v_idx) = self.nodes.get_mut(v.index()) {
                v_idx.remove_arc(arc);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_and_directed_arc_updates_indices() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let arc = g.add_arc(a, b, Directedness::Directed).unwrap();

        assert_eq!(g.u(arc), a);
        assert_eq!(g.v(arc), b);
        assert_eq!(g.other(arc, a), b);
        assert_eq!(g.other(arc, b), a);
        assert!(!g.is_edge(arc));

        let forward_a: Vec<_> = g.incident(a, ArcFilter::Forward).collect();
        assert_eq!(forward_a, vec![arc]);
        let backward_b: Vec<_> = g.incident(b, ArcFilter::Backward).collect();
        assert_eq!(backward_b, vec![arc]);
        assert!(g.incident(a, ArcFilter::Backward).next().is_none());
        assert!(g.incident(b, ArcFilter::Forward).next().is_none());
    }

    #[test]
    fn undirected_arc_is_in_both_forward_and_backward_of_both_ends() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let arc = g.add_arc(a, b, Directedness::Undirected).unwrap();
        assert!(g.is_edge(arc));

        for node in [a, b] {
            assert_eq!(g.incident(node, ArcFilter::Forward).collect::<Vec<_>>(), vec![arc]);
            assert_eq!(g.incident(node, ArcFilter::Backward).collect::<Vec<_>>(), vec![arc]);
            assert_eq!(g.incident(node, ArcFilter::Edge).collect::<Vec<_>>(), vec![arc]);
        }
    }

    #[test]
    fn delete_node_removes_incident_arcs() {
        let mut g = Graph::new();
        let a = g.add_node();
        let b = g.add_node();
        let c = g.add_node();
        g.add_arc(a, b, Directedness::Directed).unwrap();
        g.add_arc(b, c, Directedness::Directed).unwrap();

        g.delete_node(b).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.arc_count(ArcFilter::All), 0);
    }

    #[test]
    fn add_arc_rejects_foreign_endpoint() {
        let mut g = Graph::new();
        let a = g.add_node();
        let mut other = Graph::new();
        let foreign = other.add_node();
        assert!(g.add_arc(a, foreign, Directedness::Directed).is_err());
    }
}
